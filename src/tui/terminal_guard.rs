//! Terminal mode switching for the reader screen and the SIGINT/SIGTERM escape hatch.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long the signal thread waits for the main loop before restoring and exiting itself.
const SIGNAL_GRACE: Duration = Duration::from_secs(2);

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Raw mode, alternate screen, bracketed paste (for the open prompt) and a hidden cursor.
#[derive(Debug, Default)]
pub struct ReaderScreen;

impl TerminalOps for ReaderScreen {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableBracketedPaste,
            cursor::Hide
        )
    }

    /// Every step runs; the first failure is reported.
    fn restore(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        let steps = [
            terminal::disable_raw_mode(),
            execute!(
                io::stdout(),
                event::DisableBracketedPaste,
                terminal::LeaveAlternateScreen,
                cursor::Show
            ),
        ];
        steps.into_iter().collect()
    }
}

/// Shared handle that restores the terminal at most once, from whichever thread gets there
/// first.
#[derive(Clone)]
pub struct TerminalRestorer {
    inner: Arc<RestoreOnce>,
}

struct RestoreOnce {
    done: AtomicBool,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.inner.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.inner.ops.restore()
    }
}

/// Puts the terminal into reader mode; restores it on drop.
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(ReaderScreen))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        let inner = Arc::new(RestoreOnce {
            done: AtomicBool::new(false),
            ops,
        });
        Ok(Self {
            restorer: TerminalRestorer { inner },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    #[cfg(unix)]
    pub fn from_raw(signo: i32) -> Option<Self> {
        match signo {
            libc::SIGINT => Some(Self::SigInt),
            libc::SIGTERM => Some(Self::SigTerm),
            _ => None,
        }
    }

    /// Shell convention: 128 + signal number.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::SigInt => 130,
            Self::SigTerm => 143,
        }
    }
}

/// Forward SIGINT/SIGTERM to the main loop and wake it. A loop that has not exited within
/// `SIGNAL_GRACE` gets the terminal restored underneath it and the process exits.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
    wakeup: crate::tui::wakeup::WakeupSender,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new()
        .name("zread-signals".into())
        .spawn(move || {
            let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) else {
                return;
            };
            tracing::info!(?signal, "termination signal received");
            let _ = tx.send(signal);
            wakeup.wake();

            std::thread::sleep(SIGNAL_GRACE);
            tracing::warn!(?signal, "main loop did not exit; forcing shutdown");
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
