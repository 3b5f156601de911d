use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use zread::app::ReaderApp;
use zread::core::event::InputEvent;
use zread::kernel::services::adapters::{ensure_settings_file, get_settings_path, load_settings};
use zread::tui::terminal_guard::{install_termination_signals, TerminalGuard, TerminationSignal};
use zread::tui::wakeup::{wakeup_pipe, WakeupReceiver};
use zread::ui::backend::terminal::RatatuiTerminal;

mod logging;

fn main() -> io::Result<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let logging = logging::init();

    let settings_path = match ensure_settings_file() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "cannot create settings file; using defaults");
            get_settings_path()
        }
    };
    let settings = load_settings().unwrap_or_default();

    let (wakeup_tx, wakeup_rx) = wakeup_pipe()?;
    let mut app = ReaderApp::new(settings, settings_path, Some(wakeup_tx.clone()))?;
    app.adapt_colors_to_terminal();
    if let Some(path) = path {
        app.open(path);
    }

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals = install_termination_signals(guard.restorer(), signal_tx, wakeup_tx)?;
    let mut terminal = RatatuiTerminal::new(io::stdout())?;

    let result = run(&mut app, &mut terminal, &wakeup_rx, &signal_rx);
    if let Err(e) = &result {
        tracing::error!(error = %e, "main loop failed");
    }

    drop(terminal);
    drop(guard);
    drop(app);
    if let Some(logging) = logging {
        tracing::info!(log_dir = %logging.log_dir().display(), "exiting");
    }
    result
}

fn run(
    app: &mut ReaderApp,
    terminal: &mut RatatuiTerminal,
    wakeup: &WakeupReceiver,
    signals: &mpsc::Receiver<TerminationSignal>,
) -> io::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|backend, area| app.render(backend, area))?;
            dirty = false;
        }

        wait_readable(wakeup)?;
        wakeup.drain();

        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down on signal");
            app.quit();
            return Ok(());
        }

        while crossterm::event::poll(std::time::Duration::ZERO)? {
            let event = InputEvent::from(crossterm::event::read()?);
            dirty |= app.handle_input(&event);
        }
        dirty |= app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Block until stdin or the wakeup pipe is readable.
fn wait_readable(wakeup: &WakeupReceiver) -> io::Result<()> {
    let mut fds = [
        libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        },
        libc::pollfd {
            fd: wakeup.raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        },
    ];
    loop {
        // SAFETY: `fds` is a valid array of two pollfd entries.
        let ret = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if ret >= 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
