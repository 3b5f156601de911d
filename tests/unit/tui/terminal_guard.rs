use super::*;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockOps {
    calls: Mutex<Vec<&'static str>>,
}

impl TerminalOps for MockOps {
    fn setup(&self) -> std::io::Result<()> {
        self.calls.lock().unwrap().push("setup");
        Ok(())
    }

    fn restore(&self) -> std::io::Result<()> {
        self.calls.lock().unwrap().push("restore");
        Ok(())
    }
}

#[test]
fn terminal_guard_restores_on_drop() {
    let ops = Arc::new(MockOps::default());
    {
        let _guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    }

    assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
}

#[test]
fn terminal_restorer_is_idempotent() {
    let ops = Arc::new(MockOps::default());
    let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    let restorer = guard.restorer();

    restorer.restore().unwrap();
    restorer.restore().unwrap();
    drop(guard);

    assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
}

#[test]
fn termination_signals_use_shell_exit_codes() {
    assert_eq!(TerminationSignal::SigInt.exit_code(), 130);
    assert_eq!(TerminationSignal::SigTerm.exit_code(), 143);
}

#[test]
fn only_int_and_term_are_termination_signals() {
    assert_eq!(
        TerminationSignal::from_raw(libc::SIGINT),
        Some(TerminationSignal::SigInt)
    );
    assert_eq!(
        TerminationSignal::from_raw(libc::SIGTERM),
        Some(TerminationSignal::SigTerm)
    );
    assert_eq!(TerminationSignal::from_raw(libc::SIGHUP), None);
}

struct FailingRestore;

impl TerminalOps for FailingRestore {
    fn setup(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn restore(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("tty gone"))
    }
}

#[test]
fn restore_errors_surface_once_and_drop_stays_quiet() {
    let guard = TerminalGuard::with_ops(Arc::new(FailingRestore)).unwrap();
    let restorer = guard.restorer();
    assert!(restorer.restore().is_err());
    // Already marked restored; nothing is retried.
    assert!(restorer.restore().is_ok());
    drop(guard);
}
