use std::io;
use std::os::unix::io::RawFd;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::Mutex;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::SigId;

use super::control;
use super::mode::{self, RawModeSnapshot};
use crate::error::TerminalError;

type Cleanup = Box<dyn FnOnce() -> Result<(), TerminalError> + Send + 'static>;

/// Owns the terminal for as long as it is in raw / mouse-reporting mode.
///
/// The restore routine runs exactly once, on whichever path gets there
/// first: an explicit [`restore`](Self::restore), drop, or the panic hook.
/// SIGINT and SIGTERM raise the shutdown flag instead of killing the
/// process, so the input loop returns and the guard restores normally.
pub struct TerminalGuard {
    cleanup: Arc<Mutex<Option<Cleanup>>>,
    signals: Vec<SigId>,
}

impl TerminalGuard {
    fn new() -> Self {
        Self {
            cleanup: Arc::new(Mutex::new(None)),
            signals: Vec::new(),
        }
    }

    fn set_cleanup<F>(&self, cleanup: F)
    where
        F: FnOnce() -> Result<(), TerminalError> + Send + 'static,
    {
        *self.cleanup.lock() = Some(Box::new(cleanup));
    }

    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let cleanup_fn = cleanup.lock().take();
            if let Some(cleanup_fn) = cleanup_fn {
                let _ = cleanup_fn();
            }
            default_hook(info);
        }));
    }

    fn register_signals(&mut self, shutdown: &Arc<AtomicBool>) -> Result<(), TerminalError> {
        for signal in [SIGINT, SIGTERM] {
            let id = signal_hook::flag::register(signal, Arc::clone(shutdown))
                .map_err(TerminalError::Signal)?;
            self.signals.push(id);
        }
        Ok(())
    }

    /// Whether the restore routine is still pending.
    pub fn is_active(&self) -> bool {
        self.cleanup.lock().is_some()
    }

    /// Restore the terminal now. Later calls are no-ops.
    pub fn restore(&mut self) -> Result<(), TerminalError> {
        let cleanup_fn = self.cleanup.lock().take();
        let result = cleanup_fn.map_or(Ok(()), |cleanup_fn| cleanup_fn());
        // signal-hook keeps its handler installed after the last action is
        // removed, so SIGINT/SIGTERM are ignored from here until exit.
        for id in self.signals.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        result
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::error!(%err, "failed to restore terminal");
            eprintln!("nadaroth: {err}");
        }
    }
}

/// Capture the original mode of `fd` and arm every restore path: drop,
/// panic, and SIGINT/SIGTERM (which set `shutdown`).
pub fn install_restore_hooks(fd: RawFd, shutdown: &Arc<AtomicBool>) -> Result<TerminalGuard, TerminalError> {
    let snapshot = RawModeSnapshot::capture(fd)?;
    let mut guard = TerminalGuard::new();
    guard.set_cleanup(move || restore_mode(&snapshot));
    guard.install_panic_hook();
    guard.register_signals(shutdown)?;
    tracing::debug!(fd, "terminal restore hooks installed");
    Ok(guard)
}

/// Re-apply `snapshot` and undo the display setup.
///
/// The display is reset even if the attributes could not be applied; the
/// first error is returned.
pub fn restore_mode(snapshot: &RawModeSnapshot) -> Result<(), TerminalError> {
    let applied = snapshot.apply();
    let displayed = control::restore_display(&mut io::stdout().lock()).map_err(TerminalError::Output);
    tracing::debug!(fd = snapshot.fd(), "terminal restored");
    applied.and(displayed)
}

/// Take over stdin/stdout for full-screen use.
///
/// If any step after the capture fails, the returned error drops the guard,
/// which restores whatever had already been changed.
pub fn setup_terminal(shutdown: &Arc<AtomicBool>) -> Result<TerminalGuard, TerminalError> {
    let fd = libc::STDIN_FILENO;
    let guard = install_restore_hooks(fd, shutdown)?;
    mode::enter_raw_mode(fd)?;
    mode::set_nonblocking(fd)?;
    control::initialize_display(&mut io::stdout().lock()).map_err(TerminalError::Output)?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::io::AsRawFd;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn restore_runs_cleanup_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut guard = TerminalGuard::new();
        guard.set_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert!(guard.is_active());

        guard.restore().unwrap();
        guard.restore().unwrap();
        drop(guard);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_restores_when_not_restored_explicitly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guard = TerminalGuard::new();
        guard.set_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        drop(guard);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restore_reports_cleanup_failure() {
        let mut guard = TerminalGuard::new();
        guard.set_cleanup(|| {
            Err(TerminalError::Apply(io::Error::from_raw_os_error(libc::EBADF)))
        });
        assert!(matches!(guard.restore(), Err(TerminalError::Apply(_))));
        assert!(!guard.is_active());
    }

    #[test]
    fn panic_hook_runs_cleanup_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut guard = TerminalGuard::new();
        guard.set_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        guard.install_panic_hook();

        let result = std::panic::catch_unwind(|| panic!("render thread died"));
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!guard.is_active());

        guard.restore().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn termination_signal_sets_shutdown_flag() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut guard = TerminalGuard::new();
        guard.register_signals(&shutdown).unwrap();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        assert!(shutdown.load(Ordering::SeqCst));
        guard.restore().unwrap();
        assert!(guard.signals.is_empty());
    }

    #[test]
    fn hooks_require_a_terminal() {
        let file = tempfile::tempfile().unwrap();
        let shutdown = Arc::new(AtomicBool::new(false));
        let err = install_restore_hooks(file.as_raw_fd(), &shutdown).err().unwrap();
        assert!(matches!(err, TerminalError::Query(_)));
    }
}
