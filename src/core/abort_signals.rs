use parking_lot::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use crate::traits::AbortSignal;
static INIT: Once = Once::new();
static CTRL_C_PRESSED: AtomicBool = AtomicBool::new(false);

/// A signal that is triggered when the user presses `Ctrl-C`.
/// <div class="warning">This signal takes over the `Ctrl-C` handler for the whole process and can interfere with
/// other libraries that use `Ctrl-C` (e.g. `tokio`).</div>
#[derive(Default)]
pub struct CtrlCAbortSignal;
impl CtrlCAbortSignal {
    /// Create a new `CtrlCAbortSignal` and register a ctrl-c handler.
    pub fn new() -> Self {
        let signal = Self {};
        signal.init_handler();
        signal
    }

    fn init_handler(&self) {
        INIT.call_once(|| {
            if let Err(err) = ctrlc::set_handler(move || {
                warn!("Ctrl-C pressed, stopping after the current step");
                CTRL_C_PRESSED.store(true, Ordering::SeqCst);
            }) {
                warn!(%err, "could not install the Ctrl-C handler");
            }
        });
    }
}

impl AbortSignal for CtrlCAbortSignal {
    fn is_aborted(&self) -> bool {
        CTRL_C_PRESSED.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        CTRL_C_PRESSED.store(true, Ordering::SeqCst)
    }

    fn reset(&self) {
        CTRL_C_PRESSED.store(false, Ordering::SeqCst);
    }
}

/// A signal that is triggered by setting an atomic boolean.
///
/// Wrap it in an [`Arc`](std::sync::Arc) to keep a handle which can abort a running minimization
/// from an observer or another thread.
#[derive(Default)]
pub struct AtomicAbortSignal {
    abort: AtomicBool,
}

impl AtomicAbortSignal {
    /// Create a new `AtomicAbortSignal`.
    pub const fn new() -> Self {
        Self {
            abort: AtomicBool::new(false),
        }
    }
}

impl AbortSignal for AtomicAbortSignal {
    fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }
}

/// A signal which never aborts.
#[derive(Default, Clone, Copy)]
pub struct NopAbortSignal;

impl AbortSignal for NopAbortSignal {
    fn is_aborted(&self) -> bool {
        false
    }

    fn abort(&self) {}

    fn reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_atomic_abort_signal() {
        let signal = Arc::new(AtomicAbortSignal::new());
        let handle = signal.clone();
        assert!(!signal.is_aborted());
        handle.abort();
        assert!(signal.is_aborted());
        signal.reset();
        assert!(!handle.is_aborted());
    }

    #[test]
    fn test_nop_abort_signal() {
        let signal = NopAbortSignal;
        signal.abort();
        assert!(!signal.is_aborted());
    }
}
