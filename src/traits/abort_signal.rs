use std::sync::Arc;

/// A trait for abort signals.
/// This trait is used in minimizers to check if the user has requested to abort the calculation.
/// Signals are only checked between steps, so a running objective evaluation is never
/// interrupted.
pub trait AbortSignal {
    /// Return `true` if the user has requested to abort the calculation.
    fn is_aborted(&self) -> bool;
    /// Abort the calculation. Make `is_aborted()` return `true`.
    fn abort(&self);
    /// Reset the abort signal. Make `is_aborted()` return `false`.
    fn reset(&self);
}

impl<A: AbortSignal + ?Sized> AbortSignal for Arc<A> {
    fn is_aborted(&self) -> bool {
        self.as_ref().is_aborted()
    }

    fn abort(&self) {
        self.as_ref().abort()
    }

    fn reset(&self) {
        self.as_ref().reset()
    }
}
