use crate::{
    core::NopAbortSignal,
    traits::{AbortSignal, Observer, Status},
};

/// A set of [`Observer`]s and an [`AbortSignal`] which can be used as an input to
/// [`Algorithm::process`](crate::traits::Algorithm::process).
pub struct Callbacks<S> {
    observers: Vec<Box<dyn Observer<S>>>,
    abort_signal: Box<dyn AbortSignal>,
}

impl<S: Status> Default for Callbacks<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Status> Callbacks<S> {
    /// Create an empty set of callbacks which never aborts.
    pub fn empty() -> Self {
        Self {
            observers: Vec::new(),
            abort_signal: Box::new(NopAbortSignal),
        }
    }

    /// Return the set of [`Callbacks`] with an additional [`Observer`] added.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<S> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Return the set of [`Callbacks`] with the [`AbortSignal`] replaced.
    pub fn with_abort_signal<A>(mut self, abort_signal: A) -> Self
    where
        A: AbortSignal + 'static,
    {
        self.abort_signal = Box::new(abort_signal);
        self
    }

    /// Show the status to every observer, in the order they were added.
    pub fn observe(&mut self, current_step: usize, status: &S) {
        for observer in &mut self.observers {
            observer.observe(current_step, status);
        }
    }

    /// Whether the abort signal has been raised.
    pub fn is_aborted(&self) -> bool {
        self.abort_signal.is_aborted()
    }

    /// Lower the abort signal.
    pub fn reset(&self) {
        self.abort_signal.reset();
    }
}
