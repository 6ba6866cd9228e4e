use parking_lot::{Mutex, RwLock};
use std::{cell::RefCell, rc::Rc, sync::Arc};

/// A trait for observers which are shown the [`Status`](crate::traits::Status) of an
/// [`Algorithm`](crate::traits::Algorithm) after every step.
///
/// Observers cannot change the course of a run. To stop a run early, raise an
/// [`AbortSignal`](crate::traits::AbortSignal) instead.
pub trait Observer<S> {
    /// An observation method which is called after each step of an
    /// [`Algorithm`](crate::traits::Algorithm).
    fn observe(&mut self, current_step: usize, status: &S);
}

impl<O, S> Observer<S> for Arc<RwLock<O>>
where
    O: Observer<S>,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.write().observe(current_step, status)
    }
}
impl<O, S> Observer<S> for Arc<Mutex<O>>
where
    O: Observer<S>,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.lock().observe(current_step, status)
    }
}
impl<O, S> Observer<S> for Rc<RefCell<O>>
where
    O: Observer<S>,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.borrow_mut().observe(current_step, status)
    }
}
