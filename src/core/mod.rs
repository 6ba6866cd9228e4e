/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signals;
/// [`Bound`] type for binding variables to a range.
pub mod bound;
/// [`Callbacks`] type which bundles observers and an abort signal.
pub mod callbacks;
/// [`SwarmError`] type returned by fallible operations.
pub mod error;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`SwarmSummary`] type for the result of the minimization.
pub mod summary;
/// Random-number helpers.
pub mod utils;

pub use abort_signals::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::{Bound, Bounds, BoundsError};
pub use callbacks::Callbacks;
pub use error::SwarmError;
pub use point::Point;
pub use summary::{SwarmSummary, TerminationReason};
