/// Module containing the [`Penalized`] objective for inequality-constrained problems.
pub mod penalty;
pub use penalty::{InequalityConstraints, Penalized};

/// Module containing the [`Rounded`] objective for integer-valued variables.
pub mod rounded;
pub use rounded::{Rounded, VariableKind};

/// Module containing the [`Parallel`] objective which evaluates batches with `rayon`.
#[cfg(feature = "rayon")]
pub mod parallel;
#[cfg(feature = "rayon")]
pub use parallel::Parallel;
