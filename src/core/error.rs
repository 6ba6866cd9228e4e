use crate::core::BoundsError;
use std::convert::Infallible;
use thiserror::Error;

/// Errors which can end a swarm minimization.
///
/// `E` is the error type of the user's [`Objective`](crate::traits::Objective). Objectives which
/// cannot fail use [`Infallible`].
#[derive(Debug, Error)]
pub enum SwarmError<E = Infallible> {
    /// The search space bounds are malformed.
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),
    /// A swarm needs at least one particle.
    #[error("swarm size must be at least 1 (got {0})")]
    InvalidSwarmSize(usize),
    /// The objective failed at some position. This is never retried.
    #[error("objective evaluation failed: {0}")]
    ObjectiveEvaluation(E),
    /// A configuration value is out of range. Builders panic on such values, so this is only
    /// reached by configurations which were deserialized or edited in place.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A summary was requested for a run which has not terminated.
    #[error("the run has not terminated")]
    NotTerminated,
    /// A vector or batch result did not have the expected length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The expected length
        expected: usize,
        /// The length which was found
        found: usize,
    },
}

impl<E> SwarmError<E> {
    pub(crate) fn check_dimension(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}
