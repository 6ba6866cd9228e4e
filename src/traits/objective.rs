use std::convert::Infallible;

use crate::{DMatrix, DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$ to be minimized.
///
/// The `Objective` trait takes a generic `E` representing any possible errors that might be
/// returned during function execution. Any data the function needs (measurements, covariance
/// matrices, constants) should be stored in the implementing struct and passed in through its
/// constructor.
///
/// Objectives which can evaluate many positions more cheaply at once (vectorized code, external
/// worker pools) may override [`Objective::evaluate_batch`]. A batch evaluation must return
/// exactly the values that [`Objective::evaluate`] would return for each row.
pub trait Objective<E = Infallible> {
    /// The evaluation of the function at a point `x`.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, E>;

    /// The evaluation of the function at every row of `xs`, which has one row per position.
    ///
    /// The default implementation calls [`Objective::evaluate`] on each row in order.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation fails. See [`Objective::evaluate`] for more
    /// information.
    fn evaluate_batch(&self, xs: &DMatrix<Float>) -> Result<Vec<Float>, E> {
        xs.row_iter()
            .map(|row| self.evaluate(&row.transpose()))
            .collect()
    }
}
