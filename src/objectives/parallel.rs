use rayon::prelude::*;

use crate::{traits::Objective, DMatrix, DVector, Float};

/// An objective which evaluates batches on the `rayon` thread pool.
///
/// Each row is still evaluated with the wrapped [`Objective::evaluate`] and the results are
/// collected in row order, so a swarm sees exactly the same values as with serial evaluation.
/// Enable it with [`Swarm::with_vectorized`](crate::algorithms::particles::Swarm::with_vectorized).
pub struct Parallel<O>(pub O);

impl<O, E> Objective<E> for Parallel<O>
where
    O: Objective<E> + Sync,
    E: Send,
{
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, E> {
        self.0.evaluate(x)
    }
    fn evaluate_batch(&self, xs: &DMatrix<Float>) -> Result<Vec<Float>, E> {
        (0..xs.nrows())
            .into_par_iter()
            .map(|i| self.0.evaluate(&xs.row(i).transpose()))
            .collect()
    }
}
