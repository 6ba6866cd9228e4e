use serde::{Deserialize, Serialize};

use crate::{traits::Objective, DMatrix, DVector, Float};

/// How a single dimension of the search space is interpreted by a [`Rounded`] objective.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariableKind {
    /// The coordinate is passed through unchanged
    #[default]
    Continuous,
    /// The coordinate is rounded to the nearest integer before evaluation
    Integer,
}

/// An objective which rounds integer-valued coordinates before handing them to the wrapped
/// objective. The swarm keeps moving through the continuous space.
///
/// Dimensions without a [`VariableKind`] are treated as [`VariableKind::Continuous`].
pub struct Rounded<O> {
    objective: O,
    kinds: Vec<VariableKind>,
}

impl<O> Rounded<O> {
    /// Wrap `objective`, interpreting dimension `i` according to `kinds[i]`.
    pub fn new<I: IntoIterator<Item = VariableKind>>(objective: O, kinds: I) -> Self {
        Self {
            objective,
            kinds: kinds.into_iter().collect(),
        }
    }
    /// The position the wrapped objective sees for `x`.
    pub fn apply(&self, x: &DVector<Float>) -> DVector<Float> {
        let mut out = x.clone();
        for (xi, kind) in out.iter_mut().zip(&self.kinds) {
            if matches!(kind, VariableKind::Integer) {
                *xi = xi.round();
            }
        }
        out
    }
}

impl<O, E> Objective<E> for Rounded<O>
where
    O: Objective<E>,
{
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, E> {
        self.objective.evaluate(&self.apply(x))
    }
    fn evaluate_batch(&self, xs: &DMatrix<Float>) -> Result<Vec<Float>, E> {
        let mut rounded = xs.clone();
        for (mut column, kind) in rounded.column_iter_mut().zip(&self.kinds) {
            if matches!(kind, VariableKind::Integer) {
                column.apply(|v| *v = v.round());
            }
        }
        self.objective.evaluate_batch(&rounded)
    }
}
