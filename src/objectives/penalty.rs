use crate::{traits::Objective, DVector, Float};

/// A trait for problems with inequality constraints $`g_i(\vec{x}) \leq 0`$.
pub trait InequalityConstraints {
    /// The value of every constraint function at `x`. A constraint is violated when its value is
    /// positive.
    fn constraints(&self, x: &DVector<Float>) -> Vec<Float>;
}

/// An objective which adds a large penalty wherever any constraint of the wrapped problem is
/// violated.
///
/// ```math
/// F(\vec{x}) = f(\vec{x}) + \begin{cases} P \left(1 + \sum_i \max(g_i(\vec{x}), 0)\right) & \exists i: g_i(\vec{x}) > 0 \\ 0 & \text{otherwise} \end{cases}
/// ```
/// Any infeasible position therefore scores at least $`P`$ worse than it would without the
/// constraints, while less severe violations still score better than worse ones.
pub struct Penalized<O> {
    objective: O,
    penalty: Float,
}

impl<O> Penalized<O> {
    /// Wrap `objective` with a penalty of size `penalty`.
    ///
    /// # Panics
    ///
    /// This method will panic if `penalty` is negative.
    pub fn new(objective: O, penalty: Float) -> Self {
        assert!(penalty >= 0.0);
        Self { objective, penalty }
    }
    /// The wrapped objective.
    pub const fn inner(&self) -> &O {
        &self.objective
    }
}

impl<O: InequalityConstraints> Penalized<O> {
    /// The summed violation of all constraints at `x` (zero for feasible positions).
    pub fn violation(&self, x: &DVector<Float>) -> Float {
        self.objective
            .constraints(x)
            .into_iter()
            .map(|g| g.max(0.0))
            .sum()
    }
    /// Whether every constraint is satisfied at `x`.
    pub fn is_feasible(&self, x: &DVector<Float>) -> bool {
        self.objective.constraints(x).into_iter().all(|g| g <= 0.0)
    }
}

impl<O, E> Objective<E> for Penalized<O>
where
    O: Objective<E> + InequalityConstraints,
{
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, E> {
        let fx = self.objective.evaluate(x)?;
        let violation = self.violation(x);
        if violation > 0.0 {
            Ok(fx + self.penalty * (1.0 + violation))
        } else {
            Ok(fx)
        }
    }
}
