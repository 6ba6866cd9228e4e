use std::convert::Infallible;

use crate::{
    objectives::InequalityConstraints,
    traits::Objective,
    DVector, Float,
};

/// The weight of a tension/compression spring, a classic constrained engineering design problem.
///
/// The parameters are the wire diameter $`d`$, the mean coil diameter $`D`$ and the number of
/// active coils $`N`$:
///
/// ```math
/// f(d, D, N) = (N + 2) D d^2
/// ```
/// The design must satisfy four inequality constraints $`g_i \leq 0`$ (minimum deflection, shear
/// stress, surge frequency and outer diameter), see [`InequalityConstraints::constraints`]. The
/// usual search box is $`d \in [0.05, 2]`$, $`D \in [0.25, 1.3]`$, $`N \in [2, 15]`$, and the best
/// known feasible weight is about $`0.01267`$.
///
/// Wrap it in a [`Penalized`](crate::objectives::Penalized) objective to minimize it with a swarm.
pub struct SpringWeight;

impl Objective for SpringWeight {
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
        let (d, dd, n) = (x[0], x[1], x[2]);
        Ok((n + 2.0) * dd * d.powi(2))
    }
}

impl InequalityConstraints for SpringWeight {
    #[allow(clippy::suboptimal_flops)]
    fn constraints(&self, x: &DVector<Float>) -> Vec<Float> {
        let (d, dd, n) = (x[0], x[1], x[2]);
        vec![
            1.0 - dd.powi(3) * n / (71785.0 * d.powi(4)),
            (4.0 * dd.powi(2) - d * dd) / (12566.0 * (dd * d.powi(3) - d.powi(4)))
                + 1.0 / (5108.0 * d.powi(2))
                - 1.0,
            1.0 - 140.45 * d / (dd.powi(2) * n),
            (d + dd) / 1.5 - 1.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_spring_weight() {
        let x = dvector![0.051689, 0.356718, 11.288966];
        assert_relative_eq!(SpringWeight.evaluate(&x).unwrap(), 0.012665, epsilon = 1e-5);
        let g = SpringWeight.constraints(&x);
        assert_eq!(g.len(), 4);
        for gi in g {
            assert!(gi <= 1e-4);
        }
        let g = SpringWeight.constraints(&dvector![1.0, 1.0, 2.0]);
        assert!(g[3] > 0.0);
    }
}
