use std::convert::Infallible;

use crate::{traits::Objective, DVector, Float};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock {
    /// The number of dimensions of the function (must be >= 2).
    pub n: usize,
}
impl Objective for Rosenbrock {
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok((0..(self.n - 1))
            .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_rosenbrock() {
        let f = Rosenbrock { n: 3 };
        assert_eq!(f.evaluate(&dvector![1.0, 1.0, 1.0]).unwrap(), 0.0);
        assert_eq!(f.evaluate(&dvector![0.0, 0.0, 0.0]).unwrap(), 2.0);
    }
}
