use crate::{traits::Objective, DVector, Float, PI};
use std::convert::Infallible;

/// The Rastrigin function, a non-convex function with a single minimum but many local minima.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^n (x_i^2 - 10cos(2\pi x_i))
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$ and is usually searched on
/// $`[-5.12, 5.12]^n`$.
pub struct Rastrigin {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl Objective for Rastrigin {
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok(10.0 * self.n as Float
            + (0..self.n)
                .map(|i| x[i].powi(2) - 10.0 * Float::cos(2.0 * PI * x[i]))
                .sum::<Float>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_rastrigin() {
        let f = Rastrigin { n: 2 };
        assert_relative_eq!(f.evaluate(&dvector![0.0, 0.0]).unwrap(), 0.0);
        assert_relative_eq!(f.evaluate(&dvector![1.0, 0.0]).unwrap(), 1.0, epsilon = 1e-12);
    }
}
