use std::convert::Infallible;

use crate::{traits::Objective, DMatrix, DVector, Float};

/// The sphere function, a convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Sphere {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl Objective for Sphere {
    fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
        Ok(sum_of_squares(x.iter().take(self.n)))
    }
    fn evaluate_batch(&self, xs: &DMatrix<Float>) -> Result<Vec<Float>, Infallible> {
        Ok(xs
            .row_iter()
            .map(|row| sum_of_squares(row.iter().take(self.n)))
            .collect())
    }
}

fn sum_of_squares<'a, I: Iterator<Item = &'a Float>>(values: I) -> Float {
    values.map(|v| v * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn test_sphere() {
        let f = Sphere { n: 2 };
        assert_eq!(f.evaluate(&dvector![3.0, 4.0]).unwrap(), 25.0);
        assert_eq!(
            f.evaluate_batch(&dmatrix![3.0, 4.0; 0.0, 1.0]).unwrap(),
            vec![25.0, 1.0]
        );
    }
}
