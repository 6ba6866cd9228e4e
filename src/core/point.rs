use crate::{traits::Objective, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Describes a point in parameter space along with the objective value there, if known.
#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}
impl Point {
    /// Convert the [`Point`] into a position-value tuple. Unevaluated points report `+inf`.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        let fx = self.fx_or_inf();
        (self.x, fx)
    }
    /// The value used to rank the point. Unevaluated points and `NaN` evaluations rank as `+inf`,
    /// so they never count as an improvement.
    pub fn fitness(&self) -> Float {
        match self.fx {
            Some(fx) if !fx.is_nan() => fx,
            _ => Float::INFINITY,
        }
    }
    /// Whether the point is strictly better (lower) than `other`. Equal values, including `-0.0`
    /// against `+0.0`, are not an improvement.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness() < other.fitness()
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
    /// The evaluation of the point, or `+inf` if it has not been evaluated.
    pub fn fx_or_inf(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
    /// The dimension of the point.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Evaluate the given objective at the point's coordinate and set the `fx` value to the
    /// result. Points which already carry a value are not re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`Objective::evaluate`] for more
    /// information.
    pub fn evaluate<E>(&mut self, func: &dyn Objective<E>) -> Result<(), E> {
        if self.fx.is_none() {
            self.fx = Some(func.evaluate(&self.x)?);
        }
        Ok(())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {:?}", self.x.as_slice(), self.fx)
    }
}

impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_functions::Rosenbrock;
    use nalgebra::dvector;

    #[test]
    fn test_evaluate_sets_fx_once() {
        let f = Rosenbrock { n: 2 };
        let mut p = Point::from(vec![1.0, 1.0]);
        assert!(p.fx.is_none());
        assert_eq!(p.fx_or_inf(), Float::INFINITY);
        p.evaluate(&f).unwrap();
        assert_eq!(p.fx, Some(0.0));
        p.x[0] = 5.0;
        p.evaluate(&f).unwrap();
        assert_eq!(p.fx, Some(0.0));
    }

    #[test]
    fn test_is_better_than_is_strict() {
        let p1 = Point {
            x: dvector![1.0],
            fx: Some(1.0),
        };
        let p2 = Point {
            x: dvector![2.0],
            fx: Some(2.0),
        };
        let p3 = Point::from(vec![0.0]);
        assert!(p1.is_better_than(&p2));
        assert!(!p2.is_better_than(&p1));
        assert!(p2.is_better_than(&p3));
        assert!(!p3.is_better_than(&p3.clone()));
        assert!(!p1.is_better_than(&p1.clone()));
    }

    #[test]
    fn test_signed_zeros_are_equal() {
        let neg = Point {
            x: dvector![-0.5],
            fx: Some(-0.0),
        };
        let pos = Point {
            x: dvector![0.5],
            fx: Some(0.0),
        };
        assert!(!neg.is_better_than(&pos));
        assert!(!pos.is_better_than(&neg));
    }

    #[test]
    fn test_nan_never_ranks_better() {
        let zero: Float = 0.0;
        let runtime_nan = zero / zero;
        for nan in [runtime_nan, -runtime_nan, Float::NAN, -Float::NAN] {
            let p = Point {
                x: dvector![0.0],
                fx: Some(nan),
            };
            let finite = Point {
                x: dvector![0.0],
                fx: Some(1e300),
            };
            assert_eq!(p.fitness(), Float::INFINITY);
            assert!(!p.is_better_than(&finite));
            assert!(finite.is_better_than(&p));
            assert!(!p.is_better_than(&Point::from(vec![0.0])));
        }
    }

    #[test]
    fn test_set_position_resets_fx() {
        let mut p = Point {
            x: dvector![1.0],
            fx: Some(5.0),
        };
        p.set_position(dvector![2.0]);
        assert_eq!(p.x, dvector![2.0]);
        assert!(p.fx.is_none());
        let (x, fx) = p.destructure();
        assert_eq!(x, dvector![2.0]);
        assert_eq!(fx, Float::INFINITY);
    }
}
