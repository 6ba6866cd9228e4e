use crate::{core::utils::SampleFloat, DVector, Float};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};
use thiserror::Error;

/// The ways in which a set of [`Bounds`] can be malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// A lower limit is larger than its upper limit.
    #[error("lower bound {lower} exceeds upper bound {upper} in dimension {index}")]
    Inverted {
        /// The offending dimension
        index: usize,
        /// The lower limit given for that dimension
        lower: Float,
        /// The upper limit given for that dimension
        upper: Float,
    },
    /// A limit is infinite or NaN.
    #[error("bound ({lower}, {upper}) in dimension {index} is not finite")]
    NonFinite {
        /// The offending dimension
        index: usize,
        /// The lower limit given for that dimension
        lower: Float,
        /// The upper limit given for that dimension
        upper: Float,
    },
    /// The lower and upper sequences have different lengths.
    #[error("{lower} lower limits but {upper} upper limits were given")]
    LengthMismatch {
        /// The number of lower limits
        lower: usize,
        /// The number of upper limits
        upper: usize,
    },
    /// No dimensions were given.
    #[error("at least one dimension is required")]
    Empty,
}

/// A closed interval `[lower, upper]` which limits a single parameter.
///
/// Both limits are finite and `lower <= upper`. A bound where `lower == upper` pins the
/// parameter to a single value.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl TryFrom<(Float, Float)> for Bound {
    type Error = BoundsError;
    fn try_from(value: (Float, Float)) -> Result<Self, Self::Error> {
        Self::checked(0, value.0, value.1)
    }
}

impl Bound {
    /// Create a new [`Bound`].
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] if either limit is not finite or if `lower > upper`.
    pub fn new(lower: Float, upper: Float) -> Result<Self, BoundsError> {
        Self::checked(0, lower, upper)
    }
    fn checked(index: usize, lower: Float, upper: Float) -> Result<Self, BoundsError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(BoundsError::NonFinite {
                index,
                lower,
                upper,
            });
        }
        if lower > upper {
            return Err(BoundsError::Inverted {
                index,
                lower,
                upper,
            });
        }
        Ok(Self { lower, upper })
    }
    /// Returns the lower limit.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper limit.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// Returns `upper - lower`.
    pub fn width(&self) -> Float {
        self.upper - self.lower
    }
    /// Get a value in the uniform distribution between `lower` and `upper`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower, self.upper)
    }
    /// Checks whether the given `value` is compatible with the bound.
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Projects `value` onto the interval (saturating, not wrapping).
    pub fn clamp(&self, value: Float) -> Float {
        value.max(self.lower).min(self.upper)
    }
    /// Returns `0.0` if `value` lies inside the bound, and the signed distance to the violated
    /// limit otherwise (negative below `lower`, positive above `upper`).
    pub fn bound_excess(&self, value: Float) -> Float {
        if value < self.lower {
            value - self.lower
        } else if value > self.upper {
            value - self.upper
        } else {
            0.0
        }
    }
    /// Checks if the given value is equal to one of the limits.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
}

/// An ordered list of [`Bound`]s, one per dimension of the search space.
///
/// [`Bounds`] are validated when they are built and cannot be resized afterwards, so every
/// [`Bounds`] handed to an optimizer describes a non-empty, finite box.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Build [`Bounds`] from matching slices of lower and upper limits.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] if the slices differ in length, are empty, or contain a
    /// non-finite or inverted pair.
    pub fn new(lower: &[Float], upper: &[Float]) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        Self::from_pairs(lower.iter().copied().zip(upper.iter().copied()))
    }
    /// Build [`Bounds`] from `(lower, upper)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] if no pairs are given or any pair is non-finite or inverted.
    pub fn from_pairs<I: IntoIterator<Item = (Float, Float)>>(
        pairs: I,
    ) -> Result<Self, BoundsError> {
        let bounds = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (lower, upper))| Bound::checked(index, lower, upper))
            .collect::<Result<Vec<Bound>, BoundsError>>()?;
        if bounds.is_empty() {
            return Err(BoundsError::Empty);
        }
        Ok(Self(bounds))
    }
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// The number of dimensions.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    /// The Euclidean length of the diagonal of the box.
    pub fn diameter(&self) -> Float {
        self.0.iter().map(|b| b.width().powi(2)).sum::<Float>().sqrt()
    }
    /// Draw a position uniformly from the box.
    pub fn sample(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.0.len(), self.0.iter().map(|b| b.get_uniform(rng)))
    }
    /// Project every coordinate of `x` into its bound.
    pub fn clamp(&self, x: &DVector<Float>) -> DVector<Float> {
        DVector::from_iterator(
            x.len(),
            x.iter().zip(self.0.iter()).map(|(xi, b)| b.clamp(*xi)),
        )
    }
    /// Checks whether every coordinate of `x` lies within its bound.
    pub fn contains(&self, x: &DVector<Float>) -> bool {
        x.len() == self.0.len() && x.iter().zip(self.0.iter()).all(|(xi, b)| b.contains(*xi))
    }
    /// Returns the signed amount that each coordinate of `x` exceeds its bound.
    pub fn excess(&self, x: &DVector<Float>) -> DVector<Float> {
        DVector::from_iterator(
            x.len(),
            x.iter().zip(self.0.iter()).map(|(xi, b)| b.bound_excess(*xi)),
        )
    }
}

impl TryFrom<Vec<(Float, Float)>> for Bounds {
    type Error = BoundsError;
    fn try_from(value: Vec<(Float, Float)>) -> Result<Self, Self::Error> {
        Self::from_pairs(value)
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
