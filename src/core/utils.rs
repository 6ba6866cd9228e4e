use crate::Float;
use fastrand::Rng;

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in the range `[lower, upper)` (or exactly `lower` if the range is
    /// empty)
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        lower + self.float() * (upper - lower)
    }
    /// Get a random value in the range `[0, 1)`
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}
