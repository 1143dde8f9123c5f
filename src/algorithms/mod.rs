//! Algorithms for image reconstruction
use crate::model::{Image, Measurement};
use crate::region::TargetRegion;

pub mod delay_and_sum;

pub use delay_and_sum::{DelayAndSum, ParallelDelayAndSum};

/// A strategy that turns a set of measurements into an image
///
/// Strategies only see the grid and the measurements, so new ones
/// (time reversal, matched filtering, ...) can be added without
/// touching either type.
pub trait ImagingAlgorithm {
    /// Compute one value per point of `region`
    ///
    /// The returned image is ordered like [`TargetRegion::points`].
    /// Every element of `measurements` contributes. Checking that it
    /// holds the expected number of sensors is the caller's job (see
    /// [`crate::reconstructor::ImageReconstructor`]).
    fn create_image(&self, region: &TargetRegion, measurements: &[Measurement]) -> Image;
}
