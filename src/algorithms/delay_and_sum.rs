//! Delay-and-sum beamforming
//!
//! Each recorded sensor location is treated as a transmit/receive pair
//! straddling it along x at `±aperture_half_spacing`. For a grid point
//! whose round-trip path through the pair is `d`, frequency bin `i` of
//! the sensor contributes
//!
//! ```text
//! response[i] * exp(-j * frequency[i] * 2π * d / propagation_constant)
//! ```
//!
//! and the image value is the plain sum of these contributions over all
//! sensors and bins. There is no weighting or normalization.
use super::ImagingAlgorithm;
use crate::config::Config;
use crate::model::{Image, Measurement, Point};
use crate::region::TargetRegion;
use num_complex::Complex32;
use rayon::prelude::*;
use std::f32::consts::PI;
use std::time::Instant;

/// The sequential delay-and-sum beamformer
///
/// Sensors are visited in order, then the bins of each sensor, then the
/// grid points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayAndSum {
    /// Half the spacing of the virtual transmit/receive pair
    pub aperture_half_spacing: f32,
    /// Propagation speed in the units of locations and frequencies
    pub propagation_constant: f32,
}

impl Default for DelayAndSum {
    fn default() -> Self {
        DelayAndSum::from_config(&Config::default())
    }
}

impl DelayAndSum {
    /// Create a beamformer with the given aperture and propagation speed
    pub fn new(aperture_half_spacing: f32, propagation_constant: f32) -> Self {
        DelayAndSum {
            aperture_half_spacing,
            propagation_constant,
        }
    }

    /// Create a beamformer from the parameters of a configuration
    pub fn from_config(config: &Config) -> Self {
        DelayAndSum::new(config.aperture_half_spacing, config.propagation_constant)
    }

    /// Add the contribution of every measurement to the values of `points`
    fn accumulate(&self, points: &[Point], measurements: &[Measurement], values: &mut [Complex32]) {
        debug_assert_eq!(points.len(), values.len());
        // round-trip path length per point, reused across bins
        let mut path = vec![0.0f32; points.len()];

        for m in measurements {
            let tx = m.location().offset_negative(self.aperture_half_spacing);
            let rx = m.location().offset_positive(self.aperture_half_spacing);
            for (d, p) in path.iter_mut().zip(points) {
                *d = tx.distance_to(p) + rx.distance_to(p);
            }

            for (response, frequency) in m.samples() {
                for (value, &d) in values.iter_mut().zip(&path) {
                    let phase = frequency * 2.0 * PI * d / self.propagation_constant;
                    *value += response * Complex32::cis(-phase);
                }
            }
        }
    }
}

impl ImagingAlgorithm for DelayAndSum {
    fn create_image(&self, region: &TargetRegion, measurements: &[Measurement]) -> Image {
        let start = Instant::now();
        let mut image = Image::zeros(region.len());
        self.accumulate(region.points(), measurements, image.values_mut());
        log::debug!(
            "Delay-and-sum over {} points and {} sensors took {:?}",
            region.len(),
            measurements.len(),
            start.elapsed()
        );
        image
    }
}

/// Delay-and-sum with the grid split across threads
///
/// The points are cut into chunks of `chunk_size` and each chunk is
/// accumulated on a rayon worker into its own slice of the output. Every
/// point still sees sensors and bins in the same order as with
/// [`DelayAndSum`], so both produce the same image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelDelayAndSum {
    kernel: DelayAndSum,
    chunk_size: usize,
}

impl ParallelDelayAndSum {
    /// The number of points handled by one task unless set otherwise
    pub const DEFAULT_CHUNK_SIZE: usize = 256;

    /// Parallelize a delay-and-sum beamformer
    pub fn new(kernel: DelayAndSum) -> Self {
        ParallelDelayAndSum {
            kernel,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the number of points per task (at least one)
    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        ParallelDelayAndSum {
            chunk_size: chunk_size.max(1),
            ..self
        }
    }

    /// The underlying beamformer parameters
    pub fn kernel(&self) -> &DelayAndSum {
        &self.kernel
    }
}

impl Default for ParallelDelayAndSum {
    fn default() -> Self {
        ParallelDelayAndSum::new(DelayAndSum::default())
    }
}

impl ImagingAlgorithm for ParallelDelayAndSum {
    fn create_image(&self, region: &TargetRegion, measurements: &[Measurement]) -> Image {
        let start = Instant::now();
        let mut image = Image::zeros(region.len());
        image
            .values_mut()
            .par_chunks_mut(self.chunk_size)
            .zip(region.points().par_chunks(self.chunk_size))
            .for_each(|(values, points)| self.kernel.accumulate(points, measurements, values));
        log::debug!(
            "Parallel delay-and-sum over {} points and {} sensors took {:?}",
            region.len(),
            measurements.len(),
            start.elapsed()
        );
        image
    }
}
