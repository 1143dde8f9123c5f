//! The SAI data model
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::MeasurementSource;
use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// A point in space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Point {
    /// The horizontal (scanning) coordinate
    pub x: f32,
    /// The cross-track coordinate
    pub y: f32,
    /// The vertical coordinate
    pub z: f32,
}

impl Point {
    /// Create a new Point
    pub fn new(x: f32, y: f32, z: f32) -> Point {
        Point { x, y, z }
    }

    /// The Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// A copy of this point shifted by `delta` along x
    pub fn offset_positive(&self, delta: f32) -> Point {
        Point {
            x: self.x + delta,
            ..*self
        }
    }

    /// A copy of this point shifted by `-delta` along x
    pub fn offset_negative(&self, delta: f32) -> Point {
        Point {
            x: self.x - delta,
            ..*self
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The observation of one sensor at one horizontal/vertical position
///
/// A measurement owns its response and frequency buffers. They always
/// have the same length: sample `i` of the response was taken at
/// frequency `i`.
///
/// The default measurement is empty. [`Measurement::take`] moves the
/// content out of a measurement and leaves this empty value behind,
/// which is how a batch reload hands old buffers back to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    location: Point,
    response: Vec<Complex32>,
    frequencies: Vec<f32>,
}

impl Measurement {
    /// Create a measurement from already parsed data
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataContractViolation`] if the response and
    /// frequency buffers differ in length.
    pub fn new(location: Point, response: Vec<Complex32>, frequencies: Vec<f32>) -> Result<Self> {
        if response.len() != frequencies.len() {
            return Err(Error::DataContractViolation(format!(
                "{} response samples but {} frequencies",
                response.len(),
                frequencies.len()
            )));
        }
        Ok(Measurement {
            location,
            response,
            frequencies,
        })
    }

    /// Load the measurement at a horizontal/vertical index pair
    ///
    /// This reads the response table for the pair, the shared frequency
    /// table and the shared location table from `source`. When loading
    /// a whole slice prefer [`crate::reconstructor::ImageReconstructor::load`],
    /// which reads the shared tables only once.
    pub fn load<S>(source: &S, horizontal: usize, vertical: usize, config: &Config) -> Result<Self>
    where
        S: MeasurementSource + ?Sized,
    {
        let frequencies = source.frequencies(vertical)?;
        let locations = source.locations()?;
        let response = source.responses(horizontal, vertical)?;
        Measurement::assemble(horizontal, vertical, response, &frequencies, &locations, config)
    }

    /// Build a measurement from its response and the shared tables
    ///
    /// The location is row `horizontal` of `locations`, lifted to
    /// `z = vertical_gap * vertical`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataContractViolation`] when the location table
    /// has no row `horizontal` or when the frequency table does not have
    /// exactly one entry per response sample.
    pub fn assemble(
        horizontal: usize,
        vertical: usize,
        response: Vec<Complex32>,
        frequencies: &[f32],
        locations: &[(f32, f32)],
        config: &Config,
    ) -> Result<Self> {
        let (x, y) = *locations.get(horizontal).ok_or_else(|| {
            Error::DataContractViolation(format!(
                "location table has {} rows, no row for horizontal index {}",
                locations.len(),
                horizontal
            ))
        })?;
        if frequencies.len() != response.len() {
            return Err(Error::DataContractViolation(format!(
                "sensor {}-{} has {} response samples but the frequency table has {} entries",
                horizontal,
                vertical,
                response.len(),
                frequencies.len()
            )));
        }
        let location = Point::new(x, y, config.vertical_gap * vertical as f32);

        for (i, (s, f)) in response.iter().zip(frequencies).enumerate() {
            log::trace!("Sensor {horizontal}-{vertical} sample {i}: {s} at {f}");
        }
        log::debug!(
            "Loaded sensor {}-{} at ({}, {}, {}) with {} samples",
            horizontal,
            vertical,
            location.x,
            location.y,
            location.z,
            response.len()
        );

        Measurement::new(location, response, frequencies.to_vec())
    }

    /// The physical location of the sensor
    pub fn location(&self) -> Point {
        self.location
    }

    /// The complex response, one sample per frequency bin
    pub fn response(&self) -> &[Complex32] {
        &self.response
    }

    /// The frequency of each bin
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// The number of frequency bins
    pub fn len(&self) -> usize {
        self.response.len()
    }

    /// Whether the measurement holds no samples
    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    /// Iterate over `(response, frequency)` pairs
    pub fn samples(&self) -> impl Iterator<Item = (Complex32, f32)> + '_ {
        self.response
            .iter()
            .copied()
            .zip(self.frequencies.iter().copied())
    }

    /// Move the content out, leaving an empty measurement behind
    pub fn take(&mut self) -> Measurement {
        std::mem::take(self)
    }

    /// Install new content and return the displaced content
    pub fn replace(&mut self, other: Measurement) -> Measurement {
        std::mem::replace(self, other)
    }
}

/// A reconstructed image
///
/// One complex value per grid point, in the order of
/// [`crate::region::TargetRegion::points`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    values: Vec<Complex32>,
}

impl Image {
    /// An image of `len` zero values
    pub fn zeros(len: usize) -> Image {
        Image {
            values: vec![Complex32::new(0.0, 0.0); len],
        }
    }

    /// The complex values
    pub fn values(&self) -> &[Complex32] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Complex32] {
        &mut self.values
    }

    /// The number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the image holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The magnitude of every value
    pub fn magnitudes(&self) -> Vec<f32> {
        self.values.iter().map(|v| v.norm()).collect()
    }

    /// The index and magnitude of the strongest value
    pub fn peak(&self) -> Option<(usize, f32)> {
        self.values
            .iter()
            .map(|v| v.norm())
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Consume the image and return its values
    pub fn into_inner(self) -> Vec<Complex32> {
        self.values
    }
}

impl From<Vec<Complex32>> for Image {
    fn from(values: Vec<Complex32>) -> Self {
        Image { values }
    }
}
