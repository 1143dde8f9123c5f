//! Building an image from one vertical slice of measurements
use crate::algorithms::ImagingAlgorithm;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Image, Measurement};
use crate::parser::MeasurementSource;
use crate::region::TargetRegion;

/// Binds a region to the measurements of one vertical slice
///
/// The reconstructor owns its region, its measurements and the last
/// image it built. The algorithm is only borrowed, so one algorithm
/// value can serve many reconstructors.
///
/// ```
/// # use num_complex::Complex32;
/// # use sai::algorithms::DelayAndSum;
/// # use sai::config::Config;
/// # use sai::model::{Measurement, Point};
/// # use sai::reconstructor::ImageReconstructor;
/// # use sai::region::TargetRegion;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     horizontal_sensor_count: 1,
///     ..Config::default()
/// };
/// let region = TargetRegion::new(Point::new(0.0, 1.0, 0.0), Point::new(0.5, 1.5, 0.0), 0.05)?;
/// let sensor = Measurement::new(Point::default(), vec![Complex32::new(1.0, 0.0)], vec![1e6])?;
///
/// let algorithm = DelayAndSum::from_config(&config);
/// let mut reconstructor = ImageReconstructor::new(region, &config);
/// reconstructor.set_measurements(0, vec![sensor])?;
/// reconstructor.set_algorithm(&algorithm);
///
/// let image = reconstructor.build_image()?;
/// assert_eq!(image.len(), 11 * 11);
/// # Ok(()) }
/// ```
pub struct ImageReconstructor<'a> {
    region: TargetRegion,
    sensor_count: usize,
    vertical_index: usize,
    measurements: Vec<Measurement>,
    algorithm: Option<&'a dyn ImagingAlgorithm>,
    image: Option<Image>,
}

impl<'a> ImageReconstructor<'a> {
    /// Create a reconstructor with no measurements
    ///
    /// The configuration fixes how many sensors a slice must hold.
    pub fn new(region: TargetRegion, config: &Config) -> Self {
        ImageReconstructor {
            region,
            sensor_count: config.horizontal_sensor_count,
            vertical_index: 0,
            measurements: Vec::new(),
            algorithm: None,
            image: None,
        }
    }

    /// Create a reconstructor holding the slice at `vertical_index`
    ///
    /// One measurement is loaded for every horizontal index from zero to
    /// `config.horizontal_sensor_count`. The shared frequency and
    /// location tables are read once.
    pub fn load<S>(
        region: TargetRegion,
        vertical_index: usize,
        source: &S,
        config: &Config,
    ) -> Result<Self>
    where
        S: MeasurementSource + ?Sized,
    {
        let mut reconstructor = ImageReconstructor::new(region, config);
        reconstructor.load_slice(vertical_index, source, config)?;
        Ok(reconstructor)
    }

    /// Replace the held measurements with the slice at `vertical_index`
    ///
    /// Nothing is replaced if any measurement fails to load. The
    /// displaced measurements are returned.
    pub fn load_slice<S>(
        &mut self,
        vertical_index: usize,
        source: &S,
        config: &Config,
    ) -> Result<Vec<Measurement>>
    where
        S: MeasurementSource + ?Sized,
    {
        let frequencies = source.frequencies(vertical_index)?;
        let locations = source.locations()?;
        let measurements = (0..self.sensor_count)
            .map(|h| {
                let response = source.responses(h, vertical_index)?;
                Measurement::assemble(h, vertical_index, response, &frequencies, &locations, config)
            })
            .collect::<Result<Vec<_>>>()?;
        log::info!(
            "Loaded {} sensors for vertical index {}",
            measurements.len(),
            vertical_index
        );
        self.set_measurements(vertical_index, measurements)
    }

    /// Replace the held measurements and return the displaced ones
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataContractViolation`] if `measurements` does
    /// not hold exactly one entry per horizontal sensor. The held
    /// measurements are left untouched in that case.
    pub fn set_measurements(
        &mut self,
        vertical_index: usize,
        measurements: Vec<Measurement>,
    ) -> Result<Vec<Measurement>> {
        self.check_count(measurements.len())?;
        self.vertical_index = vertical_index;
        Ok(std::mem::replace(&mut self.measurements, measurements))
    }

    /// Select the algorithm used by [`ImageReconstructor::build_image`]
    pub fn set_algorithm(&mut self, algorithm: &'a dyn ImagingAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    /// Run the selected algorithm and keep the result
    ///
    /// Any previously built image is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlgorithmNotSelected`] if no algorithm was set
    /// and [`Error::DataContractViolation`] if the reconstructor does not
    /// hold a full slice of measurements.
    pub fn build_image(&mut self) -> Result<&Image> {
        let algorithm = self.algorithm.ok_or(Error::AlgorithmNotSelected)?;
        self.check_count(self.measurements.len())?;

        log::info!(
            "Building image of {} points from {} sensors",
            self.region.len(),
            self.measurements.len()
        );
        let image = algorithm.create_image(&self.region, &self.measurements);
        Ok(self.image.insert(image))
    }

    /// The region images are computed on
    pub fn region(&self) -> &TargetRegion {
        &self.region
    }

    /// The held measurements, ordered by horizontal index
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// The vertical index of the held measurements
    pub fn vertical_index(&self) -> usize {
        self.vertical_index
    }

    /// The last image built, if any
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Move the last image out of the reconstructor
    pub fn take_image(&mut self) -> Option<Image> {
        self.image.take()
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count == self.sensor_count {
            Ok(())
        } else {
            Err(Error::DataContractViolation(format!(
                "expected {} measurements, got {}",
                self.sensor_count, count
            )))
        }
    }
}
