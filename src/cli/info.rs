//! Print info about a data set

use super::load_config;
use crate::config::Config;
use crate::error::Result;
use crate::parser::{DirectorySource, MeasurementSource};
use crate::region::TargetRegion;
use std::collections::BTreeMap;
use std::fs::read_dir;
use std::path::Path;

/// A summary of the tables in a data set directory
#[derive(Debug, PartialEq)]
pub struct Summary {
    /// Number of response tables per vertical index
    pub slices: BTreeMap<usize, usize>,
    /// Number of entries in the frequency table
    pub frequency_count: usize,
    /// Smallest and largest frequency
    pub frequency_range: Option<(f32, f32)>,
    /// Number of rows in the location table
    pub location_count: usize,
}

impl Summary {
    /// Scan the data set directory
    pub fn collect(source: &DirectorySource) -> Result<Self> {
        let mut slices = BTreeMap::new();
        for entry in read_dir(source.root())? {
            let name = entry?.file_name();
            if let Some((_, vertical)) = name.to_str().and_then(response_indices) {
                *slices.entry(vertical).or_insert(0) += 1;
            }
        }

        let frequencies = source.frequencies(0)?;
        let frequency_range = frequencies.iter().fold(None, |range, &f| match range {
            None => Some((f, f)),
            Some((lo, hi)) => Some((f32::min(lo, f), f32::max(hi, f))),
        });

        Ok(Summary {
            slices,
            frequency_count: frequencies.len(),
            frequency_range,
            location_count: source.locations()?.len(),
        })
    }
}

/// Split a response table name `{horizontal}-{vertical}.txt` into its indices
fn response_indices(name: &str) -> Option<(usize, usize)> {
    let stem = name.strip_suffix(".txt")?;
    let (h, v) = stem.split_once('-')?;
    Some((h.parse().ok()?, v.parse().ok()?))
}

/// Print info about a data set
pub fn info(path: &Path, config: Option<&Path>) -> Result<()> {
    let config: Config = load_config(config)?;
    let source = DirectorySource::new(path, config.frequency_suffix_len);
    let summary = Summary::collect(&source)?;
    let region = TargetRegion::from_config(&config)?;
    let dims = region.dimensions();

    println!("Data set: {}", path.display());
    println!("Vertical slices:");
    for (vertical, count) in &summary.slices {
        println!(
            "\t{}: {} of {} sensors",
            vertical, count, config.horizontal_sensor_count
        );
    }
    match summary.frequency_range {
        Some((lo, hi)) => println!(
            "Frequencies: {} from {} to {}",
            summary.frequency_count, lo, hi
        ),
        None => println!("Frequencies: 0"),
    }
    println!("Sensor locations: {}", summary.location_count);
    println!(
        "Grid: {}x{}x{} cells of {}",
        dims.width,
        dims.height,
        dims.depth,
        region.cell_size()
    );
    println!("Grid points: {}", region.len());

    Ok(())
}
