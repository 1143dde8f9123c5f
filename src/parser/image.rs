//! Reading and writing binary image files
//!
//! An image file is little-endian and starts with the magic bytes
//! `SAI\x01`, followed by a header describing the grid and then one
//! `(re, im)` pair of `f32` per grid point in grid order.
use crate::error::{Error, Result};
use crate::model::{Image, Point};
use crate::region::{Dimensions, TargetRegion};
use binrw::{binrw, BinRead, BinWrite};
use num_complex::Complex32;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use time::OffsetDateTime;

/// A reconstructed image together with the grid it was computed on
#[binrw]
#[brw(little, magic = b"SAI\x01")]
#[derive(Debug, PartialEq)]
pub struct ImageFile {
    timestamp: i64,
    vertical_index: u32,
    cell_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    width: u32,
    height: u32,
    depth: u32,
    #[br(temp, assert(
        u128::from(count) == (u128::from(width) + 1) * (u128::from(height) + 1) * (u128::from(depth) + 1)
    ))]
    #[bw(calc = samples.len() as u64)]
    count: u64,
    #[br(count = count as usize)]
    samples: Vec<Sample>,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    re: f32,
    im: f32,
}

impl ImageFile {
    /// Pair an image with the region it was computed on
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataContractViolation`] if the image does not
    /// have one value per grid point.
    pub fn new(
        region: &TargetRegion,
        image: &Image,
        vertical_index: u32,
        timestamp: OffsetDateTime,
    ) -> Result<Self> {
        if image.len() != region.len() {
            return Err(Error::DataContractViolation(format!(
                "image has {} values but the region has {} points",
                image.len(),
                region.len()
            )));
        }
        let (origin, _) = region.corners();
        let Dimensions {
            width,
            height,
            depth,
        } = region.dimensions();

        Ok(ImageFile {
            timestamp: timestamp.unix_timestamp(),
            vertical_index,
            cell_size: region.cell_size(),
            origin_x: origin.x,
            origin_y: origin.y,
            origin_z: origin.z,
            width,
            height,
            depth,
            samples: image
                .values()
                .iter()
                .map(|v| Sample { re: v.re, im: v.im })
                .collect(),
        })
    }

    /// Read an image file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = BufReader::new(std::fs::File::open(path)?);
        Ok(ImageFile::read(&mut reader)?)
    }

    /// Write the image file to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// The time at which the image was created
    pub fn timestamp(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.timestamp)
            .map_err(|e| Error::DataContractViolation(format!("invalid timestamp: {e}")))
    }

    /// The vertical slice the image was computed for
    pub fn vertical_index(&self) -> u32 {
        self.vertical_index
    }

    /// The edge length of a grid cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The smallest corner of the grid
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y, self.origin_z)
    }

    /// The number of cells along each axis
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    /// The image values
    pub fn image(&self) -> Image {
        Image::from(
            self.samples
                .iter()
                .map(|s| Complex32::new(s.re, s.im))
                .collect::<Vec<_>>(),
        )
    }
}
