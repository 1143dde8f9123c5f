//! Discretization of the imaging volume
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Point;

/// Fraction of a cell by which the last point on an axis may overshoot
/// the far corner and still be generated
const BOUNDARY_TOLERANCE: f64 = 1e-4;

/// The number of whole cells along each axis of a [`TargetRegion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Cells along x
    pub width: u32,
    /// Cells along y
    pub height: u32,
    /// Cells along z (zero for a planar region)
    pub depth: u32,
}

/// A regular grid of points covering a box
///
/// Points run from `corner1` to `corner2` in steps of the cell size,
/// x outermost and z innermost. Both corners are included: a region
/// with `width` cells along x has `width + 1` distinct x values. When
/// the corners share a z coordinate the grid is a single plane.
///
/// ```
/// # use sai::model::Point;
/// # use sai::region::TargetRegion;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let region = TargetRegion::new(Point::new(0.0, 2.0, 0.0), Point::new(2.0, 8.0, 0.0), 0.05)?;
/// assert_eq!(region.len(), 41 * 121);
/// assert!(region.is_planar());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRegion {
    corner1: Point,
    corner2: Point,
    cell_size: f32,
    dimensions: Dimensions,
    points: Vec<Point>,
}

impl TargetRegion {
    /// Generate the grid between two corners
    ///
    /// The corners may be given in any order on any axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the cell size is not a
    /// positive number or a corner coordinate is not finite.
    pub fn new(corner1: Point, corner2: Point, cell_size: f32) -> Result<Self> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }
        if !corner1.is_finite() || !corner2.is_finite() {
            return Err(Error::InvalidArgument(
                "region corners must be finite".to_string(),
            ));
        }

        let lo = Point::new(
            corner1.x.min(corner2.x),
            corner1.y.min(corner2.y),
            corner1.z.min(corner2.z),
        );
        let hi = Point::new(
            corner1.x.max(corner2.x),
            corner1.y.max(corner2.y),
            corner1.z.max(corner2.z),
        );

        let xs = axis(lo.x, hi.x, cell_size);
        let ys = axis(lo.y, hi.y, cell_size);
        let zs = axis(lo.z, hi.z, cell_size);

        let dimensions = Dimensions {
            width: cells(&xs)?,
            height: cells(&ys)?,
            depth: cells(&zs)?,
        };

        let mut points = Vec::with_capacity(xs.len() * ys.len() * zs.len());
        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    log::trace!("Grid point {x} {y} {z}");
                    points.push(Point::new(x, y, z));
                }
            }
        }

        log::debug!(
            "Generated {} grid points ({}x{}x{} cells of {})",
            points.len(),
            dimensions.width,
            dimensions.height,
            dimensions.depth,
            cell_size
        );

        Ok(TargetRegion {
            corner1: lo,
            corner2: hi,
            cell_size,
            dimensions,
            points,
        })
    }

    /// Generate the grid described by a configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        TargetRegion::new(config.corner1, config.corner2, config.cell_size)
    }

    /// The grid points in generation order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of grid points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of cells along each axis
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The edge length of a cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The normalized corners, smallest first
    pub fn corners(&self) -> (Point, Point) {
        (self.corner1, self.corner2)
    }

    /// Whether the grid is a single z plane
    pub fn is_planar(&self) -> bool {
        self.corner1.z == self.corner2.z
    }
}

// Values are computed from the step index in double precision so that
// the far corner is not lost to accumulated rounding.
fn axis(lo: f32, hi: f32, cell_size: f32) -> Vec<f32> {
    let (lo, hi, step) = (f64::from(lo), f64::from(hi), f64::from(cell_size));
    let epsilon = step * BOUNDARY_TOLERANCE;
    (0u64..)
        .map(|k| lo + k as f64 * step)
        .take_while(|v| hi - v >= -epsilon)
        .map(|v| v as f32)
        .collect()
}

fn cells(values: &[f32]) -> Result<u32> {
    u32::try_from(values.len() - 1).map_err(|_| {
        Error::InvalidArgument(format!("{} cells along one axis is too many", values.len() - 1))
    })
}
