//! Build an image from a data set
use super::{reconstruct, ImagingOptions};
use crate::error::{Error, Result};
use crate::model::Image;
use crate::parser::image::ImageFile;
use crate::region::TargetRegion;
use std::io::{stdout, Write};
use std::path::Path;
use time::OffsetDateTime;

/// Build the image of one slice and write it out
///
/// With an output path the image is saved as a binary image file,
/// otherwise one row per grid point is printed:
/// ```console
/// $ sai image <dataset> -v 0 > image.tsv
/// ```
pub fn image(path: &Path, options: &ImagingOptions, output: Option<&Path>) -> Result<()> {
    let (region, image) = reconstruct(path, options)?;

    match output {
        Some(output) => {
            let vertical = u32::try_from(options.vertical).map_err(|_| {
                Error::InvalidArgument(format!("vertical index {} is too large", options.vertical))
            })?;
            let file = ImageFile::new(&region, &image, vertical, OffsetDateTime::now_utc())?;
            file.save(output)?;
            log::info!("Wrote {} values to {}", image.len(), output.display());
        }
        None => {
            let mut writer = stdout().lock();
            write_rows(&mut writer, &region, &image)?;
        }
    };
    Ok(())
}

/// Write one tab separated `x y z re im` row per grid point
pub fn write_rows<W: Write>(writer: &mut W, region: &TargetRegion, image: &Image) -> Result<()> {
    for (p, v) in region.points().iter().zip(image.values()) {
        writeln!(writer, "{}\t{}\t{}\t{}\t{}", p.x, p.y, p.z, v.re, v.im)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Point;
    use num_complex::Complex32;

    #[test]
    fn test_write_rows() -> Result<()> {
        let region = TargetRegion::new(Point::new(0.0, 1.0, 0.0), Point::new(0.5, 1.0, 0.0), 0.5)?;
        let image = Image::from(vec![Complex32::new(1.0, -1.0), Complex32::new(0.25, 0.0)]);

        let mut out = Vec::new();
        write_rows(&mut out, &region, &image)?;
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0\t1\t0\t1\t-1\n0.5\t1\t0\t0.25\t0\n");
        Ok(())
    }
}
