//! Converting images to the Avro format
use super::{reconstruct, ImagingOptions};
use crate::error::{Error, Result};
use crate::model::Image;
use crate::region::TargetRegion;
use apache_avro::{Schema, Writer};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use time::OffsetDateTime;

const RAW_SCHEMA: &str = r#"{"type": "record","namespace": "sai","name": "pixel","fields": [{"name": "timestamp", "type": "long"},{"name": "vertical", "type": "int"},{"name": "x", "type": "float"},{"name": "y", "type": "float"},{"name": "z", "type": "float"},{"name": "re", "type": "float"},{"name": "im", "type": "float"}]}"#;

/// One grid point of an image
#[derive(Debug, Serialize)]
struct Pixel {
    #[serde(with = "time::serde::timestamp")]
    timestamp: OffsetDateTime,
    vertical: i32,
    x: f32,
    y: f32,
    z: f32,
    re: f32,
    im: f32,
}

/// Build the image of one slice and write it to an Avro file
///
/// Every grid point becomes one record.
/// This is meant to be used from the command line interface:
/// ```console
/// $ sai avro <dataset> <output>
/// ```
pub fn avro(path: &Path, output: &Path, options: &ImagingOptions) -> Result<()> {
    let (region, image) = reconstruct(path, options)?;
    let vertical = i32::try_from(options.vertical).map_err(|_| {
        Error::InvalidArgument(format!("vertical index {} is too large", options.vertical))
    })?;

    let g = std::fs::File::create(output)?;
    let n = write_pixels(g, &region, &image, vertical, OffsetDateTime::now_utc())?;
    log::info!("Wrote {} bytes of Avro to {}", n, output.display());
    Ok(())
}

/// Write one Avro record per grid point and return the bytes written
pub fn write_pixels<W: Write>(
    writer: W,
    region: &TargetRegion,
    image: &Image,
    vertical: i32,
    timestamp: OffsetDateTime,
) -> Result<usize> {
    if image.len() != region.len() {
        return Err(Error::DataContractViolation(format!(
            "image has {} values but the region has {} points",
            image.len(),
            region.len()
        )));
    }
    let pixel_schema = Schema::parse_str(RAW_SCHEMA)?;
    let mut writer = Writer::new(&pixel_schema, writer);

    let pixels = region
        .points()
        .iter()
        .zip(image.values())
        .map(|(p, v)| Pixel {
            timestamp,
            vertical,
            x: p.x,
            y: p.y,
            z: p.z,
            re: v.re,
            im: v.im,
        });

    let mut n = writer.extend_ser(pixels)?;
    n += writer.flush()?;
    Ok(n)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Point;
    use apache_avro::types::Value;
    use apache_avro::Reader;
    use num_complex::Complex32;

    #[test]
    fn test_write_pixels() -> Result<()> {
        let region = TargetRegion::new(Point::new(0.0, 1.0, 0.0), Point::new(0.5, 1.5, 0.0), 0.5)?;
        let image = Image::from(
            (0..region.len())
                .map(|i| Complex32::new(i as f32, 0.5))
                .collect::<Vec<_>>(),
        );

        let mut buf = Vec::new();
        let n = write_pixels(&mut buf, &region, &image, 7, OffsetDateTime::UNIX_EPOCH)?;
        assert!(n > 0);

        let records = Reader::new(&buf[..])?.collect::<std::result::Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 4);

        match &records[3] {
            Value::Record(fields) => {
                assert!(fields.contains(&("vertical".to_string(), Value::Int(7))));
                assert!(fields.contains(&("x".to_string(), Value::Float(0.5))));
                assert!(fields.contains(&("y".to_string(), Value::Float(1.5))));
                assert!(fields.contains(&("re".to_string(), Value::Float(3.0))));
                assert!(fields.contains(&("timestamp".to_string(), Value::Long(0))));
            }
            other => panic!("expected a record, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_size_mismatch() {
        let region = TargetRegion::new(Point::new(0.0, 0.0, 0.0), Point::new(0.0, 0.0, 0.0), 1.0).unwrap();
        let res = write_pixels(Vec::new(), &region, &Image::zeros(2), 0, OffsetDateTime::UNIX_EPOCH);
        assert!(matches!(res, Err(Error::DataContractViolation(_))));
    }
}
