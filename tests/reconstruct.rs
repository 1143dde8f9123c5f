mod common;

use approx::assert_relative_eq;
use num_complex::Complex32;
use sai::algorithms::{DelayAndSum, ParallelDelayAndSum};
use sai::config::Config;
use sai::model::Point;
use sai::parser::image::ImageFile;
use sai::parser::DirectorySource;
use sai::reconstructor::ImageReconstructor;
use sai::region::TargetRegion;
use std::fs;
use time::OffsetDateTime;

#[test]
fn image_peaks_at_reflector() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = common::config();
    common::write_dataset(dir.path(), &config, 1)?;

    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let algorithm = DelayAndSum::from_config(&config);
    let mut reconstructor =
        ImageReconstructor::load(TargetRegion::from_config(&config)?, 0, &source, &config)?;
    reconstructor.set_algorithm(&algorithm);
    reconstructor.build_image()?;

    let image = reconstructor.image().ok_or("no image")?;
    assert_eq!(image.len(), 21 * 21);

    // every sensor and bin adds up in phase at the reflector
    let (index, magnitude) = image.peak().ok_or("empty image")?;
    assert_eq!(reconstructor.region().points()[index], common::REFLECTOR);
    assert_relative_eq!(magnitude, 160.0, max_relative = 1e-3);

    Ok(())
}

#[test]
fn parallel_and_sequential_agree() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = common::config();
    common::write_dataset(dir.path(), &config, 2)?;

    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let sequential = DelayAndSum::from_config(&config);
    let parallel = ParallelDelayAndSum::new(sequential).with_chunk_size(50);

    let mut reconstructor =
        ImageReconstructor::load(TargetRegion::from_config(&config)?, 1, &source, &config)?;
    reconstructor.set_algorithm(&sequential);
    let a = reconstructor.build_image()?.clone();
    reconstructor.set_algorithm(&parallel);
    let b = reconstructor.build_image()?.clone();

    assert_eq!(a, b);
    Ok(())
}

#[test]
fn reload_hands_back_previous_slice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = common::config();
    common::write_dataset(dir.path(), &config, 2)?;

    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let mut reconstructor =
        ImageReconstructor::load(TargetRegion::from_config(&config)?, 0, &source, &config)?;
    let previous = reconstructor.load_slice(1, &source, &config)?;

    assert_eq!(previous.len(), 10);
    assert!(previous.iter().all(|m| m.location().z == 0.0));
    assert!(reconstructor
        .measurements()
        .iter()
        .all(|m| m.location().z == config.vertical_gap));
    Ok(())
}

#[test]
fn single_sensor_at_grid_point() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("0-0.txt"), "1 0\n")?;
    fs::write(dir.path().join("freq.txt"), "1000000 MHz\n")?;
    fs::write(dir.path().join("locations.txt"), "0.25 1\n")?;

    let location = Point::new(0.25, 1.0, 0.0);
    let config = Config {
        horizontal_sensor_count: 1,
        aperture_half_spacing: 0.0,
        corner1: location,
        corner2: location,
        ..Config::default()
    };
    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let algorithm = DelayAndSum::from_config(&config);
    let mut reconstructor =
        ImageReconstructor::load(TargetRegion::from_config(&config)?, 0, &source, &config)?;
    reconstructor.set_algorithm(&algorithm);

    let image = reconstructor.build_image()?;
    assert_eq!(image.values(), &[Complex32::new(1.0, 0.0)]);
    Ok(())
}

#[test]
fn missing_sensor_file_fails_the_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = common::config();
    common::write_dataset(dir.path(), &config, 1)?;
    fs::remove_file(dir.path().join("7-0.txt"))?;

    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let res = ImageReconstructor::load(TargetRegion::from_config(&config)?, 0, &source, &config);
    assert!(matches!(res, Err(sai::error::Error::Io(_))));
    Ok(())
}

#[test]
fn image_file_keeps_the_image() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = common::config();
    common::write_dataset(dir.path(), &config, 1)?;

    let source = DirectorySource::new(dir.path(), config.frequency_suffix_len);
    let algorithm = DelayAndSum::from_config(&config);
    let mut reconstructor =
        ImageReconstructor::load(TargetRegion::from_config(&config)?, 0, &source, &config)?;
    reconstructor.set_algorithm(&algorithm);
    let image = reconstructor.build_image()?.clone();

    let path = dir.path().join("slice.sai");
    let now = OffsetDateTime::now_utc();
    ImageFile::new(reconstructor.region(), &image, 0, now)?.save(&path)?;

    let file = ImageFile::open(&path)?;
    assert_eq!(file.image(), image);
    assert_eq!(file.dimensions(), reconstructor.region().dimensions());
    assert_eq!(file.origin(), Point::new(0.0, 2.0, 0.0));
    assert_eq!(file.timestamp()?.unix_timestamp(), now.unix_timestamp());
    Ok(())
}
