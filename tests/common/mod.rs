#![allow(dead_code)]
use num_complex::Complex32;
use sai::config::Config;
use sai::model::Point;
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// A point reflector that lies on the grid of [`config`]
pub const REFLECTOR: Point = Point {
    x: 0.5,
    y: 2.5,
    z: 0.0,
};

/// Ten sensors imaging a one by one square
pub fn config() -> Config {
    Config {
        horizontal_sensor_count: 10,
        corner1: Point::new(0.0, 2.0, 0.0),
        corner2: Point::new(1.0, 3.0, 0.0),
        ..Config::default()
    }
}

pub fn frequencies() -> Vec<f32> {
    (0..16).map(|i| 2.0e5 + 2.0e4 * i as f32).collect()
}

/// Write the echo of [`REFLECTOR`] as seen by every sensor of `verticals` slices
pub fn write_dataset(dir: &Path, config: &Config, verticals: usize) -> std::io::Result<()> {
    let freqs = frequencies();
    let freq_table: String = freqs.iter().map(|f| format!("{f} MHz\n")).collect();
    fs::write(dir.join("freq.txt"), freq_table)?;

    let locations: Vec<(f32, f32)> = (0..config.horizontal_sensor_count)
        .map(|h| (0.1 * h as f32, 0.0))
        .collect();
    let location_table: String = locations
        .iter()
        .map(|(x, y)| format!("{x} {y}\n"))
        .collect();
    fs::write(dir.join("locations.txt"), location_table)?;

    let a = config.aperture_half_spacing;
    for v in 0..verticals {
        for (h, &(x, y)) in locations.iter().enumerate() {
            let sensor = Point::new(x, y, config.vertical_gap * v as f32);
            let d = sensor.offset_negative(a).distance_to(&REFLECTOR)
                + sensor.offset_positive(a).distance_to(&REFLECTOR);
            let rows: String = freqs
                .iter()
                .map(|f| {
                    let r = Complex32::cis(f * 2.0 * PI * d / config.propagation_constant);
                    format!("{} {}\n", r.re, r.im)
                })
                .collect();
            fs::write(dir.join(format!("{h}-{v}.txt")), rows)?;
        }
    }
    Ok(())
}

pub fn write_config(path: &Path, config: &Config) -> std::io::Result<()> {
    fs::write(path, serde_json::to_string_pretty(config)?)
}
