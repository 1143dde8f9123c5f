//! Readers for measurement tables and image files
//!
//! A data set is a directory holding one response table per sensor
//! (`{horizontal}-{vertical}.txt`), a shared frequency table
//! (`freq.txt`) and a shared location table (`locations.txt`).
use crate::error::{Error, Result};
use num_complex::Complex32;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub mod frequency;
pub mod image;
pub mod location;
pub mod response;

/// A provider of the three tables a [`crate::model::Measurement`] is built from
pub trait MeasurementSource {
    /// The response samples of one sensor
    fn responses(&self, horizontal: usize, vertical: usize) -> Result<Vec<Complex32>>;

    /// The frequency table shared by every sensor of a vertical slice
    fn frequencies(&self, vertical: usize) -> Result<Vec<f32>>;

    /// The `(x, y)` position of every horizontal sensor index
    fn locations(&self) -> Result<Vec<(f32, f32)>>;
}

/// A data set stored as text tables in one directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    suffix_len: usize,
}

impl DirectorySource {
    /// Use the tables in `root`
    ///
    /// `suffix_len` is the width of the unit suffix stripped from every
    /// line of the frequency table.
    pub fn new<P: AsRef<Path>>(root: P, suffix_len: usize) -> Self {
        DirectorySource {
            root: root.as_ref().to_path_buf(),
            suffix_len,
        }
    }

    /// The directory holding the tables
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the response table of one sensor
    pub fn response_path(&self, horizontal: usize, vertical: usize) -> PathBuf {
        self.root.join(format!("{horizontal}-{vertical}.txt"))
    }

    /// The path of the shared frequency table
    pub fn frequency_path(&self) -> PathBuf {
        self.root.join("freq.txt")
    }

    /// The path of the shared location table
    pub fn location_path(&self) -> PathBuf {
        self.root.join("locations.txt")
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

impl MeasurementSource for DirectorySource {
    fn responses(&self, horizontal: usize, vertical: usize) -> Result<Vec<Complex32>> {
        let path = self.response_path(horizontal, vertical);
        response::read(open(&path)?, &path.display().to_string())
    }

    // Every slice shares the same table on disk
    fn frequencies(&self, _vertical: usize) -> Result<Vec<f32>> {
        let path = self.frequency_path();
        frequency::read(open(&path)?, &path.display().to_string(), self.suffix_len)
    }

    fn locations(&self) -> Result<Vec<(f32, f32)>> {
        let path = self.location_path();
        location::read(open(&path)?, &path.display().to_string())
    }
}

/// Iterate over the non-blank lines of a table with 1-based line numbers
pub(crate) fn table_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = std::io::Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|res| match res {
            Ok((_, l)) => !l.trim().is_empty(),
            Err(_) => true,
        })
}

/// Parse exactly two whitespace separated numbers
pub(crate) fn pair(origin: &str, line: usize, text: &str) -> Result<(f32, f32)> {
    let mut fields = text.split_whitespace();
    let (a, b) = match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => {
            return Err(Error::parse(
                origin,
                line,
                format!("expected two numbers, found {text:?}"),
            ))
        }
    };
    let number = |s: &str| {
        s.parse::<f32>().map_err(|e| {
            Error::parse(origin, line, format!("invalid number {s:?}: {e}"))
        })
    };
    Ok((number(a)?, number(b)?))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::model::{Measurement, Point};
    use std::fs;

    fn write_dataset(dir: &Path) -> std::io::Result<()> {
        fs::write(dir.join("0-2.txt"), "1.0 0.0\n0.5 -0.5\n")?;
        fs::write(dir.join("1-2.txt"), "1.0 0.0\n")?;
        fs::write(dir.join("freq.txt"), "1000000 MHz\n2000000 MHz\n")?;
        fs::write(dir.join("locations.txt"), "0.0 0.0\n0.1 0.0\n")?;
        Ok(())
    }

    #[test]
    fn test_load_measurement() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_dataset(dir.path())?;
        let source = DirectorySource::new(dir.path(), 4);

        let m = Measurement::load(&source, 0, 2, &Config::default())?;
        assert_eq!(m.location(), Point::new(0.0, 0.0, 0.05 * 2.0));
        assert_eq!(m.response(), &[Complex32::new(1.0, 0.0), Complex32::new(0.5, -0.5)]);
        assert_eq!(m.frequencies(), &[1e6, 2e6]);
        Ok(())
    }

    #[test]
    fn test_count_mismatch() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_dataset(dir.path())?;
        let source = DirectorySource::new(dir.path(), 4);

        let res = Measurement::load(&source, 1, 2, &Config::default());
        assert!(matches!(res, Err(Error::DataContractViolation(_))));
        Ok(())
    }

    #[test]
    fn test_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_dataset(dir.path())?;
        let source = DirectorySource::new(dir.path(), 4);

        let res = Measurement::load(&source, 5, 2, &Config::default());
        assert!(matches!(res, Err(Error::Io(_))));
        Ok(())
    }

    #[test]
    fn test_pair() {
        assert_eq!(pair("t", 1, " 1.5\t-2 ").unwrap(), (1.5, -2.0));
        assert!(matches!(pair("t", 3, "1.5"), Err(Error::Parse { line: 3, .. })));
        assert!(matches!(pair("t", 4, "1 2 3"), Err(Error::Parse { line: 4, .. })));
        assert!(matches!(pair("t", 5, "1 x"), Err(Error::Parse { line: 5, .. })));
    }
}
