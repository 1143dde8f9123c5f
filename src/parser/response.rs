//! Parsing per-sensor response tables
//!
//! Each line holds the real and imaginary part of one sample,
//! separated by whitespace:
//!
//! ```text
//! 0.0123 -0.0045
//! 0.0119 -0.0051
//! ```
use super::{pair, table_lines};
use crate::error::Result;
use num_complex::Complex32;
use std::io::BufRead;

/// Read every sample of a response table
///
/// `origin` names the table in error messages.
pub fn read<R: BufRead>(reader: R, origin: &str) -> Result<Vec<Complex32>> {
    let mut samples = Vec::new();
    for line in table_lines(reader) {
        let (n, text) = line?;
        let (re, im) = pair(origin, n, &text)?;
        samples.push(Complex32::new(re, im));
    }
    log::debug!("Read {} response samples from {}", samples.len(), origin);
    Ok(samples)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_read() {
        let data = "1.0 2.0\n\n-0.5\t1e-3\n";
        let samples = read(data.as_bytes(), "r").unwrap();
        assert_eq!(
            samples,
            vec![Complex32::new(1.0, 2.0), Complex32::new(-0.5, 1e-3)]
        );
    }

    #[test]
    fn test_empty() {
        assert!(read("".as_bytes(), "r").unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_number() {
        let data = "1.0 2.0\n1.0\n";
        match read(data.as_bytes(), "0-0.txt") {
            Err(Error::Parse { origin, line, .. }) => {
                assert_eq!(origin, "0-0.txt");
                assert_eq!(line, 2);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
