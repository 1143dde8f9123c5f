//! Parsing the shared frequency table
//!
//! Each line is a number followed by a unit suffix of fixed width,
//! e.g. `1000000 MHz` with a four character suffix. The suffix is cut
//! off by position, so its width has to be known in advance.
use super::table_lines;
use crate::error::{Error, Result};
use std::io::BufRead;

/// Read every frequency of a frequency table
///
/// Trailing whitespace (including a carriage return) is dropped before
/// the last `suffix_len` characters are stripped.
pub fn read<R: BufRead>(reader: R, origin: &str, suffix_len: usize) -> Result<Vec<f32>> {
    let mut frequencies = Vec::new();
    for line in table_lines(reader) {
        let (n, text) = line?;
        frequencies.push(parse_line(origin, n, &text, suffix_len)?);
    }
    log::debug!("Read {} frequencies from {}", frequencies.len(), origin);
    Ok(frequencies)
}

fn parse_line(origin: &str, n: usize, text: &str, suffix_len: usize) -> Result<f32> {
    let text = text.trim_end();
    let chars = text.chars().count();
    if chars <= suffix_len {
        return Err(Error::parse(
            origin,
            n,
            format!("{text:?} is not longer than the {suffix_len} character unit suffix"),
        ));
    }
    let end = text
        .char_indices()
        .nth(chars - suffix_len)
        .map_or(text.len(), |(i, _)| i);
    let value = text[..end].trim();
    value
        .parse::<f32>()
        .map_err(|e| Error::parse(origin, n, format!("invalid frequency {value:?}: {e}")))
}
