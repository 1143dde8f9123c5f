//! Parsing the shared sensor location table
//!
//! Row `i` holds the `x y` position of horizontal sensor `i`. The
//! vertical coordinate is not stored; it follows from the vertical index.
use super::{pair, table_lines};
use crate::error::Result;
use std::io::BufRead;

/// Read every row of a location table
pub fn read<R: BufRead>(reader: R, origin: &str) -> Result<Vec<(f32, f32)>> {
    let mut rows = Vec::new();
    for line in table_lines(reader) {
        let (n, text) = line?;
        rows.push(pair(origin, n, &text)?);
    }
    log::debug!("Read {} sensor locations from {}", rows.len(), origin);
    Ok(rows)
}
