// src/io/grid.rs

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads cartesian grid points, three numbers per line.
///
/// Blank lines and everything after `#` are ignored; extra columns are not.
pub fn parse(path: &Path) -> io::Result<Vec<[f64; 3]>> {
    read(BufReader::new(File::open(path)?))
}

pub fn read<R: BufRead>(reader: R) -> io::Result<Vec<[f64; 3]>> {
    let mut points = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let values = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", lineno + 1, e)))?;

        match values.as_slice() {
            &[x, y, z] => points.push([x, y, z]),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: expected 3 coordinates, found {}", lineno + 1, other.len()),
                ));
            }
        }
    }

    Ok(points)
}
