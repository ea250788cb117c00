// src/io/poscar.rs

use crate::model::{Atom, Structure};
use crate::utils::linalg::frac_to_cart;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn parse_f64(token: Option<&str>, what: &str) -> io::Result<f64> {
    token
        .ok_or_else(|| invalid(format!("Missing {}", what)))?
        .parse()
        .map_err(|_| invalid(format!("Invalid {}", what)))
}

pub fn parse(path: &Path) -> io::Result<Structure> {
    read(BufReader::new(File::open(path)?))
}

pub fn read<R: BufRead>(reader: R) -> io::Result<Structure> {
    let mut lines = reader.lines();
    let mut next_line = |what: &str| -> io::Result<String> {
        lines.next().ok_or_else(|| invalid(format!("Unexpected EOF: missing {}", what)))?
    };

    let _ = next_line("comment")?;

    // Negative scale is a target volume in VASP; only the plain factor is supported
    let scale = parse_f64(next_line("scale")?.split_whitespace().next(), "scale")?;
    if scale <= 0.0 {
        return Err(invalid(format!("Unsupported scale factor {}", scale)));
    }

    let mut lattice = [[0.0; 3]; 3];
    for vec in lattice.iter_mut() {
        let line = next_line("lattice vector")?;
        let mut parts = line.split_whitespace();
        for x in vec.iter_mut() {
            *x = parse_f64(parts.next(), "lattice line")? * scale;
        }
    }

    // VASP 5 writes element names before the counts, VASP 4 does not
    let line6 = next_line("element counts")?;
    let starts_alpha = line6.trim().chars().next().map_or(false, |c| c.is_alphabetic());
    let (element_names, counts_line) = if starts_alpha {
        let names: Vec<String> = line6.split_whitespace().map(str::to_string).collect();
        (names, next_line("element counts")?)
    } else {
        (Vec::new(), line6)
    };

    let counts = counts_line
        .split_whitespace()
        .map(|x| x.parse::<usize>().map_err(|_| invalid(format!("Invalid atom count '{}'", x))))
        .collect::<io::Result<Vec<usize>>>()?;

    let mut mode_line = next_line("coordinate mode")?;
    if mode_line.trim_start().to_lowercase().starts_with('s') {
        // Selective dynamics
        mode_line = next_line("coordinate mode")?;
    }
    let is_direct = mode_line.trim_start().to_lowercase().starts_with('d');

    let mut atoms = Vec::new();
    for (elem_idx, &count) in counts.iter().enumerate() {
        let element = element_names
            .get(elem_idx)
            .cloned()
            .unwrap_or_else(|| format!("X{}", elem_idx + 1));

        for _ in 0..count {
            let line = next_line("atom position")?;
            let mut parts = line.split_whitespace();
            let mut p = [0.0; 3];
            for x in p.iter_mut() {
                *x = parse_f64(parts.next(), "atom position")?;
            }

            let position = if is_direct {
                frac_to_cart(p, lattice)
            } else {
                [p[0] * scale, p[1] * scale, p[2] * scale]
            };
            atoms.push(Atom { element: element.clone(), position });
        }
    }

    Ok(Structure { lattice, atoms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SI_DIRECT: &str = "Si diamond
2.0
 2.5 0.0 0.0
 0.0 2.5 0.0
 0.0 0.0 2.5
Si
2
Direct
 0.0 0.0 0.0
 0.25 0.25 0.25
";

    #[test]
    fn test_direct_coordinates_scaled() {
        let s = read(Cursor::new(SI_DIRECT)).unwrap();
        assert_eq!(s.lattice[0][0], 5.0);
        assert_eq!(s.atoms.len(), 2);
        assert_eq!(s.atoms[1].element, "Si");
        assert!((s.atoms[1].position[2] - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_cartesian_vasp4_without_names() {
        let text = "old style
1.0
 3.0 0.0 0.0
 0.0 3.0 0.0
 0.0 0.0 3.0
1 1
Selective dynamics
Cartesian
 0.0 0.0 0.0 T T T
 1.5 1.5 1.5 F F F
";
        let s = read(Cursor::new(text)).unwrap();
        assert_eq!(s.species(), vec!["X1", "X2"]);
        assert_eq!(s.atoms[1].position, [1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_truncated_file() {
        let text = "cut\n1.0\n 1 0 0\n 0 1 0\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_bad_number() {
        let text = SI_DIRECT.replace("0.25 0.25 0.25", "0.25 abc 0.25");
        let err = read(Cursor::new(text)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
