use crate::model::{Atom, Structure};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lattice used when the comment line carries no `Lattice="..."` entry
pub const DEFAULT_BOX: [[f64; 3]; 3] = [[20.0, 0.0, 0.0], [0.0, 20.0, 0.0], [0.0, 0.0, 20.0]];

pub fn parse(path: &Path) -> io::Result<Structure> {
    read(BufReader::new(File::open(path)?))
}

pub fn read<R: BufRead>(reader: R) -> io::Result<Structure> {
    let mut lines = reader.lines();

    // 1. Number of Atoms
    let n_atoms_str = lines.next().ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Empty XYZ file"))??;
    let n_atoms: usize = n_atoms_str.trim().parse().map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Invalid atom count"))?;

    // 2. Comment line, extended XYZ keeps the cell here
    let comment = lines.next().unwrap_or(Ok(String::new()))?;
    let lattice = extended_lattice(&comment).unwrap_or(DEFAULT_BOX);

    // 3. Atoms
    let mut atoms = Vec::with_capacity(n_atoms);
    for line in lines.take(n_atoms) {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, format!("Short atom line: '{}'", line)));
        }

        let mut position = [0.0; 3];
        for (k, x) in position.iter_mut().enumerate() {
            *x = parts[k + 1]
                .parse()
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid coordinate '{}'", parts[k + 1])))?;
        }

        atoms.push(Atom { element: parts[0].to_string(), position });
    }

    if atoms.len() != n_atoms {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Expected {} atoms, found {}", n_atoms, atoms.len()),
        ));
    }

    Ok(Structure { lattice, atoms })
}

/// Format: `Lattice="ax ay az bx by bz cx cy cz"`
fn extended_lattice(comment: &str) -> Option<[[f64; 3]; 3]> {
    let start = comment.find("Lattice=\"")?;
    let remainder = &comment[start + 9..];
    let end = remainder.find('"')?;

    let parts: Vec<f64> = remainder[..end]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();

    if parts.len() != 9 {
        return None;
    }
    Some([
        [parts[0], parts[1], parts[2]],
        [parts[3], parts[4], parts[5]],
        [parts[6], parts[7], parts[8]],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_extended_lattice() {
        let text = "2\nLattice=\"3.0 0.0 0.0 0.0 3.0 0.0 0.0 0.0 4.0\" Properties=species:S:1:pos:R:3\nFe 0 0 0\nFe 1.5 1.5 2.0\n";
        let s = read(Cursor::new(text)).unwrap();
        assert_eq!(s.lattice[2][2], 4.0);
        assert_eq!(s.atoms.len(), 2);
        assert_eq!(s.atoms[1].position, [1.5, 1.5, 2.0]);
    }

    #[test]
    fn test_plain_xyz_uses_default_box() {
        let text = "1\nwater fragment\nO 0.0 0.0 0.0\n";
        let s = read(Cursor::new(text)).unwrap();
        assert_eq!(s.lattice, DEFAULT_BOX);
    }

    #[test]
    fn test_atom_count_mismatch() {
        let text = "3\n\nC 0 0 0\nC 1 0 0\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
