use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    /// Cartesian, Angstroms
    pub position: [f64; 3],
}

/// A parsed structure file, positions in cartesian coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<Atom>,
}

impl Structure {
    /// Distinct element labels in order of first appearance
    pub fn species(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for atom in &self.atoms {
            if !seen.contains(&atom.element.as_str()) {
                seen.push(&atom.element);
            }
        }
        seen
    }
}
