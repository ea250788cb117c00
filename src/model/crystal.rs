use crate::features::error::FeaturesError;
use crate::model::structure::Structure;
use crate::utils::linalg::cart_to_frac;
use serde::{Deserialize, Serialize};

/// Single-species periodic crystal in the form the feature kernel consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    /// Row i = cartesian components of lattice vector i
    pub cell: [[f64; 3]; 3],
    pub species: String,
    /// Fractional coordinates
    pub positions: Vec<[f64; 3]>,
}

impl Crystal {
    /// Extract one species from a structure.
    ///
    /// With `species = None` the structure must contain exactly one element.
    pub fn from_structure(structure: &Structure, species: Option<&str>) -> Result<Self, FeaturesError> {
        let present = structure.species();
        let species = match (species, present.as_slice()) {
            (_, []) => {
                return Err(FeaturesError::InvalidStructure("structure contains no atoms".to_string()));
            }
            (None, [only]) => only.to_string(),
            (None, many) => {
                return Err(FeaturesError::InvalidStructure(format!(
                    "only one species is supported, found {}; select one of them",
                    many.join(", ")
                )));
            }
            (Some(wanted), _) if present.contains(&wanted) => wanted.to_string(),
            (Some(wanted), _) => {
                return Err(FeaturesError::InvalidStructure(format!(
                    "species {} not present (have {})",
                    wanted,
                    present.join(", ")
                )));
            }
        };

        let positions = structure
            .atoms
            .iter()
            .filter(|a| a.element == species)
            .map(|a| {
                cart_to_frac(a.position, structure.lattice)
                    .ok_or_else(|| FeaturesError::InvalidStructure("lattice matrix is singular".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            cell: structure.lattice,
            species,
            positions,
        })
    }

    pub fn natoms(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::structure::Atom;

    fn atom(el: &str, position: [f64; 3]) -> Atom {
        Atom { element: el.to_string(), position }
    }

    fn rocksalt() -> Structure {
        Structure {
            lattice: [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]],
            atoms: vec![
                atom("Na", [0.0, 0.0, 0.0]),
                atom("Cl", [2.0, 2.0, 2.0]),
                atom("Na", [2.0, 2.0, 0.0]),
            ],
        }
    }

    #[test]
    fn test_single_species_needs_no_selection() {
        let s = Structure {
            lattice: [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]],
            atoms: vec![atom("Si", [2.5, 0.0, 1.25])],
        };
        let c = Crystal::from_structure(&s, None).unwrap();
        assert_eq!(c.species, "Si");
        assert_eq!(c.natoms(), 1);
        assert!((c.positions[0][0] - 0.5).abs() < 1e-12);
        assert!((c.positions[0][2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_species_requires_selection() {
        let err = Crystal::from_structure(&rocksalt(), None).unwrap_err();
        match err {
            FeaturesError::InvalidStructure(msg) => {
                assert!(msg.contains("Na"));
                assert!(msg.contains("Cl"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_select_species() {
        let c = Crystal::from_structure(&rocksalt(), Some("Na")).unwrap();
        assert_eq!(c.natoms(), 2);
        assert!((c.positions[1][0] - 0.5).abs() < 1e-12);
        assert!((c.positions[1][2]).abs() < 1e-12);
    }

    #[test]
    fn test_missing_species() {
        assert!(Crystal::from_structure(&rocksalt(), Some("K")).is_err());
    }

    #[test]
    fn test_empty_and_singular() {
        let empty = Structure { lattice: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]], atoms: vec![] };
        assert!(Crystal::from_structure(&empty, None).is_err());

        let flat = Structure {
            lattice: [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            atoms: vec![atom("C", [0.0, 0.0, 0.0])],
        };
        assert!(matches!(
            Crystal::from_structure(&flat, None),
            Err(FeaturesError::InvalidStructure(_))
        ));
    }
}
