use super::atom::Atom;
use super::structure::Structure;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("Shape mismatch: {species} species labels but {positions} positions")]
    ShapeMismatch { species: usize, positions: usize },

    #[error("Unknown species or species without a known lattice: '{0}'")]
    UnknownSpecies(String),

    #[error("Invalid dimension '{name}': must be at least 1")]
    InvalidDimension { name: &'static str },

    #[error("Invalid parameter '{name}': {value} (must be finite and non-negative)")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Builds a free, non-periodic molecule from parallel species and position lists.
///
/// # Errors
///
/// Returns [`BuildError::ShapeMismatch`] if the two lists differ in length. Nothing
/// is constructed in that case.
pub fn build_molecule<S: AsRef<str>>(
    species: &[S],
    positions: &[Point3<f64>],
) -> Result<Structure, BuildError> {
    if species.len() != positions.len() {
        return Err(BuildError::ShapeMismatch {
            species: species.len(),
            positions: positions.len(),
        });
    }
    let atoms = species
        .iter()
        .zip(positions)
        .map(|(s, p)| Atom::new(s.as_ref(), *p))
        .collect();
    Ok(Structure::from_atoms(atoms, None))
}

/// Molecules available by name without supplying coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoleculePreset {
    /// n-Butane, C4H10, in a planar zig-zag starting geometry.
    Butane,
}

impl MoleculePreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "butane" | "c4h10" => Some(Self::Butane),
            _ => None,
        }
    }

    pub fn build(self) -> Structure {
        match self {
            Self::Butane => {
                let species = [
                    "C", "C", "C", "C", "H", "H", "H", "H", "H", "H", "H", "H", "H", "H",
                ];
                let positions = [
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.54, 0.0, 0.0),
                    Point3::new(2.54, 1.54, 0.0),
                    Point3::new(4.08, 1.54, 0.0),
                    Point3::new(0.0, -0.78, -0.78),
                    Point3::new(0.0, 0.78, -0.78),
                    Point3::new(-0.78, 0.0, 0.78),
                    Point3::new(1.54, -0.78, -0.78),
                    Point3::new(1.54, 0.78, -0.78),
                    Point3::new(2.54, 2.32, -0.78),
                    Point3::new(2.54, 1.54, 0.78),
                    Point3::new(4.08, 2.32, -0.78),
                    Point3::new(4.08, 1.54, 0.78),
                    Point3::new(4.86, 1.54, 0.0),
                ];
                let atoms = species
                    .iter()
                    .zip(positions)
                    .map(|(s, p)| Atom::new(s, p))
                    .collect();
                Structure::from_atoms(atoms, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_molecule_creates_one_free_atom_per_species() {
        let molecule = build_molecule(
            &["C", "O"],
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.13, 0.0, 0.0)],
        )
        .unwrap();

        assert_eq!(molecule.len(), 2);
        assert!(molecule.cell().is_none());
        assert!(molecule.atoms().iter().all(|a| a.layer.is_none() && !a.frozen));
        assert_eq!(molecule.species().collect::<Vec<_>>(), vec!["C", "O"]);
    }

    #[test]
    fn build_molecule_rejects_more_species_than_positions() {
        let result = build_molecule(&["C", "O", "H"], &[Point3::origin(), Point3::origin()]);

        assert_eq!(
            result,
            Err(BuildError::ShapeMismatch {
                species: 3,
                positions: 2
            })
        );
    }

    #[test]
    fn build_molecule_rejects_more_positions_than_species() {
        let result = build_molecule(&["C"], &[Point3::origin(), Point3::origin()]);
        assert!(matches!(result, Err(BuildError::ShapeMismatch { .. })));
    }

    #[test]
    fn empty_input_builds_empty_molecule() {
        let molecule = build_molecule::<&str>(&[], &[]).unwrap();
        assert!(molecule.is_empty());
    }

    #[test]
    fn butane_preset_has_fourteen_atoms() {
        let butane = MoleculePreset::from_name("Butane").unwrap().build();

        assert_eq!(butane.len(), 14);
        assert_eq!(butane.formula(), "C4H10");
        assert!(MoleculePreset::from_name("propane").is_none());
    }
}
