use nalgebra::Point3;

/// Represents a single atom of a substrate slab or an adsorbate molecule.
///
/// The species label and the layer tag are fixed once the owning
/// [`Structure`](super::structure::Structure) has been built. Only the position
/// moves during optimization, and only the constraint layer toggles `frozen`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical species label, usually an element symbol (e.g. "Ag", "C").
    pub species: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Depth layer of a substrate atom, `1` being the topmost layer.
    /// Molecule atoms carry no tag.
    pub layer: Option<u32>,
    /// Whether the position is held fixed during optimization.
    pub frozen: bool,
}

impl Atom {
    /// Creates a new free, untagged atom.
    ///
    /// # Arguments
    ///
    /// * `species` - The species label of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(species: &str, position: Point3<f64>) -> Self {
        Self {
            species: species.to_string(),
            position,
            layer: None,
            frozen: false,
        }
    }

    /// Creates a new free atom tagged with its substrate layer.
    pub fn with_layer(species: &str, position: Point3<f64>, layer: u32) -> Self {
        Self {
            layer: Some(layer),
            ..Self::new(species, position)
        }
    }
}
