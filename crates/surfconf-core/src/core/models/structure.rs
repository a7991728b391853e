use super::atom::Atom;
use super::cell::Cell;
use nalgebra::{Point3, Rotation3, Vector3};

/// An ordered collection of atoms, optionally embedded in a periodic cell.
///
/// The number of atoms and their species are fixed at construction. Positions can
/// change afterwards, either through rigid transforms or through per-atom updates
/// issued by the optimizer. A clone owns its own atom storage, so mutating a copy
/// never leaks into the original.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
    cell: Option<Cell>,
}

impl Structure {
    /// Creates a structure from an atom list and an optional cell.
    ///
    /// Prefer [`build_molecule`](super::builder::build_molecule) or the slab builders
    /// in [`lattice`](crate::core::lattice) when assembling structures from raw data.
    pub fn from_atoms(atoms: Vec<Atom>, cell: Option<Cell>) -> Self {
        Self { atoms, cell }
    }

    /// Creates a new structure holding the atoms of `base` followed by `extra`.
    ///
    /// The cell of `base` is kept. Neither input is modified.
    pub fn concatenated<I>(base: &Structure, extra: I) -> Self
    where
        I: IntoIterator<Item = Atom>,
    {
        let mut atoms = base.atoms.clone();
        atoms.extend(extra);
        Self {
            atoms,
            cell: base.cell,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn cell(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.species.as_str())
    }

    pub fn layer_tags(&self) -> Vec<Option<u32>> {
        self.atoms.iter().map(|a| a.layer).collect()
    }

    pub fn free_atom_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.frozen)
            .map(|(i, _)| i)
            .collect()
    }

    /// Moves a single atom. The frozen flag is not consulted here; callers that
    /// honour constraints must skip frozen atoms themselves.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_position(&mut self, index: usize, position: Point3<f64>) {
        self.atoms[index].position = position;
    }

    pub(crate) fn set_frozen(&mut self, index: usize, frozen: bool) {
        self.atoms[index].frozen = frozen;
    }

    /// Rigidly translates every atom by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += *offset;
        }
    }

    /// Rigidly rotates every atom about `center`.
    pub fn rotate_about(&mut self, rotation: &Rotation3<f64>, center: &Point3<f64>) {
        for atom in &mut self.atoms {
            atom.position = center + rotation * (atom.position - center);
        }
    }

    /// Returns the unweighted geometric center, or `None` for an empty structure.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.atoms.iter().map(|a| a.position.coords).sum();
        Some(Point3::from(sum / self.atoms.len() as f64))
    }

    /// Returns the `(min, max)` coordinate along `axis` (0 = x, 1 = y, 2 = z).
    pub fn extent(&self, axis: usize) -> Option<(f64, f64)> {
        self.atoms.iter().map(|a| a.position[axis]).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
    }

    /// Returns the z coordinate of the topmost atom.
    pub fn top_z(&self) -> Option<f64> {
        self.extent(2).map(|(_, hi)| hi)
    }

    /// Returns a compact formula with species in order of first appearance, e.g. `Ag8C4H10`.
    pub fn formula(&self) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for species in self.species() {
            match counts.iter_mut().find(|(s, _)| *s == species) {
                Some((_, n)) => *n += 1,
                None => counts.push((species, 1)),
            }
        }
        counts
            .into_iter()
            .map(|(s, n)| if n == 1 { s.to_string() } else { format!("{s}{n}") })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn dimer() -> Structure {
        Structure::from_atoms(
            vec![
                Atom::new("C", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("O", Point3::new(1.0, 0.0, 0.0)),
            ],
            None,
        )
    }

    #[test]
    fn centroid_and_extent_of_dimer() {
        let s = dimer();

        let c = s.centroid().unwrap();
        assert!((c - Point3::new(0.5, 0.0, 0.0)).norm() < TOLERANCE);
        assert_eq!(s.extent(0), Some((0.0, 1.0)));
        assert_eq!(s.top_z(), Some(0.0));
    }

    #[test]
    fn empty_structure_has_no_centroid_or_extent() {
        let s = Structure::default();

        assert!(s.is_empty());
        assert!(s.centroid().is_none());
        assert!(s.extent(1).is_none());
    }

    #[test]
    fn clone_owns_independent_positions() {
        let original = dimer();
        let mut copy = original.clone();

        copy.set_position(0, Point3::new(5.0, 5.0, 5.0));

        assert_eq!(original.atoms()[0].position, Point3::origin());
        assert_eq!(copy.atoms()[0].position, Point3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn rotate_about_center_preserves_center() {
        let mut s = dimer();
        let center = s.centroid().unwrap();
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::PI);

        s.rotate_about(&rotation, &center);

        assert!((s.atoms()[0].position - Point3::new(1.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((s.atoms()[1].position - Point3::new(0.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((s.centroid().unwrap() - center).norm() < TOLERANCE);
    }

    #[test]
    fn concatenated_leaves_inputs_untouched_and_keeps_cell() {
        let cell = Cell::orthorhombic(5.0, 5.0, 5.0, [true, true, false]);
        let base = Structure::from_atoms(vec![Atom::with_layer("Ag", Point3::origin(), 1)], Some(cell));
        let extra = dimer();

        let merged = Structure::concatenated(&base, extra.atoms().iter().cloned());

        assert_eq!(merged.len(), 3);
        assert_eq!(base.len(), 1);
        assert_eq!(merged.cell(), Some(&cell));
        assert_eq!(merged.atoms()[1].species, "C");
    }

    #[test]
    fn free_atom_indices_skip_frozen_atoms() {
        let mut s = dimer();
        s.set_frozen(0, true);

        assert_eq!(s.free_atom_indices(), vec![1]);
        assert!(s.atoms()[0].frozen);
    }

    #[test]
    fn formula_groups_species_in_order_of_appearance() {
        let s = Structure::from_atoms(
            vec![
                Atom::new("C", Point3::origin()),
                Atom::new("H", Point3::origin()),
                Atom::new("C", Point3::origin()),
                Atom::new("H", Point3::origin()),
                Atom::new("H", Point3::origin()),
                Atom::new("O", Point3::origin()),
            ],
            None,
        );
        assert_eq!(s.formula(), "C2H3O");
    }
}
