use super::models::structure::Structure;

/// Per-atom flags, `true` meaning the atom's position is held fixed during optimization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintMask(Vec<bool>);

impl ConstraintMask {
    pub fn frozen_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Derives a mask from layer tags: an atom is frozen exactly when it carries a tag
/// deeper than `max_free_layer`. Untagged atoms are always free.
pub fn mask_from_layers(tags: &[Option<u32>], max_free_layer: u32) -> ConstraintMask {
    ConstraintMask(
        tags.iter()
            .map(|tag| tag.is_some_and(|t| t > max_free_layer))
            .collect(),
    )
}

/// Freezes every atom below `max_free_layer` and frees all others.
///
/// Returns the mask that was applied. Applying the same threshold twice yields the
/// same mask and leaves the structure unchanged the second time.
pub fn freeze_below(structure: &mut Structure, max_free_layer: u32) -> ConstraintMask {
    let mask = mask_from_layers(&structure.layer_tags(), max_free_layer);
    for (index, &frozen) in mask.as_slice().iter().enumerate() {
        structure.set_frozen(index, frozen);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::slab::build_substrate;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    #[test]
    fn mask_freezes_only_tags_deeper_than_threshold() {
        let tags = [Some(1), Some(2), Some(3), None];

        let mask = mask_from_layers(&tags, 1);

        assert_eq!(mask.as_slice(), &[false, true, true, false]);
        assert_eq!(mask.frozen_count(), 2);
    }

    #[test]
    fn threshold_zero_freezes_every_tagged_atom() {
        let mask = mask_from_layers(&[Some(1), Some(2), None], 0);
        assert_eq!(mask.as_slice(), &[true, true, false]);
    }

    #[test]
    fn freeze_below_marks_structure_atoms() {
        let mut slab = build_substrate("Ag", (2, 2), 4, 5.0).unwrap();

        let mask = freeze_below(&mut slab, 2);

        assert_eq!(mask.frozen_count(), 8);
        for (atom, &frozen) in slab.atoms().iter().zip(mask.as_slice()) {
            assert_eq!(atom.frozen, frozen);
            assert_eq!(atom.frozen, atom.layer.unwrap() > 2);
        }
    }

    #[test]
    fn freeze_below_is_idempotent() {
        let mut slab = build_substrate("Cu", (2, 2), 3, 5.0).unwrap();

        let first = freeze_below(&mut slab, 1);
        let snapshot = slab.clone();
        let second = freeze_below(&mut slab, 1);

        assert_eq!(first, second);
        assert_eq!(slab, snapshot);
    }

    #[test]
    fn freeze_below_with_looser_threshold_unfreezes_atoms() {
        let mut slab = build_substrate("Cu", (1, 1), 3, 5.0).unwrap();

        freeze_below(&mut slab, 1);
        let mask = freeze_below(&mut slab, 3);

        assert_eq!(mask.frozen_count(), 0);
        assert!(slab.atoms().iter().all(|a| !a.frozen));
    }

    #[test]
    fn molecule_atoms_stay_free() {
        let mut molecule = Structure::from_atoms(vec![Atom::new("C", Point3::origin())], None);

        let mask = freeze_below(&mut molecule, 0);

        assert_eq!(mask.as_slice(), &[false]);
        assert!(!molecule.atoms()[0].frozen);
    }
}
