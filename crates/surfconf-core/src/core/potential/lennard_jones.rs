use super::kernels::{lennard_jones_12_6, lorentz_berthelot};
use super::params::{LennardJonesParams, PairParam};
use super::{Evaluation, Potential, PotentialError};
use crate::core::lattice::elements::element;
use crate::core::models::structure::Structure;
use nalgebra::Vector3;
use std::collections::HashMap;

/// Upper bound on periodic images summed along each direction of a lattice vector.
const MAX_IMAGE_REACH: i64 = 16;

/// Pairwise 12-6 Lennard-Jones oracle.
///
/// Cross-species parameters use Lorentz-Berthelot mixing. The energy is shifted so
/// every pair term vanishes at the cutoff. Along periodic cell axes all images within
/// the cutoff are summed, so small cells are handled correctly.
#[derive(Debug, Clone)]
pub struct LennardJones {
    params: LennardJonesParams,
}

impl LennardJones {
    pub fn new(params: LennardJonesParams) -> Self {
        Self { params }
    }

    /// Uses element-table parameters for every species and the default cutoff.
    pub fn with_defaults() -> Self {
        Self::new(LennardJonesParams::default())
    }

    pub fn cutoff(&self) -> f64 {
        self.params.globals.cutoff
    }

    fn pair_param(&self, species: &str) -> Result<PairParam, PotentialError> {
        if let Some(p) = self.params.species.get(species) {
            return Ok(*p);
        }
        element(species)
            .map(|e| PairParam {
                sigma: e.lj_sigma,
                epsilon: e.lj_epsilon,
            })
            .ok_or_else(|| PotentialError::MissingParameters(species.to_string()))
    }

    fn image_shifts(&self, structure: &Structure) -> Result<Vec<Vector3<f64>>, PotentialError> {
        let Some(cell) = structure.cell().filter(|c| c.is_periodic()) else {
            return Ok(vec![Vector3::zeros()]);
        };
        if cell.volume() < 1e-12 {
            return Err(PotentialError::DegenerateCell);
        }
        let widths = cell.perpendicular_widths();
        let mut reach = [0i64; 3];
        for axis in (0..3).filter(|&axis| cell.pbc()[axis]) {
            let images = (self.cutoff() / widths[axis]).ceil();
            if images > MAX_IMAGE_REACH as f64 {
                return Err(PotentialError::TooManyImages {
                    cutoff: self.cutoff(),
                    max_images: MAX_IMAGE_REACH,
                });
            }
            reach[axis] = images as i64;
        }

        let mut shifts = Vec::new();
        for i in -reach[0]..=reach[0] {
            for j in -reach[1]..=reach[1] {
                for k in -reach[2]..=reach[2] {
                    shifts.push(
                        cell.vector(0) * i as f64
                            + cell.vector(1) * j as f64
                            + cell.vector(2) * k as f64,
                    );
                }
            }
        }
        Ok(shifts)
    }
}

impl Potential for LennardJones {
    fn name(&self) -> &str {
        "lennard-jones"
    }

    fn evaluate(&self, structure: &Structure) -> Result<Evaluation, PotentialError> {
        let n = structure.len();
        let atoms = structure.atoms();
        let cutoff = self.cutoff();
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(PotentialError::InvalidCutoff(cutoff));
        }

        let mut cache: HashMap<&str, PairParam> = HashMap::new();
        let mut per_atom = Vec::with_capacity(n);
        for atom in atoms {
            let param = match cache.get(atom.species.as_str()) {
                Some(p) => *p,
                None => {
                    let p = self.pair_param(&atom.species)?;
                    cache.insert(atom.species.as_str(), p);
                    p
                }
            };
            per_atom.push((param.sigma, param.epsilon));
        }

        let shifts = self.image_shifts(structure)?;
        let mut energy = 0.0;
        let mut forces = vec![Vector3::zeros(); n];

        for i in 0..n {
            for j in i..n {
                let (sigma, epsilon) = lorentz_berthelot(per_atom[i], per_atom[j]);
                let (e_cut, _) = lennard_jones_12_6(cutoff, sigma, epsilon);
                let base = atoms[j].position - atoms[i].position;

                for shift in &shifts {
                    let self_image = i == j;
                    if self_image && shift.norm_squared() == 0.0 {
                        continue;
                    }
                    let d = base + shift;
                    let r = d.norm();
                    if r >= cutoff {
                        continue;
                    }
                    let (e, de_dr) = lennard_jones_12_6(r, sigma, epsilon);
                    if self_image {
                        // Each self-image pair is visited as +shift and -shift.
                        energy += 0.5 * (e - e_cut);
                        continue;
                    }
                    energy += e - e_cut;
                    let f = d * (de_dr / r);
                    forces[i] += f;
                    forces[j] -= f;
                }
            }
        }

        Ok(Evaluation { energy, forces })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::slab::build_substrate;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::build_molecule;
    use crate::core::models::cell::Cell;
    use crate::core::potential::params::GlobalParams;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn single_species(sigma: f64, epsilon: f64, cutoff: f64) -> LennardJones {
        let mut params = LennardJonesParams {
            globals: GlobalParams { cutoff },
            ..Default::default()
        };
        params
            .species
            .insert("Ar".to_string(), PairParam { sigma, epsilon });
        LennardJones::new(params)
    }

    fn numerical_force(
        potential: &LennardJones,
        structure: &Structure,
        atom: usize,
        axis: usize,
    ) -> f64 {
        let h = 1e-5;
        let mut plus = structure.clone();
        let mut minus = structure.clone();
        let p = structure.atoms()[atom].position;
        let mut offset = Vector3::zeros();
        offset[axis] = h;
        plus.set_position(atom, p + offset);
        minus.set_position(atom, p - offset);
        let e_plus = potential.evaluate(&plus).unwrap().energy;
        let e_minus = potential.evaluate(&minus).unwrap().energy;
        -(e_plus - e_minus) / (2.0 * h)
    }

    #[test]
    fn dimer_at_minimum_has_shifted_well_depth_and_no_force() {
        let lj = single_species(3.0, 0.01, 100.0);
        let r_min = 2f64.powf(1.0 / 6.0) * 3.0;
        let dimer = build_molecule(&["Ar", "Ar"], &[Point3::origin(), Point3::new(r_min, 0.0, 0.0)])
            .unwrap();

        let evaluation = lj.evaluate(&dimer).unwrap();

        let (e_cut, _) = lennard_jones_12_6(100.0, 3.0, 0.01);
        assert!((evaluation.energy - (-0.01 - e_cut)).abs() < TOLERANCE);
        assert!(evaluation.max_force(&[0, 1]) < 1e-9);
    }

    #[test]
    fn compressed_dimer_is_pushed_apart_with_opposite_forces() {
        let lj = single_species(3.0, 0.01, 10.0);
        let dimer =
            build_molecule(&["Ar", "Ar"], &[Point3::origin(), Point3::new(2.8, 0.0, 0.0)]).unwrap();

        let evaluation = lj.evaluate(&dimer).unwrap();

        assert!(evaluation.forces[0].x < 0.0);
        assert!(evaluation.forces[1].x > 0.0);
        assert!((evaluation.forces[0] + evaluation.forces[1]).norm() < TOLERANCE);
    }

    #[test]
    fn pairs_beyond_cutoff_do_not_interact() {
        let lj = single_species(3.0, 0.01, 5.0);
        let dimer =
            build_molecule(&["Ar", "Ar"], &[Point3::origin(), Point3::new(6.0, 0.0, 0.0)]).unwrap();

        let evaluation = lj.evaluate(&dimer).unwrap();

        assert_eq!(evaluation.energy, 0.0);
        assert_eq!(evaluation.max_force(&[0, 1]), 0.0);
    }

    #[test]
    fn forces_match_numerical_gradient_for_mixed_species() {
        let lj = LennardJones::with_defaults();
        let molecule = build_molecule(
            &["C", "H", "O"],
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.4, 0.3, -0.2),
                Point3::new(0.5, 3.1, 0.4),
            ],
        )
        .unwrap();

        let evaluation = lj.evaluate(&molecule).unwrap();

        for atom in 0..3 {
            for axis in 0..3 {
                let expected = numerical_force(&lj, &molecule, atom, axis);
                assert!((evaluation.forces[atom][axis] - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn periodic_forces_match_numerical_gradient() {
        let lj = LennardJones::with_defaults();
        let mut slab = build_substrate("Ag", (2, 2), 2, 6.0).unwrap();
        slab.set_position(0, Point3::new(0.2, -0.1, 0.15));

        let evaluation = lj.evaluate(&slab).unwrap();

        for axis in 0..3 {
            let expected = numerical_force(&lj, &slab, 0, axis);
            assert!((evaluation.forces[0][axis] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn single_periodic_atom_interacts_only_with_its_images() {
        let lj = single_species(2.5, 0.1, 6.0);
        let cell = Cell::orthorhombic(3.0, 3.0, 20.0, [true, true, false]);
        let structure = Structure::from_atoms(vec![Atom::new("Ar", Point3::origin())], Some(cell));

        let evaluation = lj.evaluate(&structure).unwrap();

        assert!(evaluation.energy != 0.0);
        assert!(evaluation.max_force(&[0]) < 1e-9);
    }

    #[test]
    fn unknown_species_is_reported() {
        let lj = LennardJones::with_defaults();
        let molecule = build_molecule(&["Qq"], &[Point3::origin()]).unwrap();

        assert_eq!(
            lj.evaluate(&molecule),
            Err(PotentialError::MissingParameters("Qq".to_string()))
        );
    }

    #[test]
    fn degenerate_periodic_cell_is_rejected() {
        let lj = LennardJones::with_defaults();
        let cell = Cell::orthorhombic(0.0, 3.0, 3.0, [true, true, false]);
        let structure = Structure::from_atoms(vec![Atom::new("Ag", Point3::origin())], Some(cell));

        assert_eq!(lj.evaluate(&structure), Err(PotentialError::DegenerateCell));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let lj = LennardJones::with_defaults();
        let slab = build_substrate("Cu", (2, 2), 2, 5.0).unwrap();

        assert_eq!(lj.evaluate(&slab), lj.evaluate(&slab));
    }

    #[test]
    fn non_positive_or_nan_cutoff_is_rejected() {
        let dimer =
            build_molecule(&["Ag", "Ag"], &[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).unwrap();

        for cutoff in [0.0, -1.0] {
            let lj = single_species(3.0, 0.01, cutoff);
            assert_eq!(lj.evaluate(&dimer), Err(PotentialError::InvalidCutoff(cutoff)));
        }
        let lj = single_species(3.0, 0.01, f64::NAN);
        assert!(matches!(
            lj.evaluate(&dimer),
            Err(PotentialError::InvalidCutoff(c)) if c.is_nan()
        ));
    }

    #[test]
    fn cutoff_spanning_too_many_images_is_rejected() {
        let lj = single_species(2.5, 0.1, 1.0e6);
        let cell = Cell::orthorhombic(3.0, 3.0, 20.0, [true, true, false]);
        let structure = Structure::from_atoms(vec![Atom::new("Ar", Point3::origin())], Some(cell));

        assert_eq!(
            lj.evaluate(&structure),
            Err(PotentialError::TooManyImages {
                cutoff: 1.0e6,
                max_images: MAX_IMAGE_REACH,
            })
        );
    }

    #[test]
    fn large_cutoff_is_fine_without_a_periodic_cell() {
        let lj = single_species(3.0, 0.01, 1.0e6);
        let dimer =
            build_molecule(&["Ar", "Ar"], &[Point3::origin(), Point3::new(3.5, 0.0, 0.0)]).unwrap();

        assert!(lj.evaluate(&dimer).is_ok());
    }
}
