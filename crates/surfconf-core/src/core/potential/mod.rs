//! # Potential Module
//!
//! Energy and force oracles consulted by the optimizer.
//!
//! ## Overview
//!
//! Every minimization routine in the engine talks to its energy model exclusively through
//! the [`Potential`] trait and receives the oracle as an explicit argument. A potential is
//! never attached to a [`Structure`], so the same structure can be scored by different
//! models and the same model can score many structures.
//!
//! ## Key Components
//!
//! - [`Potential`] - The oracle contract: energy plus one force vector per atom
//! - [`lennard_jones`] - A pairwise 12-6 model with periodic images and a shifted cutoff
//! - [`params`] - TOML-backed per-species parameters for the pair model
//! - [`kernels`] - Pure pair-potential functions
//!
//! ## Usage
//!
//! ```ignore
//! use surfconf::core::potential::{Potential, lennard_jones::LennardJones};
//!
//! let lj = LennardJones::with_defaults();
//! let evaluation = lj.evaluate(&structure)?;
//! let fmax = evaluation.max_force(&structure.free_atom_indices());
//! println!("E = {:.4} eV, fmax = {:.4} eV/Å", evaluation.energy, fmax);
//! ```

pub(crate) mod kernels;
pub mod lennard_jones;
pub mod params;

use crate::core::models::structure::Structure;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PotentialError {
    #[error("No interaction parameters for species '{0}'")]
    MissingParameters(String),

    #[error("Potential returned a non-finite {quantity}")]
    NonFinite { quantity: &'static str },

    #[error("Potential returned {got} force vectors for {expected} atoms")]
    ForceCountMismatch { expected: usize, got: usize },

    #[error("Periodic cell is degenerate (zero volume)")]
    DegenerateCell,

    #[error("Cutoff {0} must be finite and positive")]
    InvalidCutoff(f64),

    #[error("Cutoff {cutoff} Å reaches more than {max_images} periodic images along one axis")]
    TooManyImages { cutoff: f64, max_images: i64 },
}

/// Result of a single oracle call.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Total potential energy in eV.
    pub energy: f64,
    /// Force on every atom in eV/Å, in structure order.
    pub forces: Vec<Vector3<f64>>,
}

impl Evaluation {
    /// Checks the evaluation against the structure it was computed for.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::ForceCountMismatch`] if the force count differs from
    /// `atom_count`, or [`PotentialError::NonFinite`] for NaN/infinite values.
    pub fn validate(&self, atom_count: usize) -> Result<(), PotentialError> {
        if self.forces.len() != atom_count {
            return Err(PotentialError::ForceCountMismatch {
                expected: atom_count,
                got: self.forces.len(),
            });
        }
        if !self.energy.is_finite() {
            return Err(PotentialError::NonFinite { quantity: "energy" });
        }
        if self.forces.iter().any(|f| !f.iter().all(|c| c.is_finite())) {
            return Err(PotentialError::NonFinite { quantity: "force" });
        }
        Ok(())
    }

    /// Largest force magnitude over the atoms at `indices`; `0.0` when `indices` is empty.
    ///
    /// Indices outside the force list are ignored.
    pub fn max_force(&self, indices: &[usize]) -> f64 {
        indices
            .iter()
            .filter_map(|&i| self.forces.get(i))
            .map(|f| f.norm())
            .fold(0.0, f64::max)
    }
}

/// An energy/force model.
///
/// Implementations must be deterministic: evaluating the same structure twice
/// returns the same result.
pub trait Potential {
    /// Human-readable model name used in logs.
    fn name(&self) -> &str;

    /// Computes the total energy and per-atom forces of `structure`.
    fn evaluate(&self, structure: &Structure) -> Result<Evaluation, PotentialError>;
}
