//! Local minimization of atomic coordinates under a [`Potential`].
//!
//! [`relax`] drives the loop shared by every algorithm: evaluate, check the force
//! criterion over free atoms, ask the step rule for a displacement, apply it to free
//! atoms only. Frozen atoms are never written to.

mod bfgs;
mod fire;

use super::config::{Algorithm, RelaxConfig};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::structure::Structure;
use crate::core::potential::{Evaluation, Potential};
use nalgebra::{DVector, Vector3};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxStatus {
    Converged,
    MaxIterationsExceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxReport {
    pub status: RelaxStatus,
    /// Number of position updates applied.
    pub iterations: usize,
    /// Energy of the final geometry, in eV.
    pub energy: f64,
    /// Largest free-atom force of the final geometry, in eV/Å.
    pub max_force: f64,
}

impl RelaxReport {
    pub fn converged(&self) -> bool {
        self.status == RelaxStatus::Converged
    }
}

/// Produces a displacement of the free-atom coordinate vector from the current
/// positions and forces. Implementations keep their own history between calls.
trait StepRule {
    fn step(&mut self, positions: &DVector<f64>, forces: &DVector<f64>) -> DVector<f64>;
}

/// Scales `step` so that no atom (consecutive triple) moves further than `max_step`.
fn cap_step(step: &mut DVector<f64>, max_step: f64) {
    let longest = step
        .as_slice()
        .chunks(3)
        .map(|c| c.iter().map(|x| x * x).sum::<f64>().sqrt())
        .fold(0.0, f64::max);
    if longest > max_step {
        *step *= max_step / longest;
    }
}

fn evaluate<P: Potential + ?Sized>(
    structure: &Structure,
    potential: &P,
) -> Result<Evaluation, EngineError> {
    let oracle_failure = |source| EngineError::OracleFailure {
        potential: potential.name().to_string(),
        source,
    };
    let evaluation = potential.evaluate(structure).map_err(oracle_failure)?;
    evaluation.validate(structure.len()).map_err(oracle_failure)?;
    Ok(evaluation)
}

fn gather(values: impl Iterator<Item = Vector3<f64>>, len: usize) -> DVector<f64> {
    let mut out = DVector::zeros(3 * len);
    for (k, v) in values.enumerate() {
        out.fixed_rows_mut::<3>(3 * k).copy_from(&v);
    }
    out
}

/// Minimizes the energy of `structure` by moving its free atoms.
///
/// Stops with [`RelaxStatus::Converged`] as soon as the largest force on a free atom is
/// strictly below `config.max_force`, or with [`RelaxStatus::MaxIterationsExceeded`]
/// after `config.max_iterations` position updates. The structure is left at the last
/// evaluated geometry in both cases.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] for a structure without atoms, and
/// [`EngineError::OracleFailure`] if the potential fails or returns unusable data. The
/// structure may already have been moved when the oracle fails mid-run.
pub fn relax<P: Potential + ?Sized>(
    structure: &mut Structure,
    potential: &P,
    config: &RelaxConfig,
    reporter: &ProgressReporter,
) -> Result<RelaxReport, EngineError> {
    if structure.is_empty() {
        return Err(EngineError::EmptyStructure { operation: "relax" });
    }
    config.validate()?;

    let free = structure.free_atom_indices();
    let mut rule: Box<dyn StepRule> = match config.algorithm {
        Algorithm::Bfgs => Box::new(bfgs::Bfgs::new(3 * free.len(), config.max_step)),
        Algorithm::Fire => Box::new(fire::Fire::new(config.max_step)),
    };

    reporter.report(Progress::TaskStart {
        total_steps: config.max_iterations as u64,
    });

    let mut iterations = 0;
    let report = loop {
        let evaluation = evaluate(structure, potential)?;
        let max_force = evaluation.max_force(&free);
        trace!(
            iteration = iterations,
            energy = evaluation.energy,
            max_force,
            "Relaxation step"
        );

        let status = if max_force < config.max_force {
            Some(RelaxStatus::Converged)
        } else if iterations >= config.max_iterations {
            Some(RelaxStatus::MaxIterationsExceeded)
        } else {
            None
        };
        if let Some(status) = status {
            break RelaxReport {
                status,
                iterations,
                energy: evaluation.energy,
                max_force,
            };
        }

        let positions = gather(
            free.iter().map(|&i| structure.atoms()[i].position.coords),
            free.len(),
        );
        let forces = gather(free.iter().map(|&i| evaluation.forces[i]), free.len());
        let step = rule.step(&positions, &forces);

        for (k, &i) in free.iter().enumerate() {
            let displacement: Vector3<f64> = step.fixed_rows::<3>(3 * k).into_owned();
            let moved = structure.atoms()[i].position + displacement;
            structure.set_position(i, moved);
        }
        iterations += 1;
        reporter.report(Progress::TaskIncrement);
    };

    reporter.report(Progress::TaskFinish);
    debug!(
        algorithm = ?config.algorithm,
        status = ?report.status,
        iterations = report.iterations,
        energy = report.energy,
        max_force = report.max_force,
        "Relaxation finished"
    );
    Ok(report)
}
