use crate::core::constraints::{ConstraintMask, freeze_below};
use crate::core::io::{OutputFormat, WriteError, conformer_file_name};
use crate::core::lattice::slab::SlabBuilder;
use crate::core::models::builder::build_molecule;
use crate::core::models::structure::Structure;
use crate::core::potential::Potential;
use crate::core::utils::geometry::{calculate_rmsd, max_displacement};
use crate::engine::adsorption::{AdsorptionSite, compute_site, place};
use crate::engine::config::{AdsorptionConfig, MoleculeSource, SubstrateConfig};
use crate::engine::conformers::generate;
use crate::engine::error::EngineError;
use crate::engine::optimizer::{RelaxReport, relax};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ConformerOutcome {
    /// 1-based conformer index, also used in output file names.
    pub index: usize,
    pub angle_degrees: f64,
    pub report: RelaxReport,
    /// The relaxed conformer before placement.
    pub conformer: Structure,
    /// Substrate followed by the placed conformer.
    pub merged: Structure,
}

impl ConformerOutcome {
    /// Writes the merged structure to `<prefix>_conformer_<index>.<ext>`.
    pub fn write(&self, prefix: &Path, format: OutputFormat) -> Result<PathBuf, WriteError> {
        let path = conformer_file_name(prefix, self.index, format.extension());
        format.write_to_path(&self.merged, &path)?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct AdsorptionResult {
    /// Substrate with constraints applied, relaxed if requested.
    pub substrate: Structure,
    pub substrate_report: Option<RelaxReport>,
    /// The relaxed molecule all conformers were generated from.
    pub molecule: Structure,
    pub molecule_report: RelaxReport,
    pub site: AdsorptionSite,
    pub conformers: Vec<ConformerOutcome>,
}

impl AdsorptionResult {
    /// Writes one file per conformer, in conformer order.
    pub fn write_all(
        &self,
        prefix: &Path,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>, WriteError> {
        self.conformers
            .iter()
            .map(|outcome| outcome.write(prefix, format))
            .collect()
    }
}

#[instrument(skip_all, name = "adsorption_workflow")]
pub fn run<P: Potential + ?Sized>(
    config: &AdsorptionConfig,
    potential: &P,
    reporter: &ProgressReporter,
) -> Result<AdsorptionResult, EngineError> {
    // === Phase 1: Build all structures before any optimization ===
    reporter.report(Progress::PhaseStart {
        name: "Building Structures",
    });
    let (mut substrate, mask) = build_substrate(&config.substrate)?;
    let mut molecule = build_adsorbate(&config.molecule)?;
    info!(
        substrate_atoms = substrate.len(),
        frozen = mask.frozen_count(),
        molecule = %molecule.formula(),
        "Structures built."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Optional substrate relaxation ===
    let substrate_report = if config.substrate.relax {
        reporter.report(Progress::PhaseStart {
            name: "Relaxing Substrate",
        });
        let report = relax(&mut substrate, potential, &config.relax, reporter)?;
        log_outcome("substrate", &report);
        reporter.report(Progress::PhaseFinish);
        Some(report)
    } else {
        None
    };

    // === Phase 3: Molecule relaxation ===
    reporter.report(Progress::PhaseStart {
        name: "Relaxing Molecule",
    });
    let molecule_report = relax(&mut molecule, potential, &config.relax, reporter)?;
    log_outcome("molecule", &molecule_report);
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Conformer generation and relaxation ===
    let conformers = generate(
        &molecule,
        &config.conformers.angles_degrees,
        config.conformers.axis,
    )?;
    info!(count = conformers.len(), "Generated conformers.");

    let site = compute_site(&substrate)?;
    info!(x = site.x, y = site.y, "Adsorption site computed.");

    reporter.report(Progress::PhaseStart {
        name: "Relaxing Conformers",
    });
    let mut outcomes = Vec::with_capacity(conformers.len());
    for conformer in conformers {
        let mut structure = conformer.structure;
        let start = structure.positions();
        let report = relax(&mut structure, potential, &config.relax, reporter)?;
        log_outcome(&format!("conformer {}", conformer.index), &report);
        let end = structure.positions();
        debug!(
            index = conformer.index,
            rmsd = calculate_rmsd(&start, &end),
            max_displacement = max_displacement(&start, &end),
            "Conformer moved during relaxation."
        );

        // === Phase 5: Placement on the shared site ===
        let merged = place(
            &substrate,
            &structure,
            site,
            config.placement.height,
            config.placement.reference,
        )?;
        reporter.report(Progress::ConformerFinished {
            index: conformer.index,
            converged: report.converged(),
        });
        outcomes.push(ConformerOutcome {
            index: conformer.index,
            angle_degrees: conformer.angle_degrees,
            report,
            conformer: structure,
            merged,
        });
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        "Workflow complete. {} of {} conformer(s) converged.",
        outcomes.iter().filter(|o| o.report.converged()).count(),
        outcomes.len()
    );
    Ok(AdsorptionResult {
        substrate,
        substrate_report,
        molecule,
        molecule_report,
        site,
        conformers: outcomes,
    })
}

fn build_substrate(config: &SubstrateConfig) -> Result<(Structure, ConstraintMask), EngineError> {
    let mut builder = SlabBuilder::new(&config.species)
        .size(config.size.0, config.size.1)
        .layers(config.layers)
        .vacuum(config.vacuum)
        .facet(config.facet);
    if let Some(a) = config.lattice_constant {
        builder = builder.lattice_constant(a);
    }
    let mut substrate = builder.build()?;
    let mask = freeze_below(&mut substrate, config.max_free_layer);
    Ok((substrate, mask))
}

fn build_adsorbate(source: &MoleculeSource) -> Result<Structure, EngineError> {
    let molecule = match source {
        MoleculeSource::Preset(preset) => preset.build(),
        MoleculeSource::Explicit { species, positions } => {
            build_molecule(species.as_slice(), positions.as_slice())?
        }
        // A structure read from disk may carry a cell, layer tags or frozen flags.
        // The adsorbate is always rebuilt as a free, non-periodic molecule.
        MoleculeSource::Structure(structure) => {
            let species: Vec<&str> = structure.species().collect();
            build_molecule(species.as_slice(), structure.positions().as_slice())?
        }
    };
    if molecule.is_empty() {
        return Err(EngineError::EmptyStructure {
            operation: "build molecule",
        });
    }
    Ok(molecule)
}

fn log_outcome(label: &str, report: &RelaxReport) {
    if report.converged() {
        info!(
            iterations = report.iterations,
            energy = report.energy,
            "Relaxation of {} converged.",
            label
        );
    } else {
        warn!(
            iterations = report.iterations,
            max_force = report.max_force,
            "Relaxation of {} did not converge within the iteration budget.",
            label
        );
    }
}
