use crate::cli::AdsorbArgs;
use crate::config::{AppConfig, PartialAdsorptionConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use serde::Serialize;
use std::path::{Path, PathBuf};
use surfconf::{
    core::io::conformer_file_name,
    core::potential::{lennard_jones::LennardJones, params::LennardJonesParams},
    engine::{error::EngineError, progress::ProgressReporter},
    workflows::{self, adsorb::AdsorptionResult},
};
use tracing::{info, warn};

/// One row of the optional CSV summary.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    conformer: usize,
    angle_degrees: f64,
    converged: bool,
    iterations: usize,
    energy_ev: f64,
    max_force_ev_per_angstrom: f64,
    file: &'a str,
}

pub fn run(args: AdsorbArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialAdsorptionConfig::from_file(path)?,
        None => PartialAdsorptionConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let app = partial_config.merge_with_cli(&args)?;

    let potential = load_potential(&app)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting adsorption workflow: {} conformer(s) on {}({}x{}x{})...",
        app.core_config.conformers.angles_degrees.len(),
        app.core_config.substrate.species,
        app.core_config.substrate.size.0,
        app.core_config.substrate.size.1,
        app.core_config.substrate.layers,
    );
    info!("Invoking the core adsorption workflow...");
    let result = workflows::adsorb::run(&app.core_config, &potential, &reporter)?;

    let written = write_outputs(&result, &app)?;

    if let Some(summary_path) = &app.summary_path {
        write_summary(summary_path, &result, &written)?;
        println!("  Summary written to: {}", summary_path.display());
    }
    Ok(())
}

fn load_potential(app: &AppConfig) -> Result<LennardJones> {
    match &app.potential_params {
        Some(path) => {
            info!("Loading Lennard-Jones parameters from {:?}", path);
            let params = LennardJonesParams::load(path).map_err(EngineError::from)?;
            Ok(LennardJones::new(params))
        }
        None => Ok(LennardJones::with_defaults()),
    }
}

fn write_outputs(result: &AdsorptionResult, app: &AppConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.conformers.len());
    for outcome in &result.conformers {
        let report = &outcome.report;
        if report.converged() {
            println!(
                "✓ Conformer {} ({:.1}°) converged in {} step(s), E = {:.4} eV",
                outcome.index, outcome.angle_degrees, report.iterations, report.energy
            );
        } else {
            warn!(
                "Conformer {} stopped after {} step(s) with fmax {:.4} eV/Å.",
                outcome.index, report.iterations, report.max_force
            );
            println!(
                "⚠ Conformer {} ({:.1}°) did not converge (fmax = {:.4} eV/Å after {} steps)",
                outcome.index, outcome.angle_degrees, report.max_force, report.iterations
            );
        }

        let path = conformer_file_name(&app.output_prefix, outcome.index, app.format.extension());
        outcome
            .write(&app.output_prefix, app.format)
            .map_err(|e| CliError::Write {
                path: path.clone(),
                source: e,
            })?;
        info!("Wrote conformer {} to {:?}", outcome.index, &path);
        println!("  written to: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_summary(path: &Path, result: &AdsorptionResult, files: &[PathBuf]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (outcome, file) in result.conformers.iter().zip(files) {
        let file = file.to_string_lossy();
        writer.serialize(SummaryRow {
            conformer: outcome.index,
            angle_degrees: outcome.angle_degrees,
            converged: outcome.report.converged(),
            iterations: outcome.report.iterations,
            energy_ev: outcome.report.energy,
            max_force_ev_per_angstrom: outcome.report.max_force,
            file: &file,
        })?;
    }
    writer.flush()?;
    Ok(())
}
