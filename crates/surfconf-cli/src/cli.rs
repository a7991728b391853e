use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "surfconf - build metal slabs, relax molecular conformers and place them as adsorbates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relax rotated conformers of a molecule and place each one on a slab.
    Adsorb(AdsorbArgs),
}

/// Arguments for the `adsorb` subcommand.
#[derive(Args, Debug, Default)]
pub struct AdsorbArgs {
    // --- Configuration ---
    /// Path to a TOML configuration file. Command-line values take precedence.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output ---
    /// Prefix for output files; conformer N is written to <PREFIX>_conformer_N.<ext>.
    #[arg(short, long, value_name = "PREFIX")]
    pub output_prefix: Option<PathBuf>,

    /// Output format for merged structures (cif or xyz).
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write a CSV table with one row per conformer.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    // --- Structures ---
    /// Substrate element symbol (e.g. Ag, Cu, Pt).
    #[arg(long, value_name = "SYMBOL")]
    pub substrate: Option<String>,

    /// Molecule preset name (e.g. butane) or path to an XYZ file.
    #[arg(short, long, value_name = "NAME|PATH")]
    pub molecule: Option<String>,

    /// Lennard-Jones parameter file overriding the built-in element table.
    #[arg(long, value_name = "PATH")]
    pub potential_params: Option<PathBuf>,

    // --- Conformers and placement ---
    /// Comma-separated rotation angles in degrees.
    #[arg(long, value_name = "DEG,...", value_delimiter = ',', allow_hyphen_values = true)]
    pub angles: Option<Vec<f64>>,

    /// Rotation axis: x, y, z or three comma-separated components.
    #[arg(long, value_name = "AXIS", allow_hyphen_values = true)]
    pub axis: Option<String>,

    /// Height of the reference point above the topmost substrate atom, in Angstroms.
    #[arg(long, value_name = "ANGSTROM")]
    pub height: Option<f64>,

    // --- Relaxation ---
    /// Force convergence threshold in eV/Angstrom.
    #[arg(long, value_name = "EV_PER_ANGSTROM")]
    pub fmax: Option<f64>,

    /// Maximum number of optimizer steps per relaxation.
    #[arg(long, value_name = "STEPS")]
    pub max_iterations: Option<usize>,

    /// Minimization algorithm (bfgs or fire).
    #[arg(long, value_name = "NAME")]
    pub algorithm: Option<String>,

    /// Relax the unfrozen substrate layers before placement.
    #[arg(long)]
    pub relax_substrate: bool,
}
