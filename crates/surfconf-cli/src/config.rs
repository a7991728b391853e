mod defaults;
mod models;

pub use models::AppConfig;

use crate::cli::AdsorbArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, MoleculeSpec};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use surfconf::core::io::traits::StructureReader;
use surfconf::core::io::xyz::XyzFile;
use surfconf::engine::config as core_config;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSubstrateConfig {
    species: Option<String>,
    size: Option<[usize; 2]>,
    layers: Option<usize>,
    vacuum: Option<f64>,
    facet: Option<String>,
    lattice_constant: Option<f64>,
    max_free_layer: Option<u32>,
    relax: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialMoleculeConfig {
    preset: Option<String>,
    file: Option<PathBuf>,
    species: Option<Vec<String>>,
    positions: Option<Vec<[f64; 3]>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialConformerConfig {
    angles: Option<Vec<f64>>,
    axis: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPlacementConfig {
    height: Option<f64>,
    reference: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialRelaxConfig {
    fmax: Option<f64>,
    max_iterations: Option<usize>,
    algorithm: Option<String>,
    max_step: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialAdsorptionConfig {
    output_prefix: Option<PathBuf>,
    format: Option<String>,
    potential_params: Option<PathBuf>,
    summary: Option<PathBuf>,
    substrate: Option<PartialSubstrateConfig>,
    molecule: Option<PartialMoleculeConfig>,
    conformers: Option<PartialConformerConfig>,
    placement: Option<PartialPlacementConfig>,
    relax: Option<PartialRelaxConfig>,
}

impl PartialAdsorptionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves every setting as command line, then config file, then built-in default.
    pub fn merge_with_cli(mut self, args: &AdsorbArgs) -> Result<AppConfig> {
        let defaults = DefaultsConfig::default();
        let substrate = self.substrate.take().unwrap_or_default();
        let conformers = self.conformers.take().unwrap_or_default();
        let placement = self.placement.take().unwrap_or_default();
        let relax = self.relax.take().unwrap_or_default();

        let argument = |e: parser::ParseError| CliError::Argument(e.to_string());

        let format = parser::parse_format(
            args.format
                .as_deref()
                .or(self.format.as_deref())
                .unwrap_or(defaults.format),
        )
        .map_err(argument)?;
        let facet = parser::parse_facet(substrate.facet.as_deref().unwrap_or(defaults.facet))
            .map_err(argument)?;
        let axis = parser::parse_axis(
            args.axis
                .as_deref()
                .or(conformers.axis.as_deref())
                .unwrap_or(defaults.axis),
        )
        .map_err(argument)?;
        let reference =
            parser::parse_reference(placement.reference.as_deref().unwrap_or(defaults.reference))
                .map_err(argument)?;
        let algorithm = parser::parse_algorithm(
            args.algorithm
                .as_deref()
                .or(relax.algorithm.as_deref())
                .unwrap_or(defaults.algorithm),
        )
        .map_err(argument)?;

        let molecule = Self::resolve_molecule(args.molecule.as_deref(), self.molecule.take(), &defaults)?;

        let [nx, ny] = substrate.size.unwrap_or(defaults.substrate_size);
        let mut builder = core_config::AdsorptionConfigBuilder::new()
            .substrate_species(
                args.substrate
                    .clone()
                    .or(substrate.species)
                    .unwrap_or_else(|| defaults.substrate_species.to_string()),
            )
            .substrate_size(nx, ny)
            .substrate_layers(substrate.layers.unwrap_or(defaults.substrate_layers))
            .vacuum(substrate.vacuum.unwrap_or(defaults.vacuum))
            .facet(facet)
            .max_free_layer(substrate.max_free_layer.unwrap_or(defaults.max_free_layer))
            .relax_substrate(args.relax_substrate || substrate.relax.unwrap_or(false))
            .molecule(molecule)
            .angles_degrees(
                args.angles
                    .clone()
                    .or(conformers.angles)
                    .unwrap_or_else(|| defaults.angles.to_vec()),
            )
            .axis(axis)
            .height(args.height.or(placement.height).unwrap_or(defaults.height))
            .reference(reference)
            .relax(core_config::RelaxConfig {
                max_force: args.fmax.or(relax.fmax).unwrap_or(defaults.fmax),
                max_iterations: args
                    .max_iterations
                    .or(relax.max_iterations)
                    .unwrap_or(defaults.max_iterations),
                algorithm,
                max_step: relax.max_step.unwrap_or(defaults.max_step),
            });
        if let Some(a) = substrate.lattice_constant {
            builder = builder.lattice_constant(a);
        }
        let core_config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig {
            core_config,
            output_prefix: args
                .output_prefix
                .clone()
                .or(self.output_prefix)
                .unwrap_or_else(|| PathBuf::from(defaults.output_prefix)),
            format,
            potential_params: args.potential_params.clone().or(self.potential_params),
            summary_path: args.summary.clone().or(self.summary),
        })
    }

    fn resolve_molecule(
        cli_value: Option<&str>,
        file_value: Option<PartialMoleculeConfig>,
        defaults: &DefaultsConfig,
    ) -> Result<core_config::MoleculeSource> {
        if let Some(value) = cli_value {
            return Self::load_molecule_spec(value);
        }
        let Some(partial) = file_value else {
            return Self::load_molecule_spec(defaults.molecule);
        };

        match (partial.preset, partial.file, partial.species, partial.positions) {
            (Some(preset), None, None, None) => Self::load_molecule_spec(&preset),
            (None, Some(path), None, None) => Self::read_molecule_file(&path),
            (None, None, Some(species), Some(positions)) => {
                Ok(core_config::MoleculeSource::Explicit {
                    species,
                    positions: positions.into_iter().map(Into::into).collect(),
                })
            }
            (None, None, None, None) => Self::load_molecule_spec(defaults.molecule),
            _ => Err(CliError::Config(
                "`molecule` needs exactly one of `preset`, `file`, or `species` with `positions`."
                    .to_string(),
            )),
        }
    }

    fn load_molecule_spec(value: &str) -> Result<core_config::MoleculeSource> {
        match parser::parse_molecule(value).map_err(|e| CliError::Argument(e.to_string()))? {
            MoleculeSpec::Preset(preset) => Ok(core_config::MoleculeSource::Preset(preset)),
            MoleculeSpec::File(path) => Self::read_molecule_file(&path),
        }
    }

    fn read_molecule_file(path: &Path) -> Result<core_config::MoleculeSource> {
        debug!("Reading molecule from {:?}", path);
        let structure = XyzFile::read_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Ok(core_config::MoleculeSource::Structure(structure))
    }
}
