use super::adsorption::ReferencePoint;
use super::conformers::Axis;
use crate::core::lattice::slab::Facet;
use crate::core::models::builder::MoleculePreset;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Minimization algorithm used by [`relax`](super::optimizer::relax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Bfgs,
    Fire,
}

impl FromStr for Algorithm {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfgs" => Ok(Algorithm::Bfgs),
            "fire" => Ok(Algorithm::Fire),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxConfig {
    /// Convergence threshold on the largest free-atom force, in eV/Å.
    pub max_force: f64,
    /// Number of position updates allowed before giving up.
    pub max_iterations: usize,
    pub algorithm: Algorithm,
    /// Largest distance any atom may move in one update, in Å.
    pub max_step: f64,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            max_force: 0.05,
            max_iterations: 1000,
            algorithm: Algorithm::Bfgs,
            max_step: 0.2,
        }
    }
}

impl RelaxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_force.is_finite() && self.max_force > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "max_force",
                reason: format!("{} is not a positive number", self.max_force),
            });
        }
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "max_step",
                reason: format!("{} is not a positive number", self.max_step),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubstrateConfig {
    pub species: String,
    pub size: (usize, usize),
    pub layers: usize,
    pub vacuum: f64,
    pub facet: Facet,
    pub lattice_constant: Option<f64>,
    /// Layers with a tag above this value are frozen.
    pub max_free_layer: u32,
    /// Relax the free substrate layers before placing conformers.
    pub relax: bool,
}

/// Where the adsorbate comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MoleculeSource {
    Preset(MoleculePreset),
    Explicit {
        species: Vec<String>,
        positions: Vec<Point3<f64>>,
    },
    Structure(Structure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConformerConfig {
    pub angles_degrees: Vec<f64>,
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Vertical offset above the topmost substrate atom, in Å.
    pub height: f64,
    pub reference: ReferencePoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdsorptionConfig {
    pub substrate: SubstrateConfig,
    pub molecule: MoleculeSource,
    pub conformers: ConformerConfig,
    pub placement: PlacementConfig,
    pub relax: RelaxConfig,
}

#[derive(Default)]
pub struct AdsorptionConfigBuilder {
    substrate_species: Option<String>,
    substrate_size: Option<(usize, usize)>,
    substrate_layers: Option<usize>,
    vacuum: Option<f64>,
    facet: Option<Facet>,
    lattice_constant: Option<f64>,
    max_free_layer: Option<u32>,
    relax_substrate: Option<bool>,
    molecule: Option<MoleculeSource>,
    angles_degrees: Option<Vec<f64>>,
    axis: Option<Axis>,
    height: Option<f64>,
    reference: Option<ReferencePoint>,
    relax: Option<RelaxConfig>,
}

impl AdsorptionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substrate_species(mut self, species: impl Into<String>) -> Self {
        self.substrate_species = Some(species.into());
        self
    }
    pub fn substrate_size(mut self, nx: usize, ny: usize) -> Self {
        self.substrate_size = Some((nx, ny));
        self
    }
    pub fn substrate_layers(mut self, layers: usize) -> Self {
        self.substrate_layers = Some(layers);
        self
    }
    pub fn vacuum(mut self, vacuum: f64) -> Self {
        self.vacuum = Some(vacuum);
        self
    }
    pub fn facet(mut self, facet: Facet) -> Self {
        self.facet = Some(facet);
        self
    }
    pub fn lattice_constant(mut self, a: f64) -> Self {
        self.lattice_constant = Some(a);
        self
    }
    pub fn max_free_layer(mut self, layer: u32) -> Self {
        self.max_free_layer = Some(layer);
        self
    }
    pub fn relax_substrate(mut self, relax: bool) -> Self {
        self.relax_substrate = Some(relax);
        self
    }
    pub fn molecule(mut self, source: MoleculeSource) -> Self {
        self.molecule = Some(source);
        self
    }
    pub fn angles_degrees(mut self, angles: Vec<f64>) -> Self {
        self.angles_degrees = Some(angles);
        self
    }
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
    pub fn reference(mut self, reference: ReferencePoint) -> Self {
        self.reference = Some(reference);
        self
    }
    pub fn relax(mut self, relax: RelaxConfig) -> Self {
        self.relax = Some(relax);
        self
    }

    pub fn build(self) -> Result<AdsorptionConfig, ConfigError> {
        let substrate = SubstrateConfig {
            species: self
                .substrate_species
                .ok_or(ConfigError::MissingParameter("substrate_species"))?,
            size: self
                .substrate_size
                .ok_or(ConfigError::MissingParameter("substrate_size"))?,
            layers: self
                .substrate_layers
                .ok_or(ConfigError::MissingParameter("substrate_layers"))?,
            vacuum: self.vacuum.ok_or(ConfigError::MissingParameter("vacuum"))?,
            facet: self.facet.unwrap_or_default(),
            lattice_constant: self.lattice_constant,
            max_free_layer: self.max_free_layer.unwrap_or(1),
            relax: self.relax_substrate.unwrap_or(false),
        };

        let molecule = self
            .molecule
            .ok_or(ConfigError::MissingParameter("molecule"))?;

        let angles_degrees = self
            .angles_degrees
            .ok_or(ConfigError::MissingParameter("angles_degrees"))?;
        if angles_degrees.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "angles_degrees",
                reason: "at least one rotation angle is required".to_string(),
            });
        }
        if let Some(bad) = angles_degrees.iter().find(|a| !a.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "angles_degrees",
                reason: format!("{bad} is not a finite angle"),
            });
        }

        let height = self.height.ok_or(ConfigError::MissingParameter("height"))?;
        if !height.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "height",
                reason: format!("{height} is not finite"),
            });
        }

        let relax = self.relax.unwrap_or_default();
        relax.validate()?;

        Ok(AdsorptionConfig {
            substrate,
            molecule,
            conformers: ConformerConfig {
                angles_degrees,
                axis: self.axis.unwrap_or(Axis::Z),
            },
            placement: PlacementConfig {
                height,
                reference: self.reference.unwrap_or_default(),
            },
            relax,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> AdsorptionConfigBuilder {
        AdsorptionConfigBuilder::new()
            .substrate_species("Ag")
            .substrate_size(6, 6)
            .substrate_layers(4)
            .vacuum(10.0)
            .molecule(MoleculeSource::Preset(MoleculePreset::Butane))
            .angles_degrees(vec![0.0, 120.0, 240.0])
            .height(2.0)
    }

    #[test]
    fn complete_builder_fills_defaults() {
        let config = complete_builder().build().unwrap();

        assert_eq!(config.substrate.facet, Facet::Fcc100);
        assert_eq!(config.substrate.max_free_layer, 1);
        assert!(!config.substrate.relax);
        assert_eq!(config.conformers.axis, Axis::Z);
        assert_eq!(config.placement.reference, ReferencePoint::Atom(0));
        assert_eq!(config.relax, RelaxConfig::default());
    }

    #[test]
    fn missing_species_is_reported_by_name() {
        let result = AdsorptionConfigBuilder::new()
            .substrate_size(2, 2)
            .substrate_layers(2)
            .vacuum(5.0)
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("substrate_species")
        );
    }

    #[test]
    fn missing_molecule_is_reported() {
        let result = AdsorptionConfigBuilder::new()
            .substrate_species("Cu")
            .substrate_size(2, 2)
            .substrate_layers(2)
            .vacuum(5.0)
            .build();

        assert_eq!(result.unwrap_err(), ConfigError::MissingParameter("molecule"));
    }

    #[test]
    fn empty_angle_list_is_rejected() {
        let result = complete_builder().angles_degrees(vec![]).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "angles_degrees",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_force_threshold_is_rejected() {
        let relax = RelaxConfig {
            max_force: 0.0,
            ..RelaxConfig::default()
        };
        let result = complete_builder().relax(relax).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "max_force",
                ..
            })
        ));
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("BFGS".parse::<Algorithm>(), Ok(Algorithm::Bfgs));
        assert_eq!("fire".parse::<Algorithm>(), Ok(Algorithm::Fire));
        assert!("lbfgs".parse::<Algorithm>().is_err());
    }
}
