use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CUTOFF: f64 = 8.0;

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GlobalParams {
    /// Pair interaction cutoff in Angstroms.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PairParam {
    /// Lennard-Jones sigma in Angstroms.
    pub sigma: f64,
    /// Lennard-Jones well depth in eV.
    pub epsilon: f64,
}

/// Lennard-Jones parameter set. Species absent from `species` fall back to the
/// built-in element table.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct LennardJonesParams {
    #[serde(default)]
    pub globals: GlobalParams,
    #[serde(default)]
    pub species: HashMap<String, PairParam>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid cutoff {value} in '{path}': must be finite and positive")]
    InvalidCutoff { path: String, value: f64 },
}

impl LennardJonesParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let params: Self = toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let cutoff = params.globals.cutoff;
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(ParamLoadError::InvalidCutoff {
                path: path.to_string_lossy().to_string(),
                value: cutoff,
            });
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            [globals]
            cutoff = 6.5

            [species.Ag]
            sigma = 2.65
            epsilon = 0.35

            [species.C]
            sigma = 3.4
            epsilon = 0.004
            "#
        )
        .unwrap();

        let params = LennardJonesParams::load(&file_path).unwrap();

        assert_eq!(params.globals.cutoff, 6.5);
        assert_eq!(params.species.len(), 2);
        assert_eq!(
            params.species["Ag"],
            PairParam {
                sigma: 2.65,
                epsilon: 0.35
            }
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let params: LennardJonesParams = toml::from_str("").unwrap();

        assert_eq!(params.globals.cutoff, DEFAULT_CUTOFF);
        assert!(params.species.is_empty());
    }

    #[test]
    fn returns_io_error_for_nonexistent_file() {
        let result = LennardJonesParams::load(Path::new("nonexistent_lj_params.toml"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn returns_toml_error_for_incomplete_species_entry() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        std::fs::write(&file_path, "[species.Ag]\nsigma = 2.65\n").unwrap();

        let result = LennardJonesParams::load(&file_path);

        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn rejects_zero_negative_and_nan_cutoffs() {
        let dir = tempdir().unwrap();
        for (name, value) in [("zero", "0.0"), ("negative", "-3.0"), ("nan", "nan")] {
            let file_path = dir.path().join(format!("{name}.toml"));
            std::fs::write(&file_path, format!("[globals]\ncutoff = {value}\n")).unwrap();

            let result = LennardJonesParams::load(&file_path);

            assert!(
                matches!(result, Err(ParamLoadError::InvalidCutoff { .. })),
                "cutoff = {value} was accepted"
            );
        }
    }
}
