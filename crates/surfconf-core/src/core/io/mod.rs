//! Provides input/output functionality for structure file formats.
//!
//! Formats implement the [`traits::StructureFile`] trait (and [`traits::StructureReader`]
//! when they can be parsed back). [`OutputFormat`] selects a writer at runtime, and
//! [`conformer_file_name`] produces the per-conformer output names.

pub mod cif;
pub mod traits;
pub mod xyz;

use crate::core::models::structure::Structure;
use cif::{CifError, CifFile};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use traits::StructureFile;
use xyz::{XyzError, XyzFile};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Cif(#[from] CifError),
    #[error(transparent)]
    Xyz(#[from] XyzError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Cif,
    Xyz,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Cif => CifFile::EXTENSION,
            OutputFormat::Xyz => XyzFile::EXTENSION,
        }
    }

    pub fn write_to_path(self, structure: &Structure, path: &Path) -> Result<(), WriteError> {
        match self {
            OutputFormat::Cif => CifFile::write_to_path(structure, path)?,
            OutputFormat::Xyz => XyzFile::write_to_path(structure, path)?,
        }
        Ok(())
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cif" => Ok(OutputFormat::Cif),
            "xyz" | "extxyz" => Ok(OutputFormat::Xyz),
            _ => Err(()),
        }
    }
}

/// Builds `<prefix>_conformer_<index>.<extension>`. `index` is 1-based.
pub fn conformer_file_name(prefix: &Path, index: usize, extension: &str) -> PathBuf {
    let stem = prefix
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    prefix.with_file_name(format!("{stem}_conformer_{index}.{extension}"))
}
