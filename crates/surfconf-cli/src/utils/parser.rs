use std::path::PathBuf;
use surfconf::core::io::OutputFormat;
use surfconf::core::lattice::slab::Facet;
use surfconf::core::models::builder::MoleculePreset;
use surfconf::engine::adsorption::ReferencePoint;
use surfconf::engine::config::Algorithm;
use surfconf::engine::conformers::Axis;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown output format '{0}'. Expected 'cif' or 'xyz'.")]
    UnknownFormat(String),

    #[error("Unknown algorithm '{0}'. Expected 'bfgs' or 'fire'.")]
    UnknownAlgorithm(String),

    #[error("Unknown facet '{0}'. Expected 'fcc100' or 'fcc111'.")]
    UnknownFacet(String),

    #[error("Invalid rotation axis: {0}")]
    InvalidAxis(String),

    #[error("Invalid reference point '{0}'. Expected 'centroid' or 'atom:<index>'.")]
    InvalidReference(String),

    #[error("Unknown molecule '{0}'. Expected a preset name (e.g. 'butane') or a path to an .xyz file.")]
    UnknownMolecule(String),
}

/// A molecule named on the command line or in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoleculeSpec {
    Preset(MoleculePreset),
    File(PathBuf),
}

pub fn parse_format(s: &str) -> Result<OutputFormat, ParseError> {
    s.parse()
        .map_err(|_| ParseError::UnknownFormat(s.to_string()))
}

pub fn parse_algorithm(s: &str) -> Result<Algorithm, ParseError> {
    s.parse()
        .map_err(|_| ParseError::UnknownAlgorithm(s.to_string()))
}

pub fn parse_facet(s: &str) -> Result<Facet, ParseError> {
    s.parse().map_err(|_| ParseError::UnknownFacet(s.to_string()))
}

pub fn parse_axis(s: &str) -> Result<Axis, ParseError> {
    s.parse().map_err(ParseError::InvalidAxis)
}

pub fn parse_reference(s: &str) -> Result<ReferencePoint, ParseError> {
    let trimmed = s.trim().to_ascii_lowercase();
    if trimmed == "centroid" {
        return Ok(ReferencePoint::Centroid);
    }
    trimmed
        .strip_prefix("atom:")
        .and_then(|index| index.trim().parse().ok())
        .map(ReferencePoint::Atom)
        .ok_or_else(|| ParseError::InvalidReference(s.to_string()))
}

pub fn parse_molecule(s: &str) -> Result<MoleculeSpec, ParseError> {
    if let Some(preset) = MoleculePreset::from_name(s) {
        return Ok(MoleculeSpec::Preset(preset));
    }
    let is_xyz = s.to_ascii_lowercase().ends_with(".xyz");
    if is_xyz || s.contains(['/', '\\']) {
        return Ok(MoleculeSpec::File(PathBuf::from(s)));
    }
    Err(ParseError::UnknownMolecule(s.to_string()))
}
