use super::error::EngineError;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::rotation_from_axis_angle;
use nalgebra::Vector3;
use std::str::FromStr;
use tracing::debug;

/// Rotation axis for conformer generation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
    Custom(Vector3<f64>),
}

impl Axis {
    pub fn vector(&self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
            Axis::Custom(v) => *v,
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => {
                let components = other
                    .split(',')
                    .map(|c| c.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| format!("invalid axis component in '{s}': {e}"))?;
                match components.as_slice() {
                    [x, y, z] => Ok(Axis::Custom(Vector3::new(*x, *y, *z))),
                    _ => Err(format!(
                        "axis '{s}' must be x, y, z or three comma-separated numbers"
                    )),
                }
            }
        }
    }
}

/// A rotated copy of the input molecule.
///
/// Each conformer owns its own [`Structure`], so relaxing one never moves the atoms of
/// another or of the molecule it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    /// 1-based position in the generated set.
    pub index: usize,
    pub angle_degrees: f64,
    pub structure: Structure,
}

/// Produces one rigidly rotated copy of `molecule` per angle.
///
/// Rotations are about `axis` through the molecule's centroid, so the centroid does not
/// move. Output order follows `angles_degrees`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] for a molecule without atoms and
/// [`EngineError::InvalidAxis`] for a zero-length custom axis.
pub fn generate(
    molecule: &Structure,
    angles_degrees: &[f64],
    axis: Axis,
) -> Result<Vec<Conformer>, EngineError> {
    let center = molecule.centroid().ok_or(EngineError::EmptyStructure {
        operation: "generate conformers",
    })?;
    let axis_vector = axis.vector();

    angles_degrees
        .iter()
        .enumerate()
        .map(|(i, &angle)| {
            let rotation =
                rotation_from_axis_angle(&axis_vector, angle).ok_or(EngineError::InvalidAxis)?;
            let mut structure = molecule.clone();
            structure.rotate_about(&rotation, &center);
            debug!(index = i + 1, angle, "Generated conformer");
            Ok(Conformer {
                index: i + 1,
                angle_degrees: angle,
                structure,
            })
        })
        .collect()
}
