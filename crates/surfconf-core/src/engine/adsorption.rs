use super::error::EngineError;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};

/// Lateral placement point on the substrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsorptionSite {
    pub x: f64,
    pub y: f64,
}

/// The point of a conformer that is moved onto the adsorption site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePoint {
    Atom(usize),
    Centroid,
}

impl Default for ReferencePoint {
    fn default() -> Self {
        ReferencePoint::Atom(0)
    }
}

/// Midpoint of the substrate's x and y extents.
pub fn compute_site(substrate: &Structure) -> Result<AdsorptionSite, EngineError> {
    let empty = || EngineError::EmptyStructure {
        operation: "compute adsorption site",
    };
    let (x_min, x_max) = substrate.extent(0).ok_or_else(empty)?;
    let (y_min, y_max) = substrate.extent(1).ok_or_else(empty)?;
    Ok(AdsorptionSite {
        x: 0.5 * (x_min + x_max),
        y: 0.5 * (y_min + y_max),
    })
}

fn reference_position(
    conformer: &Structure,
    reference: ReferencePoint,
) -> Result<Point3<f64>, EngineError> {
    match reference {
        ReferencePoint::Atom(index) => conformer
            .atom(index)
            .map(|atom| atom.position)
            .ok_or(EngineError::InvalidReference {
                index,
                len: conformer.len(),
            }),
        ReferencePoint::Centroid => conformer.centroid().ok_or(EngineError::EmptyStructure {
            operation: "place conformer",
        }),
    }
}

/// Merges a translated copy of `conformer` into a copy of `substrate`.
///
/// The conformer's reference point lands at `(site.x, site.y, top_z + height)`, where
/// `top_z` is the highest substrate z coordinate. The result keeps the substrate cell,
/// lists substrate atoms first and leaves both inputs untouched.
pub fn place(
    substrate: &Structure,
    conformer: &Structure,
    site: AdsorptionSite,
    height: f64,
    reference: ReferencePoint,
) -> Result<Structure, EngineError> {
    let top_z = substrate.top_z().ok_or(EngineError::EmptyStructure {
        operation: "place conformer",
    })?;
    if conformer.is_empty() {
        return Err(EngineError::EmptyStructure {
            operation: "place conformer",
        });
    }
    let anchor = reference_position(conformer, reference)?;
    let offset = Vector3::new(site.x, site.y, top_z + height) - anchor.coords;

    let mut adsorbate = conformer.clone();
    adsorbate.translate(&offset);
    Ok(Structure::concatenated(substrate, adsorbate.atoms().iter().cloned()))
}
