use super::elements::element;
use crate::core::models::atom::Atom;
use crate::core::models::builder::BuildError;
use crate::core::models::cell::Cell;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};
use std::str::FromStr;
use tracing::debug;

// In-plane offsets of successive layers, in units of the surface lattice vectors.
static FCC100_STACKING: [(f64, f64); 2] = [(0.0, 0.0), (0.5, 0.5)];
static FCC111_STACKING: [(f64, f64); 3] = [(0.0, 0.0), (1.0 / 3.0, 1.0 / 3.0), (2.0 / 3.0, 2.0 / 3.0)];

/// Surface orientation of an fcc slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet {
    /// Square surface net, ABAB stacking.
    #[default]
    Fcc100,
    /// Hexagonal surface net, ABC stacking.
    Fcc111,
}

impl FromStr for Facet {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcc100" | "100" => Ok(Facet::Fcc100),
            "fcc111" | "111" => Ok(Facet::Fcc111),
            _ => Err(()),
        }
    }
}

/// Builds layered fcc slabs with vacuum above the top layer.
///
/// The bottom layer sits at `z = 0`; layers are tagged from the top (`1`) downwards.
/// Atoms are emitted layer by layer starting at the bottom. The cell is periodic
/// along x and y only.
#[derive(Debug, Clone)]
pub struct SlabBuilder {
    species: String,
    size: (usize, usize),
    layers: usize,
    vacuum: f64,
    facet: Facet,
    lattice_constant: Option<f64>,
}

impl SlabBuilder {
    pub fn new(species: &str) -> Self {
        Self {
            species: species.to_string(),
            size: (1, 1),
            layers: 1,
            vacuum: 0.0,
            facet: Facet::default(),
            lattice_constant: None,
        }
    }

    pub fn size(mut self, nx: usize, ny: usize) -> Self {
        self.size = (nx, ny);
        self
    }
    pub fn layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }
    pub fn vacuum(mut self, vacuum: f64) -> Self {
        self.vacuum = vacuum;
        self
    }
    pub fn facet(mut self, facet: Facet) -> Self {
        self.facet = facet;
        self
    }
    /// Overrides the tabulated lattice constant.
    pub fn lattice_constant(mut self, a: f64) -> Self {
        self.lattice_constant = Some(a);
        self
    }

    pub fn build(self) -> Result<Structure, BuildError> {
        let (nx, ny) = self.size;
        if nx == 0 || ny == 0 {
            return Err(BuildError::InvalidDimension {
                name: "lateral_size",
            });
        }
        if self.layers == 0 {
            return Err(BuildError::InvalidDimension {
                name: "layer_count",
            });
        }
        if !self.vacuum.is_finite() || self.vacuum < 0.0 {
            return Err(BuildError::InvalidParameter {
                name: "vacuum",
                value: self.vacuum,
            });
        }
        let a = match self.lattice_constant {
            Some(a) => a,
            None => element(&self.species)
                .and_then(|e| e.fcc_lattice_constant)
                .ok_or_else(|| BuildError::UnknownSpecies(self.species.clone()))?,
        };
        if !a.is_finite() || a <= 0.0 {
            return Err(BuildError::InvalidParameter {
                name: "lattice_constant",
                value: a,
            });
        }

        let d = a / 2f64.sqrt();
        let (a1, a2, spacing, stacking): (Vector3<f64>, Vector3<f64>, f64, &[(f64, f64)]) =
            match self.facet {
                Facet::Fcc100 => (
                    Vector3::new(d, 0.0, 0.0),
                    Vector3::new(0.0, d, 0.0),
                    a / 2.0,
                    FCC100_STACKING.as_slice(),
                ),
                Facet::Fcc111 => (
                    Vector3::new(d, 0.0, 0.0),
                    Vector3::new(d / 2.0, d * 3f64.sqrt() / 2.0, 0.0),
                    a / 3f64.sqrt(),
                    FCC111_STACKING.as_slice(),
                ),
            };

        let mut atoms = Vec::with_capacity(nx * ny * self.layers);
        for k in 0..self.layers {
            let (ox, oy) = stacking[k % stacking.len()];
            let z = k as f64 * spacing;
            let tag = (self.layers - k) as u32;
            for j in 0..ny {
                for i in 0..nx {
                    let lateral = a1 * (i as f64 + ox) + a2 * (j as f64 + oy);
                    let position = Point3::new(lateral.x, lateral.y, z);
                    atoms.push(Atom::with_layer(&self.species, position, tag));
                }
            }
        }

        let height = (self.layers - 1) as f64 * spacing + self.vacuum;
        let cell = Cell::new(
            a1 * nx as f64,
            a2 * ny as f64,
            Vector3::new(0.0, 0.0, height),
            [true, true, false],
        );

        debug!(
            "Built {:?} {} slab: {}x{}x{} ({} atoms, a = {:.3} Å, vacuum = {:.2} Å)",
            self.facet,
            self.species,
            nx,
            ny,
            self.layers,
            atoms.len(),
            a,
            self.vacuum
        );
        Ok(Structure::from_atoms(atoms, Some(cell)))
    }
}

/// Builds an fcc(100) substrate of `species` with tabulated lattice constant.
///
/// # Arguments
///
/// * `species` - Element symbol of the substrate metal.
/// * `lateral_size` - Number of surface unit cells along x and y.
/// * `layer_count` - Number of atomic layers.
/// * `vacuum` - Empty space above the top layer, in Angstroms.
///
/// # Errors
///
/// Returns a [`BuildError`] for unknown species, zero sizes or invalid vacuum.
pub fn build_substrate(
    species: &str,
    lateral_size: (usize, usize),
    layer_count: usize,
    vacuum: f64,
) -> Result<Structure, BuildError> {
    SlabBuilder::new(species)
        .size(lateral_size.0, lateral_size.1)
        .layers(layer_count)
        .vacuum(vacuum)
        .build()
}
