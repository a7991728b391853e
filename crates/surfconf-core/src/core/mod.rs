//! # Core Module
//!
//! Stateless building blocks of the adsorption pipeline: structure data models, slab
//! construction, constraint masks, energy/force oracles and structure file I/O.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, periodic cells and structures
//! - **Substrate Construction** ([`lattice`]) - Layered fcc slabs and element data
//! - **Constraints** ([`constraints`]) - Pure layer-tag to frozen-mask derivation
//! - **Energy Models** ([`potential`]) - The oracle trait and a Lennard-Jones implementation
//! - **File I/O** ([`io`]) - CIF and extended XYZ writers, XYZ reader
//! - **Geometry Helpers** ([`utils`]) - Rotations and coordinate comparisons
//!
//! Nothing in this layer holds optimization state; the [`crate::engine`] layer drives
//! these pieces.

pub mod constraints;
pub mod io;
pub mod lattice;
pub mod models;
pub mod potential;
pub mod utils;
