//! # Core Models Module
//!
//! Data structures describing atomic configurations: single atoms, periodic cells and
//! whole structures (slabs, molecules and the merged adsorption systems built from them).
//!
//! ## Key Components
//!
//! - [`atom`] - Species label, position, layer tag and frozen flag of one atom
//! - [`cell`] - Periodic cell vectors, periodicity flags and coordinate conversions
//! - [`structure`] - Ordered atom collection with rigid-body transforms and extents
//! - [`builder`] - Validated construction of free molecules and named presets
//!
//! ## Usage
//!
//! ```ignore
//! use surfconf::core::models::builder::build_molecule;
//! use nalgebra::Point3;
//!
//! let co = build_molecule(&["C", "O"], &[Point3::origin(), Point3::new(1.13, 0.0, 0.0)])?;
//! assert_eq!(co.len(), 2);
//! ```

pub mod atom;
pub mod builder;
pub mod cell;
pub mod structure;
