//! # surfconf Core Library
//!
//! Builds layered crystal surfaces, relaxes a small molecule and its rotated conformers
//! under a pluggable interatomic potential, and places each conformer onto the surface.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Cell`), slab and
//!   molecule builders, layer constraints, the `Potential` oracle trait with a
//!   Lennard-Jones implementation, and structure file writers.
//!
//! - **[`engine`]: The Logic Core.** Minimizers (BFGS, FIRE), conformer generation,
//!   adsorption placement, configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the complete
//!   adsorption procedure.

pub mod core;
pub mod engine;
pub mod workflows;
