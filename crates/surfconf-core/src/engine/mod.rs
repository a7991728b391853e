//! # Engine Module
//!
//! The stateful layer of the pipeline. Everything here works on [`Structure`](crate::core::models::structure::Structure)
//! values built by [`core`](crate::core) and consults a
//! [`Potential`](crate::core::potential::Potential) passed in by the caller.
//!
//! - **Relaxation** ([`optimizer`]) - BFGS and FIRE minimizers behind a single `relax` entry point
//! - **Conformers** ([`conformers`]) - rigid rotations of a molecule about its centroid
//! - **Placement** ([`adsorption`]) - adsorption-site arithmetic and substrate/adsorbate merging
//! - **Configuration** ([`config`]) - parameters and builders for the full adsorption run
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events
//! - **Error Handling** ([`error`]) - the engine error type

pub mod adsorption;
pub mod config;
pub mod conformers;
pub mod error;
pub mod optimizer;
pub mod progress;
