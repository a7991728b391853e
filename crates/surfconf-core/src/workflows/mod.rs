//! # Workflows Module
//!
//! End-to-end procedures built from the [`engine`](crate::engine) pieces.
//!
//! - **Adsorption Workflow** ([`adsorb`]) - builds a constrained slab and a molecule,
//!   relaxes the molecule, relaxes each rotated conformer and places it on the slab.
//!   Writing the merged structures is left to the caller through
//!   [`adsorb::AdsorptionResult::write_all`].

pub mod adsorb;
