//! Substrate construction.
//!
//! [`slab`] stacks fcc surface layers into periodic slabs with vacuum padding and tags
//! every atom with its depth layer; [`elements`] supplies the per-species constants the
//! builders and the default pair potential need.

pub mod elements;
pub mod slab;
