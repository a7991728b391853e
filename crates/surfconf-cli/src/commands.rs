pub mod adsorb;
