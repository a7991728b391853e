/// Values used when neither the command line nor the config file sets a parameter.
///
/// They reproduce the reference run: butane on a 6x6x4 Ag(100) slab with 10 Å of
/// vacuum, three conformers about z, placed 2 Å above the surface.
pub struct DefaultsConfig {
    pub substrate_species: &'static str,
    pub substrate_size: [usize; 2],
    pub substrate_layers: usize,
    pub vacuum: f64,
    pub facet: &'static str,
    pub max_free_layer: u32,
    pub molecule: &'static str,
    pub angles: [f64; 3],
    pub axis: &'static str,
    pub height: f64,
    pub reference: &'static str,
    pub fmax: f64,
    pub max_iterations: usize,
    pub algorithm: &'static str,
    pub max_step: f64,
    pub output_prefix: &'static str,
    pub format: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            substrate_species: "Ag",
            substrate_size: [6, 6],
            substrate_layers: 4,
            vacuum: 10.0,
            facet: "fcc100",
            max_free_layer: 1,
            molecule: "butane",
            angles: [0.0, 120.0, 240.0],
            axis: "z",
            height: 2.0,
            reference: "atom:0",
            fmax: 0.05,
            max_iterations: 1000,
            algorithm: "bfgs",
            max_step: 0.2,
            output_prefix: "silver_butane",
            format: "cif",
        }
    }
}
