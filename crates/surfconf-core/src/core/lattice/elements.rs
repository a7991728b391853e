use phf::{Map, phf_map};

/// Static per-species data used by the slab builders and the default pair potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    /// Experimental fcc lattice constant in Angstroms, for metals that crystallize fcc.
    pub fcc_lattice_constant: Option<f64>,
    /// Lennard-Jones sigma in Angstroms.
    pub lj_sigma: f64,
    /// Lennard-Jones well depth in eV.
    pub lj_epsilon: f64,
}

// Metal pair parameters follow the 12-6 fits of Heinz et al. (2008); organic elements use
// UFF van der Waals parameters converted to sigma/eV.
static ELEMENTS: Map<&'static str, ElementData> = phf_map! {
    "H" => ElementData { fcc_lattice_constant: None, lj_sigma: 2.571, lj_epsilon: 0.001_91 },
    "C" => ElementData { fcc_lattice_constant: None, lj_sigma: 3.431, lj_epsilon: 0.004_55 },
    "N" => ElementData { fcc_lattice_constant: None, lj_sigma: 3.261, lj_epsilon: 0.002_99 },
    "O" => ElementData { fcc_lattice_constant: None, lj_sigma: 3.118, lj_epsilon: 0.002_60 },
    "S" => ElementData { fcc_lattice_constant: None, lj_sigma: 3.595, lj_epsilon: 0.011_88 },
    "Al" => ElementData { fcc_lattice_constant: Some(4.05), lj_sigma: 2.606, lj_epsilon: 0.174 },
    "Ni" => ElementData { fcc_lattice_constant: Some(3.52), lj_sigma: 2.274, lj_epsilon: 0.245 },
    "Cu" => ElementData { fcc_lattice_constant: Some(3.61), lj_sigma: 2.331, lj_epsilon: 0.205 },
    "Pd" => ElementData { fcc_lattice_constant: Some(3.89), lj_sigma: 2.511, lj_epsilon: 0.267 },
    "Ag" => ElementData { fcc_lattice_constant: Some(4.09), lj_sigma: 2.633, lj_epsilon: 0.198 },
    "Pt" => ElementData { fcc_lattice_constant: Some(3.92), lj_sigma: 2.535, lj_epsilon: 0.338 },
    "Au" => ElementData { fcc_lattice_constant: Some(4.08), lj_sigma: 2.629, lj_epsilon: 0.229 },
    "Pb" => ElementData { fcc_lattice_constant: Some(4.95), lj_sigma: 3.176, lj_epsilon: 0.127 },
};

/// Looks up element data by symbol. The lookup is case-sensitive (`"Ag"`, not `"AG"`).
pub fn element(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.get(symbol)
}
