use super::traits::StructureFile;
use crate::core::models::structure::Structure;
use std::collections::HashMap;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CIF output requires a periodic cell, but the structure has none")]
    MissingCell,
    #[error("Cell is degenerate; fractional coordinates are undefined")]
    DegenerateCell,
}

/// Crystallographic Information File writer (P1, fractional coordinates).
pub struct CifFile;

impl StructureFile for CifFile {
    const EXTENSION: &'static str = "cif";
    type Error = CifError;

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        let cell = structure.cell().ok_or(CifError::MissingCell)?;
        let [a, b, c] = cell.lengths();
        let [alpha, beta, gamma] = cell.angles();

        let formula = structure.formula();
        let data_name = if formula.is_empty() { "structure" } else { &formula };
        writeln!(writer, "data_{}", data_name)?;
        writeln!(writer, "_chemical_formula_sum '{}'", formula)?;
        writeln!(writer)?;
        writeln!(writer, "_cell_length_a       {:.5}", a)?;
        writeln!(writer, "_cell_length_b       {:.5}", b)?;
        writeln!(writer, "_cell_length_c       {:.5}", c)?;
        writeln!(writer, "_cell_angle_alpha    {:.5}", alpha)?;
        writeln!(writer, "_cell_angle_beta     {:.5}", beta)?;
        writeln!(writer, "_cell_angle_gamma    {:.5}", gamma)?;
        writeln!(writer)?;
        writeln!(writer, "_space_group_name_H-M_alt    'P 1'")?;
        writeln!(writer, "_space_group_IT_number       1")?;
        writeln!(writer)?;
        writeln!(writer, "loop_")?;
        writeln!(writer, "  _space_group_symop_operation_xyz")?;
        writeln!(writer, "  'x, y, z'")?;
        writeln!(writer)?;
        writeln!(writer, "loop_")?;
        writeln!(writer, "  _atom_site_type_symbol")?;
        writeln!(writer, "  _atom_site_label")?;
        writeln!(writer, "  _atom_site_symmetry_multiplicity")?;
        writeln!(writer, "  _atom_site_fract_x")?;
        writeln!(writer, "  _atom_site_fract_y")?;
        writeln!(writer, "  _atom_site_fract_z")?;
        writeln!(writer, "  _atom_site_occupancy")?;

        let mut label_counts: HashMap<&str, usize> = HashMap::new();
        for atom in structure.atoms() {
            let frac = cell
                .to_fractional(&atom.position)
                .ok_or(CifError::DegenerateCell)?;
            let count = label_counts.entry(atom.species.as_str()).or_insert(0);
            *count += 1;
            writeln!(
                writer,
                "  {:<3} {:<7} 1.0  {:>9.5}  {:>9.5}  {:>9.5}  1.0000",
                atom.species,
                format!("{}{}", atom.species, count),
                frac.x,
                frac.y,
                frac.z
            )?;
        }
        Ok(())
    }
}
