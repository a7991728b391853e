use super::traits::{StructureFile, StructureReader};
use crate::core::models::atom::Atom;
use crate::core::models::cell::Cell;
use crate::core::models::structure::Structure;
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const EXTENDED_PROPERTIES: &str = "species:S:1:pos:R:3:tags:I:1:frozen:L:1";

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Invalid float '{0}'")]
    InvalidFloat(String),
    #[error("Atom line needs a species and three coordinates")]
    LineTooShort,
    #[error("Lattice must contain nine numbers")]
    InvalidLattice,
}

/// Plain and extended XYZ.
///
/// Periodic structures get an extended comment line with `Lattice` and `pbc`, and
/// each atom line carries its layer tag (`0` when untagged) and frozen flag.
pub struct XyzFile;

impl StructureFile for XyzFile {
    const EXTENSION: &'static str = "xyz";
    type Error = XyzError;

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.len())?;
        match structure.cell() {
            Some(cell) => {
                let lattice: Vec<String> = (0..3)
                    .flat_map(|i| {
                        let v = cell.vector(i);
                        [v.x, v.y, v.z]
                    })
                    .map(|x| format!("{:.8}", x))
                    .collect();
                let pbc: Vec<&str> = cell
                    .pbc()
                    .iter()
                    .map(|&p| if p { "T" } else { "F" })
                    .collect();
                writeln!(
                    writer,
                    "Lattice=\"{}\" Properties={} pbc=\"{}\"",
                    lattice.join(" "),
                    EXTENDED_PROPERTIES,
                    pbc.join(" ")
                )?;
            }
            None => writeln!(writer, "Properties={}", EXTENDED_PROPERTIES)?,
        }
        for atom in structure.atoms() {
            writeln!(
                writer,
                "{:<3} {:>15.8} {:>15.8} {:>15.8} {:>4} {}",
                atom.species,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.layer.unwrap_or(0),
                if atom.frozen { "T" } else { "F" }
            )?;
        }
        Ok(())
    }
}

fn quoted_value<'a>(comment: &'a str, key: &str) -> Option<&'a str> {
    let start = comment.find(&format!("{key}=\""))? + key.len() + 2;
    let len = comment[start..].find('"')?;
    Some(&comment[start..start + len])
}

fn parse_float(token: &str, line: usize) -> Result<f64, XyzError> {
    token.parse().map_err(|_| XyzError::Parse {
        line,
        kind: XyzParseErrorKind::InvalidFloat(token.to_string()),
    })
}

fn parse_cell(comment: &str, line: usize) -> Result<Option<Cell>, XyzError> {
    let Some(lattice) = quoted_value(comment, "Lattice") else {
        return Ok(None);
    };
    let values = lattice
        .split_whitespace()
        .map(|t| parse_float(t, line))
        .collect::<Result<Vec<f64>, _>>()?;
    if values.len() != 9 {
        return Err(XyzError::Parse {
            line,
            kind: XyzParseErrorKind::InvalidLattice,
        });
    }
    let pbc = match quoted_value(comment, "pbc") {
        Some(flags) => {
            let mut pbc = [false; 3];
            for (slot, flag) in pbc.iter_mut().zip(flags.split_whitespace()) {
                *slot = matches!(flag, "T" | "True" | "true" | "1");
            }
            pbc
        }
        None => [true; 3],
    };
    let v = |i: usize| Vector3::new(values[3 * i], values[3 * i + 1], values[3 * i + 2]);
    Ok(Some(Cell::new(v(0), v(1), v(2), pbc)))
}

impl StructureReader for XyzFile {
    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines
            .next()
            .ok_or_else(|| XyzError::MissingRecord("atom count".into()))??;
        let count: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidCount(count_line.trim().to_string()),
        })?;
        let comment = lines
            .next()
            .ok_or_else(|| XyzError::MissingRecord("comment line".into()))??;
        let cell = parse_cell(&comment, 2)?;
        let extended = comment.contains(EXTENDED_PROPERTIES);

        // The header count is untrusted until the atom lines are actually read.
        let mut atoms = Vec::new();
        for index in 0..count {
            let line_num = index + 3;
            let line = lines
                .next()
                .ok_or_else(|| XyzError::MissingRecord(format!("atom {}", index + 1)))??;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::LineTooShort,
                });
            }
            let position = Point3::new(
                parse_float(fields[1], line_num)?,
                parse_float(fields[2], line_num)?,
                parse_float(fields[3], line_num)?,
            );
            let mut atom = Atom::new(fields[0], position);
            if extended && fields.len() >= 6 {
                atom.layer = fields[4].parse::<u32>().ok().filter(|&t| t > 0);
                atom.frozen = fields[5] == "T";
            }
            atoms.push(atom);
        }
        Ok(Structure::from_atoms(atoms, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraints::freeze_below;
    use crate::core::lattice::slab::build_substrate;
    use crate::core::models::builder::build_molecule;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TOLERANCE: f64 = 1e-7;

    fn read_str(content: &str) -> Result<Structure, XyzError> {
        XyzFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_plain_xyz_molecule() {
        let structure = read_str("3\nwater\nO 0.0 0.0 0.0\nH 0.96 0.0 0.0\nH -0.24 0.93 0.0\n")
            .unwrap();

        assert_eq!(structure.len(), 3);
        assert!(structure.cell().is_none());
        assert_eq!(structure.species().collect::<Vec<_>>(), vec!["O", "H", "H"]);
        assert_eq!(structure.atoms()[1].position, Point3::new(0.96, 0.0, 0.0));
        assert!(structure.atoms().iter().all(|a| a.layer.is_none()));
    }

    #[test]
    fn written_slab_reads_back_with_cell_tags_and_constraints() {
        let mut slab = build_substrate("Ag", (2, 2), 3, 6.0).unwrap();
        freeze_below(&mut slab, 1);
        let mut buffer = Vec::new();
        XyzFile::write_to(&slab, &mut buffer).unwrap();

        let back = XyzFile::read_from(&mut Cursor::new(buffer)).unwrap();

        assert_eq!(back.len(), slab.len());
        let cell = back.cell().unwrap();
        assert_eq!(cell.pbc(), [true, true, false]);
        for axis in 0..3 {
            assert!((cell.lengths()[axis] - slab.cell().unwrap().lengths()[axis]).abs() < TOLERANCE);
        }
        assert_eq!(back.layer_tags(), slab.layer_tags());
        assert_eq!(back.free_atom_indices(), slab.free_atom_indices());
    }

    #[test]
    fn molecule_output_has_no_lattice() {
        let molecule = build_molecule(&["C", "O"], &[Point3::origin(), Point3::new(1.13, 0.0, 0.0)])
            .unwrap();
        let mut buffer = Vec::new();

        XyzFile::write_to(&molecule, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("2"));
        assert!(!lines.next().unwrap().contains("Lattice"));
    }

    #[test]
    fn invalid_count_is_reported_on_first_line() {
        assert!(matches!(
            read_str("two\n\nC 0 0 0\n"),
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidCount(_)
            })
        ));
    }

    #[test]
    fn truncated_file_reports_missing_atom() {
        assert!(matches!(
            read_str("2\ncomment\nC 0 0 0\n"),
            Err(XyzError::MissingRecord(_))
        ));
    }

    #[test]
    fn oversized_count_reports_missing_atom_instead_of_allocating() {
        assert!(matches!(
            read_str("18446744073709551615\ncomment\nC 0 0 0\n"),
            Err(XyzError::MissingRecord(record)) if record == "atom 2"
        ));
    }

    #[test]
    fn bad_coordinate_reports_line_number() {
        assert!(matches!(
            read_str("1\ncomment\nC 0.0 x 0.0\n"),
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidFloat(_)
            })
        ));
    }

    #[test]
    fn short_lattice_is_rejected() {
        assert!(matches!(
            read_str("1\nLattice=\"1 0 0 0 1 0\"\nC 0 0 0\n"),
            Err(XyzError::Parse {
                line: 2,
                kind: XyzParseErrorKind::InvalidLattice
            })
        ));
    }

    #[test]
    fn read_from_path_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("co.xyz");
        let molecule = build_molecule(&["C", "O"], &[Point3::origin(), Point3::new(1.13, 0.0, 0.0)])
            .unwrap();

        XyzFile::write_to_path(&molecule, &path).unwrap();
        let back = XyzFile::read_from_path(&path).unwrap();

        assert_eq!(back.len(), 2);
        assert!((back.atoms()[1].position.x - 1.13).abs() < TOLERANCE);
    }
}
