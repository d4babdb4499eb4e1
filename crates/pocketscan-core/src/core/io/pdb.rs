use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{AtomRecord, ModelError};
use crate::core::models::protein::Protein;
use crate::core::utils::identifiers::{infer_element, is_amino_acid, is_heavy_element};
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Invalid atom record on line {line}: {source}")]
    InvalidAtom {
        line: usize,
        #[source]
        source: ModelError,
    },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must reach column 54)")]
    LineTooShort,
}

const MIN_ATOM_LINE_LEN: usize = 54;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
) -> Result<f64, PdbError> {
    let raw = slice_and_trim(line, start, end);
    raw.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: raw.into(),
        },
    })
}

/// Reader for fixed-column PDB files.
///
/// Only the first model is read. Waters, ligands and hydrogens are skipped, so the result
/// holds the protein's heavy atoms only. Of an atom's alternate locations, the first one in
/// the file is kept whatever its label.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Protein, Self::Error> {
        let mut atoms = Vec::new();
        let mut skipped = 0usize;
        let mut alt_located: HashSet<(String, isize, String, String)> = HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {}
                "ENDMDL" => break,
                _ => continue,
            }

            if line.len() < MIN_ATOM_LINE_LEN {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let residue_name = slice_and_trim(&line, 17, 20);
            if !is_amino_acid(residue_name) {
                skipped += 1;
                continue;
            }

            let atom_name = slice_and_trim(&line, 12, 16);
            let element = match slice_and_trim(&line, 76, 78) {
                "" => infer_element(atom_name).unwrap_or_default(),
                symbol => symbol.to_string(),
            };
            if !is_heavy_element(&element) {
                skipped += 1;
                continue;
            }

            let chain_id = line.get(21..22).unwrap_or(" ");
            let res_seq_str = slice_and_trim(&line, 22, 26);
            let residue_number: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidInt {
                    columns: "23-26".into(),
                    value: res_seq_str.into(),
                },
            })?;

            let alt_loc = line.get(16..17).unwrap_or(" ");
            if alt_loc != " "
                && !alt_located.insert((
                    chain_id.to_string(),
                    residue_number,
                    residue_name.to_string(),
                    atom_name.to_string(),
                ))
            {
                skipped += 1;
                continue;
            }

            let x = parse_coordinate(&line, line_num, 30, 38)?;
            let y = parse_coordinate(&line, line_num, 38, 46)?;
            let z = parse_coordinate(&line, line_num, 46, 54)?;

            let atom = AtomRecord::new(
                chain_id,
                residue_number,
                residue_name,
                atom_name,
                &element,
                Point3::new(x, y, z),
            )
            .map_err(|source| PdbError::InvalidAtom {
                line: line_num,
                source,
            })?;
            atoms.push(atom);
        }

        debug!(atoms = atoms.len(), skipped, "Parsed PDB records.");
        Ok(Protein::new(atoms))
    }
}
