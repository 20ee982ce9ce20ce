//! Minimal PDB text handling.
//!
//! The prediction endpoint stores the per-residue plDDT confidence score
//! in the B-factor field of each atom record, so the mean confidence of a
//! prediction is the mean B-factor over all atoms. This module extracts
//! that score, summarizes the structure for display, and writes the PDB
//! text to disk. Nothing here parses coordinates; rendering is not this
//! crate's job.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fixed filename offered for downloaded structures.
pub const DEFAULT_OUTPUT: &str = "predicted.pdb";

/// B-factor field of an atom record (PDB columns 61-66).
const B_FACTOR_COLUMNS: std::ops::Range<usize> = 60..66;

/// Returns true for lines that describe an atom.
fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Mean plDDT over all atom records, rounded to 4 decimals.
///
/// Returns `None` when the text contains no parseable atom records, which
/// is presented as "n/a" rather than an error.
pub fn mean_plddt(pdb: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u64;

    for line in pdb.lines() {
        if !is_atom_record(line) {
            continue;
        }
        let Some(field) = line.get(B_FACTOR_COLUMNS) else {
            continue;
        };
        if let Ok(value) = field.trim().parse::<f64>() {
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some((sum / count as f64 * 10_000.0).round() / 10_000.0)
}

/// Structure counts shown in the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureSummary {
    pub atoms: usize,
    pub residues: usize,
    pub chains: usize,
}

/// Counts atoms, residues and chains from the fixed-column fields.
pub fn summarize(pdb: &str) -> StructureSummary {
    let mut summary = StructureSummary::default();
    let mut last_residue: Option<(char, String)> = None;
    let mut chains: Vec<char> = Vec::new();

    for line in pdb.lines() {
        if !is_atom_record(line) {
            continue;
        }
        summary.atoms += 1;

        // Chain id is column 22, residue number columns 23-26
        let chain = line.chars().nth(21).unwrap_or(' ');
        let residue = line.get(22..26).unwrap_or("").trim().to_string();

        if !chains.contains(&chain) {
            chains.push(chain);
        }
        let key = (chain, residue);
        if last_residue.as_ref() != Some(&key) {
            summary.residues += 1;
            last_residue = Some(key);
        }
    }

    summary.chains = chains.len();
    summary
}

/// Writes PDB text to a file.
pub fn save_pdb<P: AsRef<Path>>(pdb: &str, path: P) -> io::Result<()> {
    fs::write(path, pdb)
}

/// Output path for the `index`-th of `total` predictions.
///
/// A single prediction keeps the path as given; with several, an index is
/// inserted before the extension so files do not overwrite each other.
pub fn indexed_path(path: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("predicted");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index + 1, ext),
        None => format!("{}_{}", stem, index + 1),
    };
    path.with_file_name(name)
}
