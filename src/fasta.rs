//! FASTA input parser.
//!
//! This module converts raw FASTA text into an ordered list of sequences.
//! Header lines identify record boundaries but their content is discarded:
//! the prediction endpoint only consumes residues, so identifiers are never
//! stored or validated.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MGSSHHHHHH...
//! >another_sequence
//! MKTAYIAKQR...
//! ```
//!
//! Input with no header line at all is accepted and treated as a single
//! record, so pasted raw residues go through the same code path as an
//! uploaded file.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur while reading FASTA input.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read file: {0}")]
    Io(std::io::Error),

    #[error("Line {0} is not valid UTF-8")]
    Decode(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses FASTA content from a reader.
///
/// Returns the sequences in order of appearance. An empty input yields an
/// empty list; deciding whether that is an error is left to the caller
/// (the predict action reports it as "no usable sequence").
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current = String::new();
    let mut line_number = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = match line_result {
            Ok(line) => line,
            // BufRead::lines signals invalid UTF-8 as InvalidData
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(FastaError::Decode(line_number));
            }
            Err(e) => return Err(FastaError::Io(e)),
        };
        let line = line.trim();

        if line.starts_with('>') {
            // Record boundary. An empty accumulator means the previous
            // record had no residues and yields no entry.
            if !current.is_empty() {
                sequences.push(Sequence::new(std::mem::take(&mut current)));
            }
        } else {
            // Residue lines are concatenated without separator
            current.push_str(line);
        }
    }

    // Final record has no trailing header
    if !current.is_empty() {
        sequences.push(Sequence::new(current));
    }

    Ok(sequences)
}

/// Parses FASTA content from a string.
///
/// Used for the interactive input panel and for testing.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<Sequence>> {
    parse_fasta(content.as_bytes())
}

/// Parses a FASTA file and returns its sequences.
///
/// # Examples
///
/// ```no_run
/// use foldtui::fasta::parse_fasta_file;
///
/// let sequences = parse_fasta_file("proteins.fasta").unwrap();
/// println!("Loaded {} sequences", sequences.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<Sequence>> {
    let file = File::open(path).map_err(FastaError::Io)?;
    parse_fasta(BufReader::new(file))
}

/// Writes sequences back out as FASTA with synthetic `>seq_N` headers.
///
/// The parser discards header text, so reconstruction regenerates
/// identifiers; re-parsing the output yields the same sequence list.
pub fn write_fasta<W: Write>(writer: &mut W, sequences: &[Sequence]) -> io::Result<()> {
    for (i, seq) in sequences.iter().enumerate() {
        writeln!(writer, ">seq_{}", i + 1)?;
        writeln!(writer, "{}", seq.as_str())?;
    }
    Ok(())
}

/// Returns true if the path carries a FASTA file extension.
///
/// The upload surface is restricted to these extensions; anything else is
/// rejected before parsing.
pub fn has_fasta_extension<P: AsRef<Path>>(path: P) -> bool {
    let ext = match path.as_ref().extension().and_then(OsStr::to_str) {
        Some(ext) => ext,
        None => return false,
    };
    matches!(
        ext.to_lowercase().as_str(),
        "fa" | "fas" | "fasta" | "fna" | "faa"
    )
}
