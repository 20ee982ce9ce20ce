//! foldtui - Terminal front-end for ESMFold
//!
//! Submit a protein sequence to the ESMFold structure-prediction API and
//! inspect the predicted structure with its plDDT confidence score.
//!
//! ## Usage
//!
//! ```bash
//! foldtui                          # interactive, default demo sequence
//! foldtui proteins.fasta           # interactive, sequences from a file
//! foldtui -s MKTAYIAKQR -o out.pdb # CLI mode, write PDB to out.pdb
//! foldtui proteins.fasta -o -      # CLI mode, PDB text to stdout
//! ```
//!
//! ## Keys (interactive mode)
//!
//! - `p`: predict, `i`: edit input, `s`: save PDB
//! - `j/k`: select result, `J/K`: scroll preview
//! - `:q`: quit, `?`: help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::info;

use foldtui::controller::run_app;
use foldtui::fasta;
use foldtui::model::{AppState, Sequence, DEFAULT_SEQUENCE};
use foldtui::pdb;
use foldtui::predict::{Predictor, DEFAULT_TIMEOUT_SECS, ESMFOLD_URL};

/// Runs CLI mode: predict every sequence and write the PDB output.
fn run_cli_mode(sequences: &[Sequence], predictor: &Predictor, output: &str) -> Result<()> {
    let total = sequences.len();
    let mut failures = 0;

    for (i, sequence) in sequences.iter().enumerate() {
        info!(
            "predicting sequence {}/{} ({} residues)",
            i + 1,
            total,
            sequence.len()
        );

        let prediction = match predictor.predict(sequence.as_str()) {
            Ok(prediction) => prediction,
            // A failed sequence is reported and skipped, not fatal
            Err(e) => {
                eprintln!("sequence {}/{}: {}", i + 1, total, e);
                failures += 1;
                continue;
            }
        };

        let plddt = prediction
            .plddt
            .map(|v| format!("{:.4}", v))
            .unwrap_or_else(|| "n/a".to_string());

        if output == "-" {
            // Write to stdout, score to stderr
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(prediction.pdb.as_bytes())?;
            eprintln!("sequence {}/{}: plDDT {}", i + 1, total, plddt);
        } else {
            let path = pdb::indexed_path(Path::new(output), i, total);
            pdb::save_pdb(&prediction.pdb, &path)?;
            eprintln!("Wrote {} (plDDT {})", path.display(), plddt);
        }
    }

    if failures == total {
        anyhow::bail!("All {} predictions failed", total);
    }
    Ok(())
}

/// foldtui - A terminal front-end for ESMFold structure prediction
///
/// When run without -o/--output, opens an interactive TUI. With
/// -o/--output, runs in CLI mode and writes the predicted structure to a
/// file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file with sequences to fold (.fasta, .fa, .faa, .fas, .fna)
    file: Option<PathBuf>,

    /// Inline protein sequence (used when no file is given)
    #[arg(short = 's', long = "sequence")]
    sequence: Option<String>,

    /// Output file (enables CLI mode). Use "-" for stdout.
    /// With several sequences, files are numbered (out_1.pdb, out_2.pdb, ...).
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Prediction endpoint URL
    #[arg(long = "url", default_value = ESMFOLD_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.timeout == 0 {
        anyhow::bail!("Timeout must be at least 1 second");
    }

    let predictor = Predictor::new(&args.url, Duration::from_secs(args.timeout))?;

    // Resolve the input surface: file > inline sequence > default demo
    let (input, source) = if let Some(file) = &args.file {
        if !fasta::has_fasta_extension(file) {
            anyhow::bail!(
                "Not a FASTA file: {}\n\
                 Hint: accepted extensions are .fasta, .fa, .faa, .fas, .fna",
                file.display()
            );
        }
        let sequences = fasta::parse_fasta_file(file)?;
        if sequences.is_empty() {
            anyhow::bail!("No usable sequence found in {}", file.display());
        }

        // Reconstruct the file as the input buffer so the interactive
        // editor and the predict action work from the same text
        let mut buffer = Vec::new();
        fasta::write_fasta(&mut buffer, &sequences)?;
        let label = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        (String::from_utf8(buffer)?, label)
    } else if let Some(sequence) = args.sequence {
        (sequence, "typed input".to_string())
    } else {
        (DEFAULT_SEQUENCE.to_string(), "typed input".to_string())
    };

    // CLI mode: predict and write output
    if let Some(output) = args.output {
        let sequences = fasta::parse_fasta_str(&input)?;
        if sequences.is_empty() {
            anyhow::bail!("No usable sequence found");
        }
        return run_cli_mode(&sequences, &predictor, &output);
    }

    // TUI mode
    let mut state = AppState::new();
    state.input = input;
    state.source = source.clone();
    if args.file.is_some() {
        state.set_status(format!("Loaded {}. Press 'p' to predict", source));
    }
    run_app(state, predictor)
}
