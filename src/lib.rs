//! # foldtui - Terminal front-end for ESMFold
//!
//! A terminal front-end for protein structure prediction. Sequences are
//! typed in or loaded from a FASTA file, submitted to the ESMFold HTTP
//! API, and the returned structure is presented with its mean plDDT
//! confidence score and offered for download as `predicted.pdb`.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `model`: Data structures for sequences, predictions, and application state
//! - `fasta`: FASTA parsing and reconstruction
//! - `predict`: Blocking HTTP client for the prediction endpoint
//! - `pdb`: plDDT extraction and structure-file output
//! - `event`: Keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Orchestration of state transitions and I/O effects
//!
//! Folding itself is delegated entirely to the external service; this
//! crate owns only the parsing, sequencing, and presentation around it.

pub mod controller;
pub mod event;
pub mod fasta;
pub mod model;
pub mod pdb;
pub mod predict;
pub mod ui;
