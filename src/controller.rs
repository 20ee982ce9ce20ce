//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering
//! - Running the effects that need I/O (prediction requests, PDB saves)
//!
//! Predictions are synchronous: the loop blocks on the network call and a
//! progress frame is drawn before each request. A failed request records a
//! per-sequence error and leaves the interface usable.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::fasta;
use crate::model::{AppState, Effect, Outcome};
use crate::pdb;
use crate::predict::Predictor;
use crate::ui::{calculate_preview_rows, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Prediction endpoint client
    predictor: Predictor,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state and predictor.
    pub fn new(state: AppState, predictor: Predictor) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            predictor,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // Initial viewport setup
        self.update_preview_rows()?;

        loop {
            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.mode, self.state.show_help);

                // Handle resize specially to update the preview viewport
                if let Action::Resize(_, _) = action {
                    self.update_preview_rows()?;
                }

                let effect = apply_action(&mut self.state, action);
                self.run_effect(effect)?;

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Runs a side effect requested by a state transition.
    fn run_effect(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::None => Ok(()),
            Effect::Predict => self.run_predictions(),
            Effect::Save(path) => {
                self.save_selected(path);
                Ok(())
            }
        }
    }

    /// Parses the input buffer and predicts every sequence in it.
    ///
    /// All failures end up as user-visible messages; this only returns an
    /// error for terminal I/O problems.
    fn run_predictions(&mut self) -> Result<()> {
        let sequences = match fasta::parse_fasta_str(&self.state.input) {
            Ok(sequences) => sequences,
            Err(e) => {
                self.state.set_status(format!("Parse error: {}", e));
                return Ok(());
            }
        };

        if sequences.is_empty() {
            self.state.set_status("No usable sequence found");
            return Ok(());
        }

        let source = self.state.source.clone();
        self.state.load_sequences(sequences, source);

        let total = self.state.results.len();
        let mut succeeded = 0;

        for index in 0..total {
            self.state
                .set_status(format!("Predicting sequence {}/{}...", index + 1, total));
            // Progress frame before the blocking call
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            let sequence = self.state.results[index].sequence.clone();
            match self.predictor.predict(sequence.as_str()) {
                Ok(prediction) => {
                    info!(
                        "sequence {}/{}: {} residues, plDDT {:?}",
                        index + 1,
                        total,
                        sequence.len(),
                        prediction.plddt
                    );
                    succeeded += 1;
                    self.state.record_outcome(index, Outcome::Done(prediction));
                }
                Err(e) => {
                    warn!("sequence {}/{} failed: {}", index + 1, total, e);
                    self.state
                        .record_outcome(index, Outcome::Failed(e.to_string()));
                }
            }
        }

        self.state
            .set_status(format!("Predicted {}/{} sequences", succeeded, total));
        Ok(())
    }

    /// Saves the selected prediction; `None` means the fixed default path.
    fn save_selected(&mut self, path: Option<PathBuf>) {
        let pdb_text = match self.state.selected_prediction() {
            Some(prediction) => prediction.pdb.clone(),
            None => {
                self.state.set_status("No prediction to save");
                return;
            }
        };
        let path = path.unwrap_or_else(|| PathBuf::from(pdb::DEFAULT_OUTPUT));

        match pdb::save_pdb(&pdb_text, &path) {
            Ok(()) => self.state.set_status(format!("Wrote {}", path.display())),
            Err(e) => self.state.set_status(format!("Save failed: {}", e)),
        }
    }

    /// Updates the preview viewport from the terminal dimensions.
    fn update_preview_rows(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let rows = calculate_preview_rows(size.width, size.height);
        self.state.update_preview_rows(rows);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the application.
pub fn run_app(state: AppState, predictor: Predictor) -> Result<()> {
    let mut app = App::new(state, predictor)?;
    app.run()
}
