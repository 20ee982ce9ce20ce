//! Data model for the prediction front-end.
//!
//! This module contains the data structures for:
//! - Sequences and prediction outcomes
//! - Application state (input buffer, selection, modes)
//!
//! Sequences carry residues only. The FASTA parser discards header text,
//! so there is no identifier field; results are addressed by position.

use std::path::PathBuf;

/// The sequence pre-filled in the input panel (mealworm PETase homolog,
/// the demo sequence of the original front-end).
pub const DEFAULT_SEQUENCE: &str = "MGSSHHHHHHSSGLVPRGSHMRGPNPTAASLEASAGPFTVRSFTVSRPSGYGAGTVYYPTNAGGTVGAIAIVPGYTARQSSIKWWGPRLASHGFVVITIDTNSTLDQPSSRSSQQMAALRQVASLNGTSSSPIYGKVDTARMGVMGWSMGGGGSLISAANNPSLKAAAPQAPWDSSTNFSSVTVPTLIFACENDSIAPVNSSALPIYDSMSRNAKQFLEINGGSHSCANSGNSNQALIGKKGVAWMKRFMDNDTRYSTFACENPNSTRVSDFRTANCSLEDPAANKARKEAELAAATAEQ";

/// A single protein sequence (residues only, headers are discarded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Returns the residues as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Returns the number of residues.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence has no residues.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A predicted structure as returned by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The structure file text (PDB format)
    pub pdb: String,
    /// Mean plDDT over all atoms (0-100), rounded to 4 decimals.
    /// `None` when the PDB text contains no atom records.
    pub plddt: Option<f64>,
}

/// Per-sequence prediction outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Not yet submitted
    Pending,
    /// Prediction succeeded
    Done(Prediction),
    /// Prediction failed; the message is shown to the user
    Failed(String),
}

/// A sequence together with its prediction outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceResult {
    pub sequence: Sequence,
    pub outcome: Outcome,
}

impl SequenceResult {
    pub fn pending(sequence: Sequence) -> Self {
        Self {
            sequence,
            outcome: Outcome::Pending,
        }
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Sequence input editing mode (after pressing 'i')
    Input,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// Side effect requested by a state transition.
///
/// Pure state changes are applied directly; anything that needs I/O
/// (network, file writes) is returned to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No side effect
    None,
    /// Run predictions for the current input
    Predict,
    /// Save the selected prediction; `None` means the fixed default path
    Save(Option<PathBuf>),
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// Free-text sequence input (raw residues or FASTA with headers)
    pub input: String,
    /// Label of where the current sequences came from
    pub source: String,
    /// Sequences queued or predicted in this session
    pub results: Vec<SequenceResult>,
    /// Index of the selected result
    pub selected: usize,
    /// Scroll offset into the selected prediction's PDB preview
    pub preview_scroll: usize,
    /// Visible rows of the preview panel (set from terminal size)
    pub preview_rows: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates the initial state with the default input sequence.
    pub fn new() -> Self {
        Self {
            input: DEFAULT_SEQUENCE.to_string(),
            source: "typed input".to_string(),
            results: Vec::new(),
            selected: 0,
            preview_scroll: 0,
            preview_rows: 0,
            mode: AppMode::Normal,
            show_help: false,
            should_quit: false,
            status_message: Some("Press 'p' to predict, 'i' to edit, '?' for help".to_string()),
        }
    }

    /// Replaces the session's sequences with a fresh pending queue.
    pub fn load_sequences(&mut self, sequences: Vec<Sequence>, source: impl Into<String>) {
        self.results = sequences.into_iter().map(SequenceResult::pending).collect();
        self.source = source.into();
        self.selected = 0;
        self.preview_scroll = 0;
    }

    /// Records the outcome for a sequence in the queue.
    pub fn record_outcome(&mut self, index: usize, outcome: Outcome) {
        if let Some(result) = self.results.get_mut(index) {
            result.outcome = outcome;
        }
    }

    /// Gets the currently selected result.
    pub fn selected_result(&self) -> Option<&SequenceResult> {
        self.results.get(self.selected)
    }

    /// Gets the selected prediction, if it succeeded.
    pub fn selected_prediction(&self) -> Option<&Prediction> {
        match self.selected_result() {
            Some(SequenceResult {
                outcome: Outcome::Done(prediction),
                ..
            }) => Some(prediction),
            _ => None,
        }
    }

    /// Moves the selection down by one result.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
            self.preview_scroll = 0;
        }
    }

    /// Moves the selection up by one result.
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.preview_scroll = 0;
        }
    }

    /// Maximum preview scroll for the selected prediction.
    fn max_scroll(&self) -> usize {
        let lines = self
            .selected_prediction()
            .map(|p| p.pdb.lines().count())
            .unwrap_or(0);
        lines.saturating_sub(self.preview_rows.max(1))
    }

    /// Scrolls the PDB preview down.
    pub fn scroll_down(&mut self, lines: usize) {
        self.preview_scroll = (self.preview_scroll + lines).min(self.max_scroll());
    }

    /// Scrolls the PDB preview up.
    pub fn scroll_up(&mut self, lines: usize) {
        self.preview_scroll = self.preview_scroll.saturating_sub(lines);
    }

    /// Scrolls half a preview page down (Ctrl+D).
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.preview_rows / 2).max(1));
    }

    /// Scrolls half a preview page up (Ctrl+U).
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.preview_rows / 2).max(1));
    }

    /// Updates the preview panel height from the terminal size.
    pub fn update_preview_rows(&mut self, rows: usize) {
        self.preview_rows = rows;
        self.preview_scroll = self.preview_scroll.min(self.max_scroll());
    }

    /// Enters sequence input mode.
    pub fn enter_input_mode(&mut self) {
        self.mode = AppMode::Input;
        self.status_message = Some("Editing input. Esc to finish".to_string());
    }

    /// Appends a character to the input buffer.
    pub fn input_char(&mut self, c: char) {
        if let AppMode::Input = self.mode {
            self.input.push(c);
        }
    }

    /// Removes the last character of the input buffer.
    pub fn input_backspace(&mut self) {
        if let AppMode::Input = self.mode {
            self.input.pop();
        }
    }

    /// Leaves sequence input mode.
    pub fn leave_input_mode(&mut self) {
        self.mode = AppMode::Normal;
        self.status_message = None;
    }

    /// Clears the input buffer (stays in the current mode).
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Executes the current command and returns the requested effect.
    pub fn execute_command(&mut self) -> Effect {
        let mut effect = Effect::None;
        if let AppMode::Command(ref cmd) = self.mode.clone() {
            let mut parts = cmd.split_whitespace();
            match parts.next() {
                Some("q") | Some("quit") => self.should_quit = true,
                Some("h") | Some("help") => self.show_help = true,
                Some("p") | Some("predict") => effect = Effect::Predict,
                Some("w") | Some("write") => {
                    effect = Effect::Save(parts.next().map(PathBuf::from));
                }
                Some(other) => {
                    self.status_message = Some(format!("Unknown command: {}", other));
                }
                None => {}
            }
        }
        self.mode = AppMode::Normal;
        effect
    }

    /// Dismisses the help overlay.
    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Sets the status bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_results(n: usize) -> AppState {
        let mut state = AppState::new();
        let sequences = (0..n).map(|_| Sequence::new("MKT")).collect();
        state.load_sequences(sequences, "test");
        state
    }

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("MKTAYI");
        assert_eq!(seq.as_str(), "MKTAYI");
        assert_eq!(seq.len(), 6);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.input, DEFAULT_SEQUENCE);
        assert!(state.results.is_empty());
        assert!(!state.should_quit);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_load_sequences_resets_selection() {
        let mut state = state_with_results(3);
        state.selected = 2;
        state.preview_scroll = 10;

        state.load_sequences(vec![Sequence::new("AAA")], "reload");
        assert_eq!(state.selected, 0);
        assert_eq!(state.preview_scroll, 0);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].outcome, Outcome::Pending);
    }

    #[test]
    fn test_selection_movement() {
        let mut state = state_with_results(3);

        assert_eq!(state.selected, 0);
        state.select_next();
        assert_eq!(state.selected, 1);
        state.select_next();
        state.select_next(); // clamped at last result
        assert_eq!(state.selected, 2);
        state.select_prev();
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_selection_resets_scroll() {
        let mut state = state_with_results(2);
        state.preview_rows = 5;
        state.record_outcome(
            0,
            Outcome::Done(Prediction {
                pdb: "a\n".repeat(50),
                plddt: Some(90.0),
            }),
        );
        state.scroll_down(10);
        assert_eq!(state.preview_scroll, 10);

        state.select_next();
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut state = state_with_results(1);
        state.preview_rows = 10;
        state.record_outcome(
            0,
            Outcome::Done(Prediction {
                pdb: "x\n".repeat(25),
                plddt: None,
            }),
        );

        state.scroll_down(1000);
        assert_eq!(state.preview_scroll, 15); // 25 lines - 10 visible

        state.scroll_up(1000);
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_scroll_without_prediction_is_noop() {
        let mut state = state_with_results(1);
        state.preview_rows = 10;
        state.scroll_down(5);
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_record_outcome() {
        let mut state = state_with_results(2);
        state.record_outcome(1, Outcome::Failed("timeout".to_string()));

        assert_eq!(state.results[0].outcome, Outcome::Pending);
        assert_eq!(state.results[1].outcome, Outcome::Failed("timeout".to_string()));
    }

    #[test]
    fn test_selected_prediction() {
        let mut state = state_with_results(2);
        assert!(state.selected_prediction().is_none());

        state.record_outcome(
            0,
            Outcome::Done(Prediction {
                pdb: "END\n".to_string(),
                plddt: Some(77.1234),
            }),
        );
        assert_eq!(state.selected_prediction().unwrap().plddt, Some(77.1234));

        state.select_next();
        assert!(state.selected_prediction().is_none());
    }

    #[test]
    fn test_input_editing() {
        let mut state = AppState::new();
        state.clear_input();
        state.enter_input_mode();

        state.input_char('M');
        state.input_char('K');
        state.input_backspace();
        assert_eq!(state.input, "M");

        state.leave_input_mode();
        assert_eq!(state.mode, AppMode::Normal);

        // Editing outside input mode is ignored
        state.input_char('X');
        assert_eq!(state.input, "M");
    }

    #[test]
    fn test_command_quit() {
        let mut state = AppState::new();
        state.enter_command_mode();
        state.command_input('q');
        let effect = state.execute_command();

        assert_eq!(effect, Effect::None);
        assert!(state.should_quit);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_command_predict_and_write() {
        let mut state = AppState::new();
        state.enter_command_mode();
        state.command_input('p');
        assert_eq!(state.execute_command(), Effect::Predict);

        state.enter_command_mode();
        for c in "w out.pdb".chars() {
            state.command_input(c);
        }
        assert_eq!(
            state.execute_command(),
            Effect::Save(Some(PathBuf::from("out.pdb")))
        );

        state.enter_command_mode();
        state.command_input('w');
        assert_eq!(state.execute_command(), Effect::Save(None));
    }

    #[test]
    fn test_unknown_command_sets_status() {
        let mut state = AppState::new();
        state.enter_command_mode();
        state.command_input('z');
        state.execute_command();
        assert_eq!(state.status_message, Some("Unknown command: z".to_string()));
    }

    #[test]
    fn test_command_backspace_exits_on_empty() {
        let mut state = AppState::new();
        state.enter_command_mode();
        state.command_input('q');
        state.command_backspace();
        assert_eq!(state.mode, AppMode::Normal);
    }
}
