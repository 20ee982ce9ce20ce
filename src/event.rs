//! Keyboard event handling.
//!
//! This module manages keyboard input:
//! - `p`: predict the current input
//! - `i`: edit the sequence input (Esc or Enter to finish)
//! - `c`: clear the sequence input
//! - `j/k` or arrows: select previous/next result
//! - `J/K`, `Ctrl+D/U`: scroll the PDB preview
//! - `s`: save the selected structure as `predicted.pdb`
//! - `?`: show help
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:p` or `:predict`: predict the current input
//!   - `:w [file]`: save the selected structure
//!   - `:h` or `:help`: show help

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState, Effect};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Run predictions for the current input
    Predict,
    /// Save the selected prediction to the default file
    SaveSelected,
    /// Select the next result
    SelectNext,
    /// Select the previous result
    SelectPrev,
    /// Scroll the PDB preview down one line
    ScrollDown,
    /// Scroll the PDB preview up one line
    ScrollUp,
    /// Scroll half a preview page down (Ctrl+D)
    HalfPageDown,
    /// Scroll half a preview page up (Ctrl+U)
    HalfPageUp,
    /// Enter sequence input mode
    EnterInputMode,
    /// Add character to the input buffer
    InputChar(char),
    /// Backspace in input mode
    InputBackspace,
    /// Leave sequence input mode
    LeaveInputMode,
    /// Clear the sequence input buffer
    ClearInput,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Show the help overlay
    ShowHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, show_help),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool) -> Action {
    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Input => handle_input_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode.
fn handle_normal_mode(key: KeyEvent) -> Action {
    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Handle Ctrl+U for half page up
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
        return Action::HalfPageUp;
    }

    // Handle Ctrl+D for half page down
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        return Action::HalfPageDown;
    }

    match key.code {
        // Main actions
        KeyCode::Char('p') => Action::Predict,
        KeyCode::Char('i') => Action::EnterInputMode,
        KeyCode::Char('c') => Action::ClearInput,
        KeyCode::Char('s') => Action::SaveSelected,

        // Result selection
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,

        // Preview scrolling
        KeyCode::Char('J') => Action::ScrollDown,
        KeyCode::Char('K') => Action::ScrollUp,
        KeyCode::PageDown => Action::HalfPageDown,
        KeyCode::PageUp => Action::HalfPageUp,

        // Command mode and help
        KeyCode::Char(':') => Action::EnterCommandMode,
        KeyCode::Char('?') => Action::ShowHelp,

        // Quick quit
        KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}

/// Handles key events in sequence input mode.
fn handle_input_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter => Action::LeaveInputMode,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Pure state transitions happen here; anything that needs I/O (network,
/// file writes) is returned as an [`Effect`] for the controller to run.
pub fn apply_action(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Predict => {
            return Effect::Predict;
        }
        Action::SaveSelected => {
            return Effect::Save(None);
        }
        Action::SelectNext => {
            state.select_next();
        }
        Action::SelectPrev => {
            state.select_prev();
        }
        Action::ScrollDown => {
            state.scroll_down(1);
        }
        Action::ScrollUp => {
            state.scroll_up(1);
        }
        Action::HalfPageDown => {
            state.half_page_down();
        }
        Action::HalfPageUp => {
            state.half_page_up();
        }
        Action::EnterInputMode => {
            state.enter_input_mode();
        }
        Action::InputChar(c) => {
            state.input_char(c);
        }
        Action::InputBackspace => {
            state.input_backspace();
        }
        Action::LeaveInputMode => {
            state.leave_input_mode();
        }
        Action::ClearInput => {
            state.clear_input();
        }
        Action::EnterCommandMode => {
            state.enter_command_mode();
        }
        Action::CommandChar(c) => {
            state.command_input(c);
        }
        Action::ExecuteCommand => {
            return state.execute_command();
        }
        Action::CancelCommand => {
            state.cancel_command();
        }
        Action::CommandBackspace => {
            state.command_backspace();
        }
        Action::ShowHelp => {
            state.show_help = true;
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_actions() {
        let mode = AppMode::Normal;

        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::Predict);

        let key = KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::EnterInputMode);

        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::SaveSelected);

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::SelectNext);

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::SelectPrev);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::Quit);
    }

    #[test]
    fn test_preview_scrolling_keys() {
        let mode = AppMode::Normal;

        let key = KeyEvent::new(KeyCode::Char('J'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::ScrollDown);

        let key = KeyEvent::new(KeyCode::Char('K'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::ScrollUp);

        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mode, false), Action::HalfPageDown);

        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mode, false), Action::HalfPageUp);
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &AppMode::Normal, false), Action::Quit);
        assert_eq!(handle_key_event(key, &AppMode::Input, false), Action::Quit);
    }

    #[test]
    fn test_input_mode_keys() {
        let mode = AppMode::Input;

        let key = KeyEvent::new(KeyCode::Char('M'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::InputChar('M'));

        // 'p' is text in input mode, not the predict key
        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::InputChar('p'));

        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::InputBackspace);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::LeaveInputMode);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::LeaveInputMode);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::CommandChar('q'));

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::ExecuteCommand);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &mode, false), Action::CancelCommand);
    }

    #[test]
    fn test_dismiss_help() {
        // Any key when help is shown should dismiss help
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &AppMode::Normal, true), Action::DismissHelp);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &AppMode::Normal, true), Action::DismissHelp);
    }

    #[test]
    fn test_apply_action_returns_effects() {
        let mut state = AppState::new();

        assert_eq!(apply_action(&mut state, Action::Predict), Effect::Predict);
        assert_eq!(apply_action(&mut state, Action::SaveSelected), Effect::Save(None));
        assert_eq!(apply_action(&mut state, Action::SelectNext), Effect::None);
    }

    #[test]
    fn test_apply_quit() {
        let mut state = AppState::new();
        apply_action(&mut state, Action::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_apply_input_editing() {
        let mut state = AppState::new();
        state.clear_input();

        apply_action(&mut state, Action::EnterInputMode);
        apply_action(&mut state, Action::InputChar('M'));
        apply_action(&mut state, Action::InputChar('K'));
        apply_action(&mut state, Action::InputBackspace);
        apply_action(&mut state, Action::LeaveInputMode);

        assert_eq!(state.input, "M");
        assert_eq!(state.mode, AppMode::Normal);
    }
}
