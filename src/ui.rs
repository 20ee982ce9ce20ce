//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Sequence input panel and result list on the left
//! - plDDT gauge, structure summary and PDB preview on the right
//! - Status bar with mode and message
//! - Help overlay

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::model::{AppMode, AppState, Outcome};
use crate::pdb::{self, StructureSummary};

/// Width of the left column (input + result list).
const INPUT_PANEL_WIDTH: u16 = 42;
/// Height of the plDDT gauge block.
const GAUGE_HEIGHT: u16 = 3;
/// Height of the structure summary block.
const SUMMARY_HEIGHT: u16 = 4;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Confidence color in the AlphaFold/ESMFold convention:
/// very high (blue), confident (cyan), low (yellow), very low (red).
pub fn plddt_color(plddt: f64) -> Color {
    if plddt >= 90.0 {
        Color::Blue
    } else if plddt >= 70.0 {
        Color::Cyan
    } else if plddt >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Main layout: content area + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let content_area = main_layout[0];
    let status_area = main_layout[1];

    // Split content area: input column (left) + result column (right)
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(INPUT_PANEL_WIDTH),
            Constraint::Min(20),
        ])
        .split(content_area);

    let left_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content_layout[0]);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GAUGE_HEIGHT),
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Min(3),
        ])
        .split(content_layout[1]);

    render_input_panel(frame, state, left_layout[0]);
    render_result_list(frame, state, left_layout[1]);
    render_plddt_gauge(frame, state, right_layout[0]);
    render_summary_panel(frame, state, right_layout[1]);
    render_preview_panel(frame, state, right_layout[2]);
    render_status_bar(frame, state, status_area);

    if state.show_help {
        render_help_overlay(frame, area);
    }
}

/// Renders the free-text sequence input panel.
fn render_input_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let editing = state.mode == AppMode::Input;
    let title = format!("Input ({} chars)", state.input.len());

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let text = if editing {
        // Trailing block shows where typed characters go
        format!("{}\u{2588}", state.input)
    } else {
        state.input.clone()
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// One line of the result list.
fn result_line(index: usize, state: &AppState) -> Line<'static> {
    let result = &state.results[index];
    let is_selected = index == state.selected;

    let marker = match &result.outcome {
        Outcome::Pending => "    ...".to_string(),
        Outcome::Done(p) => match p.plddt {
            Some(v) => format!("{:7.2}", v),
            None => "    n/a".to_string(),
        },
        Outcome::Failed(_) => " failed".to_string(),
    };

    let text = format!(
        " seq {:<3} {:>5} aa {} ",
        index + 1,
        result.sequence.len(),
        marker
    );

    let style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        match &result.outcome {
            Outcome::Failed(_) => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::White),
        }
    };

    Line::from(Span::styled(text, style))
}

/// Renders the list of sequences and their outcomes.
fn render_result_list(frame: &mut Frame, state: &AppState, area: Rect) {
    let visible = (area.height.saturating_sub(2)) as usize;

    // Keep the selected result in view
    let first = state
        .selected
        .saturating_sub(visible.saturating_sub(1))
        .min(state.results.len().saturating_sub(visible));

    let lines: Vec<Line> = (first..state.results.len().min(first + visible))
        .map(|i| result_line(i, state))
        .collect();

    let title = format!("Sequences [{}]", state.source);
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the plDDT confidence gauge for the selected prediction.
fn render_plddt_gauge(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("plDDT");

    match state.selected_prediction().and_then(|p| p.plddt) {
        Some(plddt) => {
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(plddt_color(plddt)))
                .ratio((plddt / 100.0).clamp(0.0, 1.0))
                .label(format!("{:.4}", plddt));
            frame.render_widget(gauge, area);
        }
        None => {
            let paragraph = Paragraph::new("n/a").block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

/// Renders the structure summary for the selected prediction.
fn render_summary_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Structure");

    let lines: Vec<Line> = match state.selected_result().map(|r| &r.outcome) {
        Some(Outcome::Done(prediction)) => {
            let StructureSummary {
                atoms,
                residues,
                chains,
            } = pdb::summarize(&prediction.pdb);
            vec![
                Line::from(format!("Atoms: {}  Residues: {}  Chains: {}", atoms, residues, chains)),
                Line::from(format!("Save with 's' -> {}", pdb::DEFAULT_OUTPUT)),
            ]
        }
        Some(Outcome::Failed(message)) => vec![
            Line::from(Span::styled(
                "Prediction failed",
                Style::default().fg(Color::Red),
            )),
            Line::from(message.clone()),
        ],
        Some(Outcome::Pending) => vec![Line::from("Not predicted yet. Press 'p'.")],
        None => vec![Line::from("No sequences loaded. Press 'p' to fold the input.")],
    };

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

/// Renders the scrollable PDB text preview.
fn render_preview_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let visible = (area.height.saturating_sub(2)) as usize;

    let (lines, title) = match state.selected_prediction() {
        Some(prediction) => {
            let total = prediction.pdb.lines().count();
            let first = state.preview_scroll.min(total);
            let shown: Vec<Line> = prediction
                .pdb
                .lines()
                .skip(first)
                .take(visible)
                .map(|l| Line::from(l.to_string()))
                .collect();
            let last = (first + shown.len()).min(total);
            (
                shown,
                format!("{} [{}-{}/{}]", pdb::DEFAULT_OUTPUT, first + 1, last, total),
            )
        }
        None => (Vec::new(), "Structure file".to_string()),
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Input => ("INPUT", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let position_info = if state.results.is_empty() {
        String::from(" ")
    } else {
        format!("Seq {}/{} ", state.selected + 1, state.results.len())
    };

    // Show status message unless a command is being typed
    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.len();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Renders the help overlay in the center of the screen.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let overlay = centered_rect(50, 60, area);

    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  p        predict structure for the input"),
        Line::from("  i        edit input (Esc/Enter to finish)"),
        Line::from("  c        clear input"),
        Line::from("  j/k      select result"),
        Line::from("  J/K      scroll structure preview"),
        Line::from("  Ctrl+D/U scroll half a page"),
        Line::from("  s        save selected structure"),
        Line::from("  :w FILE  save to FILE"),
        Line::from("  :p       predict"),
        Line::from("  :q / q   quit"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .title_alignment(Alignment::Center);

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// A centered rect taking the given percentages of the area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Visible rows of the PDB preview panel for the given terminal size.
pub fn calculate_preview_rows(_terminal_width: u16, terminal_height: u16) -> usize {
    // Gauge and summary blocks, preview borders, status bar
    terminal_height
        .saturating_sub(GAUGE_HEIGHT + SUMMARY_HEIGHT + STATUS_BAR_HEIGHT + 2) as usize
}
