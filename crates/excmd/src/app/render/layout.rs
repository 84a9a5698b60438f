use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ex::Session;
use crate::keymap::key_notation;

use super::super::state::{App, Mode};

/// Render horizontal separator.
pub(super) fn render_separator(frame: &mut ratatui::Frame, area: Rect, width: usize) {
    let separator = Paragraph::new(Line::raw(dashed_line(width))).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    );
    frame.render_widget(separator, area);
}

/// Render command bar: the input line or mode, with the address on the right.
pub(super) fn render_command_bar(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let label_text = if app.browser.mode == Mode::Command {
        session_label(app)
    } else {
        status_label(app)
    };
    let width = area.width as usize;
    let label_len = label_text.chars().count();
    if label_len > 0 && width > label_len + 1 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length((label_len + 1) as u16),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(command_line(app)), chunks[0]);

        let dim_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let label = Paragraph::new(Line::from(Span::styled(label_text, dim_style)))
            .alignment(Alignment::Right);
        frame.render_widget(label, chunks[1]);
        return;
    }

    frame.render_widget(Paragraph::new(command_line(app)), area);
}

/// Pending keys, then tab position and address.
fn status_label(app: &App) -> String {
    let browser = &app.browser;
    let pending: String = app.pending.iter().map(key_notation).collect();
    let uri = browser.current_tab().map_or("", |tab| tab.uri.as_str());
    let position = format!("[{}/{}]", browser.current + 1, browser.tabs.len().max(1));
    if pending.is_empty() {
        format!("{position} {uri}")
    } else {
        format!("{pending} {position} {uri}")
    }
}

/// Position inside the running completion or history walk.
fn session_label(app: &App) -> String {
    match app.ex.session() {
        Session::Completion(completion) => format!(
            "{}/{}",
            completion.selected() + 1,
            completion.candidates().len()
        ),
        Session::History(history) if history.cursor() > 0 => {
            format!("history -{}", history.cursor())
        }
        _ => String::new(),
    }
}

/// Build the command line content (input or mode label).
fn command_line(app: &App) -> Line<'_> {
    match app.browser.mode {
        Mode::Command => {
            let style = if app.browser.input.starts_with(':') {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Yellow)
            };
            Line::from(vec![
                Span::styled(app.browser.input.clone(), style),
                Span::styled(" ", Style::default().bg(Color::White).fg(Color::Black)),
            ])
        }
        Mode::Insert => Line::from(Span::styled(
            "-- INSERT --",
            Style::default().bg(Color::Magenta).fg(Color::Black),
        )),
        Mode::Normal => Line::default(),
    }
}

/// Dashed separator line.
fn dashed_line(width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let pattern = "- ";
    pattern.repeat(width / pattern.len() + 1)[..width].to_string()
}

/// Inset a rect horizontally by padding on each side.
pub(super) fn inset_horizontal(area: Rect, padding: u16) -> Rect {
    if area.width <= padding * 2 {
        return area;
    }
    Rect {
        x: area.x + padding,
        width: area.width - padding * 2,
        ..area
    }
}
