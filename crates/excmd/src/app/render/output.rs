use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::commands::command_help_lines;
use crate::ex::Ex;
use crate::host::MessageLevel;

use super::super::state::{App, Mode, OUTPUT_MAX_LINES};

/// Output area lines: completion candidates, the last message, or command
/// hints while a command name is typed.
pub(super) fn output_lines_owned(app: &App, width: usize) -> Vec<Line<'static>> {
    if let Some(completion) = app.ex.completion() {
        return candidate_lines(
            completion.candidates().iter().map(|candidate| {
                match &candidate.detail {
                    Some(detail) => format!("{}  {detail}", candidate.value),
                    None => candidate.value.clone(),
                }
            }),
            completion.selected(),
            OUTPUT_MAX_LINES,
        );
    }

    if let Some(message) = app.browser.output.as_ref() {
        if !message.text.trim().is_empty() {
            let style = match message.level {
                MessageLevel::Error => Style::default().fg(Color::Red),
                MessageLevel::Normal => Style::default(),
            };
            return wrap_text_lines(&message.text, width, OUTPUT_MAX_LINES)
                .into_iter()
                .map(|line| Line::styled(line, style))
                .collect();
        }
    }

    if app.browser.mode == Mode::Command {
        return command_hints(&app.ex, &app.browser.input, OUTPUT_MAX_LINES)
            .into_iter()
            .map(Line::raw)
            .collect();
    }
    Vec::new()
}

/// A window of candidates that keeps the selected one visible.
fn candidate_lines(
    candidates: impl Iterator<Item = String>,
    selected: usize,
    max_lines: usize,
) -> Vec<Line<'static>> {
    let start = (selected + 1).saturating_sub(max_lines);
    candidates
        .enumerate()
        .skip(start)
        .take(max_lines)
        .map(|(idx, text)| {
            if idx == selected {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .bg(Color::White)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::raw(text)
            }
        })
        .collect()
}

/// Help lines for commands starting with the typed name.
fn command_hints(ex: &Ex, input: &str, max_lines: usize) -> Vec<String> {
    let Some(rest) = input.strip_prefix(':') else {
        return Vec::new();
    };
    let rest = rest.trim_start().trim_start_matches(|ch: char| ch.is_ascii_digit());
    if rest.contains(char::is_whitespace) {
        return Vec::new();
    }
    let names = ex.fill_command_names(rest.trim_end_matches('!'));
    command_help_lines()
        .into_iter()
        .filter(|line| {
            line.strip_prefix(':')
                .and_then(|line| line.split_whitespace().next())
                .is_some_and(|name| names.iter().any(|known| known == name))
        })
        .take(max_lines)
        .collect()
}

fn wrap_text_lines(message: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in message.lines() {
        for item in wrap_preserve(raw_line, width) {
            lines.push(item);
            if lines.len() >= max_lines {
                return lines;
            }
        }
    }
    lines
}

fn wrap_preserve(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let mut output = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;
    for ch in line.chars() {
        if count >= width {
            output.push(current);
            current = String::new();
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    output.push(current);
    output
}
