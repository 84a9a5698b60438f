use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::state::App;

/// Render the tab line and the current page.
pub(super) fn render_page(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let browser = &app.browser;
    let mut lines = vec![tab_line(app), Line::default()];
    let query = browser.search.as_ref().map(|search| search.query.as_str());
    for text in browser.page_lines() {
        lines.push(highlight(&text, query));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn tab_line(app: &App) -> Line<'static> {
    let browser = &app.browser;
    let mut spans = Vec::new();
    for (idx, tab) in browser.tabs.iter().enumerate() {
        let label = tab.title.clone().unwrap_or_else(|| tab.uri.clone());
        let style = if idx == browser.current {
            Style::default().bg(Color::Blue).fg(Color::Black)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {}:{label} ", idx + 1), style));
    }
    Line::from(spans)
}

/// Split `text` around matches of `query` so they can be styled.
fn highlight(text: &str, query: Option<&str>) -> Line<'static> {
    let Some(query) = query.filter(|query| !query.is_empty()) else {
        return Line::raw(text.to_string());
    };
    let match_style = Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find(query) {
        if idx > 0 {
            spans.push(Span::raw(rest[..idx].to_string()));
        }
        spans.push(Span::styled(query.to_string(), match_style));
        rest = &rest[idx + query.len()..];
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }
    Line::from(spans)
}
