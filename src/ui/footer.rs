use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::CHROME_DARK;

/// Key hints, optionally followed by a status note on the right of the hints.
pub fn render(f: &mut Frame, area: Rect, hints: &[(&str, &str)], note: Option<String>) {
    let mut spans: Vec<Span> = hints.iter().map(|(key, desc)| hint(key, desc)).collect();

    if let Some(note) = note {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(note, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(CHROME_DARK));
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(Color::Gray),
    )
}
