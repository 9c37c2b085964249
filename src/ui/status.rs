use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::error::FetchError;
use crate::ui::theme::spinner_frame;

pub fn render_loading(f: &mut Frame, area: Rect, label: &str, tick: usize) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", spinner_frame(tick)),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(label.to_string(), Style::default().fg(Color::DarkGray)),
    ]);
    let paragraph = Paragraph::new(vec![Line::default(), line]).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

pub fn render_error(f: &mut Frame, area: Rect, context: &str, err: &FetchError) {
    let text = vec![
        Line::from(Span::styled(
            context.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(err.to_string()),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    f.render_widget(paragraph, area);
}
