use ratatui::style::{Color, Modifier, Style};

use crate::model::ContentType;

pub const CHROME_BG: Color = Color::Rgb(0x4F, 0x5D, 0x75);
pub const CHROME_DARK: Color = Color::Rgb(0x2D, 0x31, 0x42);

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(CHROME_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn column_color(name: &str) -> Color {
    match name {
        "To Do" => Color::Blue,
        "In Progress" => Color::Yellow,
        "Done" => Color::Green,
        _ => Color::Magenta,
    }
}

pub fn content_color(content_type: ContentType) -> Color {
    match content_type {
        ContentType::Issue => Color::Green,
        ContentType::PullRequest => Color::Rgb(0xA3, 0x71, 0xF7),
        ContentType::Draft => Color::Gray,
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    FRAMES[tick % FRAMES.len()]
}
