pub mod board;
pub mod footer;
pub mod project_list;
pub mod status;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // board or list
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    if let Some(view) = &app.board {
        board::render(f, vertical[0], vertical[1], vertical[2], view);
    } else if let Some(view) = &app.projects {
        project_list::render(f, vertical[0], vertical[1], vertical[2], view);
    }
}
