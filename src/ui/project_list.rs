use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::projects::{ProjectList, ProjectListView, ProjectsState};
use crate::model::ProjectEntry;
use crate::ui::footer;
use crate::ui::status::{render_error, render_loading};
use crate::ui::theme::{header_style, CHROME_DARK};

pub fn render(f: &mut Frame, header: Rect, main: Rect, bottom: Rect, view: &ProjectListView) {
    f.render_widget(
        Paragraph::new(" GitHub Projects").style(header_style()),
        header,
    );

    match &view.state {
        ProjectsState::Loading => {
            render_loading(f, main, "Loading projects...", view.spinner);
            footer::render(f, bottom, &[("q", "quit")], None);
        }
        ProjectsState::Error(err) => {
            render_error(f, main, "Error fetching projects", err);
            footer::render(f, bottom, &[("esc", "dismiss"), ("q", "quit")], None);
        }
        ProjectsState::Ready(list) => {
            let area = if list.editing || !list.filter.is_empty() {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(main);
                render_filter_line(f, rows[0], list);
                rows[1]
            } else {
                main
            };

            let visible = list.visible();
            let empty_message = if list.filter.is_empty() {
                "No projects found in your organizations."
            } else {
                "No projects match the filter."
            };
            render_entries(f, area, &visible, list.selected, empty_message);

            let note = if list.filter.is_empty() {
                format!("{} projects", list.entries.len())
            } else {
                format!("{} of {} projects", visible.len(), list.entries.len())
            };
            let hints: &[(&str, &str)] = if list.editing {
                &[("enter", "apply"), ("esc", "clear"), ("↑↓", "navigate")]
            } else {
                &[
                    ("↑↓", "navigate"),
                    ("/", "filter"),
                    ("enter", "open"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ]
            };
            footer::render(f, bottom, hints, Some(note));
        }
    }
}

fn render_filter_line(f: &mut Frame, area: Rect, list: &ProjectList) {
    let mut spans = vec![
        Span::styled(" Filter: ", Style::default().fg(Color::Cyan)),
        Span::raw(list.filter.clone()),
    ];
    if list.editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_entries(
    f: &mut Frame,
    area: Rect,
    entries: &[&ProjectEntry],
    selected: usize,
    empty_message: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Projects ");

    if entries.is_empty() {
        let empty = Paragraph::new(empty_message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let project = &entry.project;
            let state_color = if project.closed {
                Color::Red
            } else {
                Color::Green
            };
            let mut detail = vec![
                Span::styled(format!("   {}", entry.org_login), Style::default().fg(Color::Gray)),
                Span::raw(" • "),
                Span::styled(project.state_label(), Style::default().fg(state_color)),
            ];
            if let Some(created) = project.created_at {
                detail.push(Span::styled(
                    format!(" • created {}", created.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(vec![
                Line::from(Span::raw(format!("#{} {}", project.number, project.title))),
                Line::from(detail),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .bg(CHROME_DARK)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
