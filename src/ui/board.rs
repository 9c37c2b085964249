use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::board::{BoardState, BoardTab, BoardView, ReadyBoard};
use crate::app::viewport::{LineKind, ViewLine, Viewport};
use crate::ui::footer;
use crate::ui::status::{render_error, render_loading};
use crate::ui::theme::{column_color, content_color, header_style, CHROME_BG, CHROME_DARK};

pub fn render(f: &mut Frame, header: Rect, main: Rect, bottom: Rect, view: &BoardView) {
    let mut spans = vec![Span::raw(format!(" {}", view.heading()))];
    if let BoardState::Ready(ready) = &view.state {
        spans.push(Span::raw("   "));
        spans.extend(BoardTab::ALL.iter().map(|tab| tab_span(*tab, ready.tab)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(header_style()), header);

    match &view.state {
        BoardState::Loading => {
            render_loading(f, main, "Loading project...", view.spinner);
            footer::render(f, bottom, &[("q", "quit")], None);
        }
        BoardState::Error(err) => {
            render_error(f, main, "Error fetching project details", err);
            footer::render(f, bottom, &[("esc", "dismiss"), ("q", "quit")], None);
        }
        BoardState::Ready(ready) if ready.tab == BoardTab::Details => {
            render_details(f, main, view, ready.detail_row);
            footer::render(
                f,
                bottom,
                &[
                    ("tab", "kanban"),
                    ("↑↓", "navigate"),
                    ("r", "refresh"),
                    ("esc", "back"),
                    ("q", "quit"),
                ],
                None,
            );
        }
        BoardState::Ready(ready) => {
            render_columns(f, main, ready);
            footer::render(
                f,
                bottom,
                &[
                    ("tab", "details"),
                    ("←→", "column"),
                    ("↑↓", "scroll"),
                    ("r", "refresh"),
                    ("esc", "back"),
                    ("q", "quit"),
                ],
                Some(match ready.active_column() {
                    Some(column) => format!("{} cards • {}", ready.board.card_count(), column.name),
                    None => format!("{} cards", ready.board.card_count()),
                }),
            );
        }
    }
}

fn tab_span(tab: BoardTab, active: BoardTab) -> Span<'static> {
    let style = if tab == active {
        Style::default()
            .fg(Color::White)
            .bg(CHROME_DARK)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(CHROME_BG)
    };
    Span::styled(format!("  {}  ", tab.label()), style)
}

fn render_details(f: &mut Frame, area: Rect, view: &BoardView, selected: usize) {
    let rows = view.details().into_iter().map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(Style::default().fg(Color::Gray)),
            Cell::from(value),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(10)])
        .header(
            Row::new(vec!["Property", "Value"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(CHROME_DARK)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_columns(f: &mut Frame, area: Rect, ready: &ReadyBoard) {
    let columns = &ready.board.columns;
    if columns.is_empty() {
        let empty = Paragraph::new("No cards in this project.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let n = columns.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns.iter().map(|_| Constraint::Ratio(1, n)))
        .split(area);

    for (i, ((column, viewport), col_area)) in columns
        .iter()
        .zip(&ready.viewports)
        .zip(areas.iter())
        .enumerate()
    {
        let active = i == ready.active;
        let accent = column_color(&column.name);
        let border_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title_style = if active {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ({}) ", column.name, column.cards.len()),
                title_style,
            ))
            .title_bottom(scroll_hint(viewport));

        let lines: Vec<Line> = viewport.visible().iter().map(styled_line).collect();
        f.render_widget(Paragraph::new(lines).block(block), *col_area);
    }
}

fn scroll_hint(viewport: &Viewport) -> Line<'static> {
    if viewport.max_offset() == 0 {
        return Line::default();
    }
    let marker = if viewport.offset() == 0 {
        "↓"
    } else if viewport.at_bottom() {
        "↑"
    } else {
        "↕"
    };
    Line::from(Span::styled(
        format!(" {marker} {}/{} ", viewport.offset() + 1, viewport.line_count()),
        Style::default().fg(Color::DarkGray),
    ))
}

fn styled_line(line: &ViewLine) -> Line<'_> {
    let style = match line.kind {
        LineKind::Title => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        LineKind::Meta(content_type) => Style::default().fg(content_color(content_type)),
        LineKind::Link => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        LineKind::Blank => Style::default(),
    };
    Line::from(Span::styled(line.text.as_str(), style))
}
