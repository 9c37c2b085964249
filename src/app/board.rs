use crate::error::FetchError;
use crate::event::KeyAction;
use crate::model::{Board, Column, ContentType, ProjectEntry};

use super::viewport::{LineKind, ViewLine, Viewport};
use super::Transition;

/// Rows taken by the header, the column borders and the footer.
pub const CHROME_ROWS: u16 = 4;
/// Columns taken by the left and right border of each column.
pub const COLUMN_BORDER: u16 = 2;

pub const DETAIL_LABELS: [&str; 7] = [
    "ID",
    "Number",
    "Title",
    "Organization",
    "Status",
    "URL",
    "Created At",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTab {
    Details,
    Kanban,
}

impl BoardTab {
    pub const ALL: [BoardTab; 2] = [BoardTab::Details, BoardTab::Kanban];

    pub fn label(self) -> &'static str {
        match self {
            BoardTab::Details => "Details",
            BoardTab::Kanban => "Kanban Board",
        }
    }

    fn next(self) -> Self {
        match self {
            BoardTab::Details => BoardTab::Kanban,
            BoardTab::Kanban => BoardTab::Details,
        }
    }
}

pub enum BoardState {
    Loading,
    Ready(ReadyBoard),
    Error(FetchError),
}

pub struct ReadyBoard {
    pub board: Board,
    pub tab: BoardTab,
    pub active: usize,
    pub viewports: Vec<Viewport>,
    /// Highlighted row of the details table.
    pub detail_row: usize,
}

/// One project's board: spinner while fetching, then a column per status.
pub struct BoardView {
    pub project_id: String,
    pub title: Option<String>,
    /// Set when the board was opened from the project list.
    pub entry: Option<ProjectEntry>,
    pub state: BoardState,
    pub spinner: usize,
    width: u16,
    height: u16,
    request: u64,
}

impl BoardView {
    pub fn new(
        project_id: String,
        entry: Option<ProjectEntry>,
        request: u64,
        size: (u16, u16),
    ) -> Self {
        Self {
            project_id,
            title: entry.as_ref().map(|e| e.project.title.clone()),
            entry,
            state: BoardState::Loading,
            spinner: 0,
            width: size.0,
            height: size.1,
            request,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, BoardState::Loading)
    }

    pub fn heading(&self) -> String {
        match &self.title {
            Some(title) => format!("Project: {title}"),
            None => format!("Project: {}", self.project_id),
        }
    }

    /// Values for the details tab, in `DETAIL_LABELS` order. Fields only known from the
    /// project list show as "-" when the board was opened by id.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let project = self.entry.as_ref().map(|e| &e.project);
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        let values = [
            self.project_id.clone(),
            or_dash(project.map(|p| p.number.to_string())),
            or_dash(self.title.clone()),
            or_dash(self.entry.as_ref().map(|e| e.org_login.clone())),
            or_dash(project.map(|p| p.state_label().to_string())),
            or_dash(project.map(|p| p.url.clone()).filter(|u| !u.is_empty())),
            or_dash(
                project
                    .and_then(|p| p.created_at)
                    .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()),
            ),
        ];
        DETAIL_LABELS.into_iter().zip(values).collect()
    }

    /// Drop the current board and wait for the result of `request`.
    pub fn begin_refresh(&mut self, request: u64) {
        self.request = request;
        self.spinner = 0;
        self.state = BoardState::Loading;
    }

    pub fn tick(&mut self) {
        if self.is_loading() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    pub fn on_loaded(&mut self, request: u64, result: Result<Board, FetchError>) {
        if request != self.request || !self.is_loading() {
            tracing::debug!(request, current = self.request, "discarding stale board result");
            return;
        }

        self.state = match result {
            Ok(board) => {
                if self.title.is_none() {
                    self.title = board.title.clone();
                }
                let viewports = layout_viewports(&board.columns, self.width, self.height);
                BoardState::Ready(ReadyBoard {
                    board,
                    tab: BoardTab::Kanban,
                    active: 0,
                    viewports,
                    detail_row: 0,
                })
            }
            Err(err) => {
                tracing::warn!(project_id = %self.project_id, error = %err, "board fetch failed");
                BoardState::Error(err)
            }
        };
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let BoardState::Ready(ready) = &mut self.state {
            let (vp_width, vp_height) = viewport_size(ready.board.columns.len(), width, height);
            for (vp, column) in ready.viewports.iter_mut().zip(&ready.board.columns) {
                vp.set_size(vp_width, vp_height);
                vp.set_content(render_column(column, vp_width));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyAction) -> Transition {
        let key = key.command();
        if key == KeyAction::Quit {
            return Transition::Quit;
        }
        match &mut self.state {
            BoardState::Loading => Transition::None,
            BoardState::Error(_) => match key {
                KeyAction::Back | KeyAction::Select => Transition::Back,
                _ => Transition::None,
            },
            BoardState::Ready(ready) => ready.handle_key(key),
        }
    }
}

impl ReadyBoard {
    fn handle_key(&mut self, key: KeyAction) -> Transition {
        match key {
            KeyAction::Tab => self.tab = self.tab.next(),
            KeyAction::Refresh => return Transition::Refresh,
            KeyAction::Back => return Transition::Back,
            _ if self.tab == BoardTab::Details => self.handle_details_key(key),
            _ => self.handle_kanban_key(key),
        }
        Transition::None
    }

    fn handle_kanban_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Left => self.active = self.active.saturating_sub(1),
            KeyAction::Right => {
                self.active = (self.active + 1).min(self.board.columns.len().saturating_sub(1));
            }
            KeyAction::Up => self.with_focused(|vp| vp.scroll_up(1)),
            KeyAction::Down => self.with_focused(|vp| vp.scroll_down(1)),
            KeyAction::PageUp => self.with_focused(Viewport::page_up),
            KeyAction::PageDown => self.with_focused(Viewport::page_down),
            KeyAction::Home => self.with_focused(Viewport::to_top),
            KeyAction::End => self.with_focused(Viewport::to_bottom),
            _ => {}
        }
    }

    fn handle_details_key(&mut self, key: KeyAction) {
        let last = DETAIL_LABELS.len() - 1;
        match key {
            KeyAction::Up => self.detail_row = self.detail_row.saturating_sub(1),
            KeyAction::Down => self.detail_row = (self.detail_row + 1).min(last),
            KeyAction::Home | KeyAction::PageUp => self.detail_row = 0,
            KeyAction::End | KeyAction::PageDown => self.detail_row = last,
            _ => {}
        }
    }

    fn with_focused(&mut self, f: impl FnOnce(&mut Viewport)) {
        if let Some(vp) = self.viewports.get_mut(self.active) {
            f(vp);
        }
    }

    pub fn active_column(&self) -> Option<&Column> {
        self.board.columns.get(self.active)
    }
}

fn viewport_size(columns: usize, width: u16, height: u16) -> (u16, u16) {
    let per_column = width / columns.max(1) as u16;
    (
        per_column.saturating_sub(COLUMN_BORDER),
        height.saturating_sub(CHROME_ROWS),
    )
}

fn layout_viewports(columns: &[Column], width: u16, height: u16) -> Vec<Viewport> {
    let (vp_width, vp_height) = viewport_size(columns.len(), width, height);
    columns
        .iter()
        .map(|column| {
            let mut vp = Viewport::new(vp_width, vp_height);
            vp.set_content(render_column(column, vp_width));
            vp
        })
        .collect()
}

/// Lay out a column's cards as text lines no wider than `width`.
pub fn render_column(column: &Column, width: u16) -> Vec<ViewLine> {
    let width = width as usize;
    let mut lines = Vec::new();
    for card in &column.cards {
        for chunk in wrap(&card.title, width) {
            lines.push(ViewLine::new(LineKind::Title, chunk));
        }
        let marker = match card.content_type {
            ContentType::Issue => "●",
            ContentType::PullRequest => "⇄",
            ContentType::Draft => "○",
        };
        lines.push(ViewLine::new(
            LineKind::Meta(card.content_type),
            truncate(&format!("{marker} {}", card.content_type), width),
        ));
        if !card.url.is_empty() {
            lines.push(ViewLine::new(LineKind::Link, truncate(&card.url, width)));
        }
        lines.push(ViewLine::blank());
    }
    lines
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
        }
        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(truncate(word, width));
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Card;

    fn card(id: &str, title: &str) -> Card {
        Card {
            id: id.into(),
            title: title.into(),
            status: "To Do".into(),
            url: format!("https://github.com/acme/app/issues/{id}"),
            content_type: ContentType::Issue,
        }
    }

    fn board(columns: &[(&str, usize)]) -> Board {
        Board {
            title: Some("Roadmap".into()),
            columns: columns
                .iter()
                .map(|(name, n)| Column {
                    name: name.to_string(),
                    cards: (0..*n).map(|i| card(&i.to_string(), &format!("{name} {i}"))).collect(),
                })
                .collect(),
        }
    }

    fn ready_view(columns: &[(&str, usize)]) -> BoardView {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (90, 30));
        view.on_loaded(1, Ok(board(columns)));
        view
    }

    fn ready(view: &BoardView) -> &ReadyBoard {
        match &view.state {
            BoardState::Ready(ready) => ready,
            _ => panic!("board is not ready"),
        }
    }

    #[test]
    fn starts_loading_and_ignores_keys() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 24));
        assert!(view.is_loading());
        assert_eq!(view.handle_key(KeyAction::Right), Transition::None);
        assert_eq!(view.handle_key(KeyAction::Refresh), Transition::None);
        assert!(view.is_loading());
    }

    #[test]
    fn successful_fetch_lays_out_one_viewport_per_column() {
        let view = ready_view(&[("To Do", 2), ("In Progress", 1), ("Done", 3)]);
        let ready = ready(&view);
        assert_eq!(ready.viewports.len(), 3);
        assert_eq!(ready.active, 0);
        assert_eq!(ready.viewports[0].width(), 28);
        assert_eq!(ready.viewports[0].height(), 26);
        assert_eq!(view.title.as_deref(), Some("Roadmap"));
    }

    #[test]
    fn failed_fetch_enters_error_and_only_accepts_dismiss() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 24));
        view.on_loaded(1, Err(FetchError::Client("no gh".into())));
        assert!(matches!(view.state, BoardState::Error(_)));

        assert_eq!(view.handle_key(KeyAction::Refresh), Transition::None);
        assert_eq!(view.handle_key(KeyAction::Right), Transition::None);
        assert_eq!(view.handle_key(KeyAction::Back), Transition::Back);
    }

    #[test]
    fn focus_moves_right_and_clamps() {
        let mut view = ready_view(&[("To Do", 1), ("In Progress", 1), ("Done", 1)]);
        view.handle_key(KeyAction::Right);
        view.handle_key(KeyAction::Right);
        assert_eq!(ready(&view).active, 2);
        view.handle_key(KeyAction::Right);
        assert_eq!(ready(&view).active, 2);
    }

    #[test]
    fn focus_moves_left_and_clamps() {
        let mut view = ready_view(&[("To Do", 1), ("Done", 1)]);
        view.handle_key(KeyAction::Left);
        assert_eq!(ready(&view).active, 0);
        view.handle_key(KeyAction::Right);
        view.handle_key(KeyAction::Left);
        assert_eq!(ready(&view).active, 0);
    }

    #[test]
    fn tab_switches_between_kanban_and_details() {
        let mut view = ready_view(&[("To Do", 1), ("Done", 1)]);
        assert_eq!(ready(&view).tab, BoardTab::Kanban);

        assert_eq!(view.handle_key(KeyAction::Tab), Transition::None);
        assert_eq!(ready(&view).tab, BoardTab::Details);
        view.handle_key(KeyAction::Tab);
        assert_eq!(ready(&view).tab, BoardTab::Kanban);
    }

    #[test]
    fn left_right_only_move_focus_on_kanban_tab() {
        let mut view = ready_view(&[("To Do", 1), ("In Progress", 1), ("Done", 1)]);
        view.handle_key(KeyAction::Tab);
        view.handle_key(KeyAction::Right);
        view.handle_key(KeyAction::Char('l'));
        assert_eq!(ready(&view).active, 0);

        view.handle_key(KeyAction::Tab);
        view.handle_key(KeyAction::Char('l'));
        assert_eq!(ready(&view).active, 1);
    }

    #[test]
    fn details_tab_moves_row_selection_not_viewports() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 12));
        view.on_loaded(1, Ok(board(&[("To Do", 10)])));
        view.handle_key(KeyAction::Tab);

        view.handle_key(KeyAction::Up);
        assert_eq!(ready(&view).detail_row, 0);
        for _ in 0..10 {
            view.handle_key(KeyAction::Down);
        }
        assert_eq!(ready(&view).detail_row, DETAIL_LABELS.len() - 1);
        assert_eq!(ready(&view).viewports[0].offset(), 0);

        view.handle_key(KeyAction::Home);
        assert_eq!(ready(&view).detail_row, 0);
    }

    #[test]
    fn refresh_and_back_work_on_both_tabs() {
        let mut view = ready_view(&[("To Do", 1)]);
        view.handle_key(KeyAction::Tab);
        assert_eq!(view.handle_key(KeyAction::Char('r')), Transition::Refresh);
        assert_eq!(view.handle_key(KeyAction::Back), Transition::Back);
        assert_eq!(view.handle_key(KeyAction::Char('q')), Transition::Quit);
    }

    #[test]
    fn details_come_from_the_project_entry() {
        use crate::model::Project;
        let created = chrono::DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let entry = ProjectEntry {
            org_login: "acme".into(),
            project: Project {
                id: "PVT_1".into(),
                number: 7,
                title: "Roadmap".into(),
                url: "https://github.com/orgs/acme/projects/7".into(),
                closed: true,
                created_at: Some(created),
            },
        };
        let view = BoardView::new("PVT_1".into(), Some(entry), 1, (80, 24));
        let details = view.details();

        assert_eq!(details.len(), DETAIL_LABELS.len());
        assert_eq!(details[1], ("Number", "7".to_string()));
        assert_eq!(details[2], ("Title", "Roadmap".to_string()));
        assert_eq!(details[3], ("Organization", "acme".to_string()));
        assert_eq!(details[4], ("Status", "Closed".to_string()));
        assert_eq!(details[6], ("Created At", "2024-03-01 09:30 UTC".to_string()));
        assert_eq!(view.heading(), "Project: Roadmap");
    }

    #[test]
    fn details_without_entry_fall_back_to_board() {
        let view = ready_view(&[("To Do", 1)]);
        let details = view.details();
        assert_eq!(details[0], ("ID", "PVT_1".to_string()));
        assert_eq!(details[2], ("Title", "Roadmap".to_string()));
        assert_eq!(details[3], ("Organization", "-".to_string()));
    }

    #[test]
    fn quit_is_honoured_while_loading() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 24));
        assert_eq!(view.handle_key(KeyAction::Char('q')), Transition::Quit);
        assert_eq!(view.handle_key(KeyAction::Char('r')), Transition::None);
    }

    #[test]
    fn empty_board_navigation_is_harmless() {
        let mut view = ready_view(&[]);
        view.handle_key(KeyAction::Right);
        view.handle_key(KeyAction::Down);
        assert_eq!(ready(&view).active, 0);
        assert!(ready(&view).active_column().is_none());
    }

    #[test]
    fn scrolling_only_moves_the_focused_column() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 12));
        view.on_loaded(1, Ok(board(&[("To Do", 10), ("Done", 10)])));

        view.handle_key(KeyAction::Right);
        view.handle_key(KeyAction::Down);
        view.handle_key(KeyAction::Down);
        let r = ready(&view);
        assert_eq!(r.viewports[0].offset(), 0);
        assert_eq!(r.viewports[1].offset(), 2);

        view.handle_key(KeyAction::End);
        let r = ready(&view);
        assert!(r.viewports[1].at_bottom());

        view.handle_key(KeyAction::Home);
        assert_eq!(ready(&view).viewports[1].offset(), 0);
    }

    #[test]
    fn resize_recomputes_viewports() {
        let mut view = ready_view(&[("To Do", 1), ("Done", 1)]);
        view.resize(120, 40);
        let r = ready(&view);
        assert!(r.viewports.iter().all(|vp| vp.width() == 58 && vp.height() == 36));
    }

    #[test]
    fn resize_while_loading_is_used_for_layout() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (0, 0));
        view.resize(60, 20);
        view.on_loaded(1, Ok(board(&[("To Do", 1), ("Done", 1), ("QA", 1)])));
        assert!(ready(&view).viewports.iter().all(|vp| vp.width() == 18 && vp.height() == 16));
    }

    #[test]
    fn refresh_reenters_loading_and_ignores_stale_results() {
        let mut view = ready_view(&[("To Do", 1)]);
        assert_eq!(view.handle_key(KeyAction::Refresh), Transition::Refresh);

        view.begin_refresh(2);
        assert!(view.is_loading());

        view.on_loaded(1, Ok(board(&[("Done", 1)])));
        assert!(view.is_loading());

        view.on_loaded(2, Ok(board(&[("QA", 1)])));
        assert_eq!(ready(&view).board.columns[0].name, "QA");
    }

    #[test]
    fn tick_only_spins_while_loading() {
        let mut view = BoardView::new("PVT_1".into(), None, 1, (80, 24));
        view.tick();
        view.tick();
        assert_eq!(view.spinner, 2);
        view.on_loaded(1, Ok(board(&[("To Do", 1)])));
        view.tick();
        assert_eq!(view.spinner, 2);
    }

    #[test]
    fn column_lines_fit_width() {
        let column = Column {
            name: "To Do".into(),
            cards: vec![
                card("1", "A rather long card title that needs wrapping"),
                Card {
                    id: "2".into(),
                    title: "Draft note".into(),
                    status: "To Do".into(),
                    url: String::new(),
                    content_type: ContentType::Draft,
                },
            ],
        };
        let lines = render_column(&column, 12);
        assert!(lines.iter().all(|l| l.text.chars().count() <= 12));
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Link).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Blank).count(), 2);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("Fix the login bug", 8), vec!["Fix the", "login", "bug"]);
        assert_eq!(wrap("", 8), vec![""]);
        assert_eq!(wrap("Supercalifragilistic", 6), vec!["Super…"]);
    }
}
