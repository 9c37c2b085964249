pub mod board;
pub mod projects;
pub mod viewport;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::FetchError;
use crate::event::KeyAction;
use crate::github::BoardSource;
use crate::model::{Board, ProjectEntry};

use board::BoardView;
use projects::ProjectListView;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Resize(u16, u16),
    Tick,
    ProjectsLoaded {
        request: u64,
        result: Result<Vec<ProjectEntry>, FetchError>,
    },
    BoardLoaded {
        request: u64,
        result: Result<Board, FetchError>,
    },
    Quit,
}

/// What a view asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    Refresh,
    Open(ProjectEntry),
    Back,
    Quit,
}

pub struct App {
    pub projects: Option<ProjectListView>,
    pub board: Option<BoardView>,
    pub should_quit: bool,
    size: (u16, u16),
    source: Arc<dyn BoardSource>,
    action_tx: mpsc::UnboundedSender<Action>,
    next_request: u64,
}

impl App {
    fn new(
        source: Arc<dyn BoardSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        size: (u16, u16),
    ) -> Self {
        Self {
            projects: None,
            board: None,
            should_quit: false,
            size,
            source,
            action_tx,
            next_request: 0,
        }
    }

    /// Start on the list of all projects.
    pub fn with_project_list(
        source: Arc<dyn BoardSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        size: (u16, u16),
    ) -> Self {
        let mut app = Self::new(source, action_tx, size);
        let request = app.next_request();
        app.projects = Some(ProjectListView::new(request));
        app.spawn_project_fetch(request);
        app
    }

    /// Start directly on one project's board.
    pub fn with_board(
        source: Arc<dyn BoardSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        size: (u16, u16),
        project_id: String,
    ) -> Self {
        let mut app = Self::new(source, action_tx, size);
        app.open_board(project_id, None);
        app
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Resize(width, height) => {
                self.size = (width, height);
                if let Some(board) = &mut self.board {
                    board.resize(width, height);
                }
            }
            Action::Tick => {
                if let Some(board) = &mut self.board {
                    board.tick();
                } else if let Some(projects) = &mut self.projects {
                    projects.tick();
                }
            }
            Action::ProjectsLoaded { request, result } => {
                if let Some(projects) = &mut self.projects {
                    projects.on_loaded(request, result);
                }
            }
            Action::BoardLoaded { request, result } => match &mut self.board {
                Some(board) => board.on_loaded(request, result),
                None => tracing::debug!(request, "board result arrived after the board was closed"),
            },
            Action::Key(key) => {
                let transition = if let Some(board) = &mut self.board {
                    board.handle_key(key)
                } else if let Some(projects) = &mut self.projects {
                    projects.handle_key(key)
                } else {
                    Transition::None
                };
                self.apply(transition);
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Quit => self.should_quit = true,
            Transition::Open(entry) => {
                self.open_board(entry.project.id.clone(), Some(entry));
            }
            Transition::Back => {
                if self.board.take().is_some() && self.projects.is_some() {
                    return;
                }
                self.should_quit = true;
            }
            Transition::Refresh => {
                let request = self.next_request();
                if let Some(board) = &mut self.board {
                    board.begin_refresh(request);
                    let project_id = board.project_id.clone();
                    self.spawn_board_fetch(request, project_id);
                } else if let Some(projects) = &mut self.projects {
                    projects.begin_refresh(request);
                    self.spawn_project_fetch(request);
                }
            }
        }
    }

    fn open_board(&mut self, project_id: String, entry: Option<ProjectEntry>) {
        let request = self.next_request();
        self.board = Some(BoardView::new(project_id.clone(), entry, request, self.size));
        self.spawn_board_fetch(request, project_id);
    }

    fn next_request(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    fn spawn_project_fetch(&self, request: u64) {
        tracing::debug!(request, "fetching project list");
        let source = self.source.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = source.list_projects().await;
            let _ = tx.send(Action::ProjectsLoaded { request, result });
        });
    }

    fn spawn_board_fetch(&self, request: u64, project_id: String) {
        tracing::debug!(request, %project_id, "fetching board");
        let source = self.source.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = source.load_board(&project_id).await;
            let _ = tx.send(Action::BoardLoaded { request, result });
        });
    }
}
