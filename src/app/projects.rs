use crate::error::FetchError;
use crate::event::KeyAction;
use crate::model::ProjectEntry;

use super::Transition;

pub enum ProjectsState {
    Loading,
    Ready(ProjectList),
    Error(FetchError),
}

/// Loaded projects plus the filter narrowing them. `selected` indexes the filtered rows.
pub struct ProjectList {
    pub entries: Vec<ProjectEntry>,
    pub selected: usize,
    pub filter: String,
    /// The filter line has the keyboard.
    pub editing: bool,
}

impl ProjectList {
    fn new(entries: Vec<ProjectEntry>) -> Self {
        Self {
            entries,
            selected: 0,
            filter: String::new(),
            editing: false,
        }
    }

    /// Entries whose `"<org> <title>"` contains the filter, ignoring case.
    pub fn visible(&self) -> Vec<&ProjectEntry> {
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                needle.is_empty()
                    || format!("{} {}", entry.org_login, entry.project.title)
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect()
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.editing = false;
        self.clamp_selection();
    }

    fn handle_key(&mut self, key: KeyAction) -> Transition {
        if self.editing {
            return self.handle_filter_key(key);
        }
        match key.command() {
            KeyAction::Quit => return Transition::Quit,
            KeyAction::Refresh => return Transition::Refresh,
            KeyAction::Select => return self.open_selected(),
            KeyAction::Filter => self.editing = true,
            KeyAction::Back if !self.filter.is_empty() => self.clear_filter(),
            other => self.navigate(other),
        }
        Transition::None
    }

    fn handle_filter_key(&mut self, key: KeyAction) -> Transition {
        match key {
            KeyAction::Char(c) => {
                self.filter.push(c);
                self.clamp_selection();
            }
            KeyAction::Backspace => {
                self.filter.pop();
                self.clamp_selection();
            }
            KeyAction::Select => self.editing = false,
            KeyAction::Back => self.clear_filter(),
            other => self.navigate(other),
        }
        Transition::None
    }

    fn navigate(&mut self, key: KeyAction) {
        let last = self.visible().len().saturating_sub(1);
        match key {
            KeyAction::Up => self.selected = self.selected.saturating_sub(1),
            KeyAction::Down => self.selected = (self.selected + 1).min(last),
            KeyAction::Home => self.selected = 0,
            KeyAction::End => self.selected = last,
            _ => {}
        }
    }

    fn open_selected(&self) -> Transition {
        self.visible()
            .get(self.selected)
            .map(|entry| Transition::Open((*entry).clone()))
            .unwrap_or(Transition::None)
    }
}

/// Every project the viewer can reach, across organizations.
pub struct ProjectListView {
    pub state: ProjectsState,
    pub spinner: usize,
    request: u64,
}

impl ProjectListView {
    pub fn new(request: u64) -> Self {
        Self {
            state: ProjectsState::Loading,
            spinner: 0,
            request,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ProjectsState::Loading)
    }

    pub fn begin_refresh(&mut self, request: u64) {
        self.request = request;
        self.spinner = 0;
        self.state = ProjectsState::Loading;
    }

    pub fn tick(&mut self) {
        if self.is_loading() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    pub fn on_loaded(&mut self, request: u64, result: Result<Vec<ProjectEntry>, FetchError>) {
        if request != self.request || !self.is_loading() {
            tracing::debug!(request, current = self.request, "discarding stale project list");
            return;
        }
        self.state = match result {
            Ok(entries) => ProjectsState::Ready(ProjectList::new(entries)),
            Err(err) => {
                tracing::warn!(error = %err, "project list fetch failed");
                ProjectsState::Error(err)
            }
        };
    }

    pub fn handle_key(&mut self, key: KeyAction) -> Transition {
        match &mut self.state {
            ProjectsState::Ready(list) => list.handle_key(key),
            ProjectsState::Loading => match key.command() {
                KeyAction::Quit => Transition::Quit,
                _ => Transition::None,
            },
            ProjectsState::Error(_) => match key.command() {
                KeyAction::Back | KeyAction::Select | KeyAction::Quit => Transition::Quit,
                _ => Transition::None,
            },
        }
    }
}
