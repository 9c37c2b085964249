use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::Action;

/// Forward terminal input and spinner ticks to the app until the receiver goes away.
pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>, tick: Duration) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(tick);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if tx.send(Action::Tick).is_err() {
                    break;
                }
            }
            maybe_event = reader.next() => {
                let action = match maybe_event {
                    Some(Ok(Event::Key(key))) => key_to_action(key),
                    Some(Ok(Event::Resize(width, height))) => Some(Action::Resize(width, height)),
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream failed");
                        break;
                    }
                    None => break,
                };
                if let Some(action) = action {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Action::Quit);
    }

    let key = match key.code {
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::Enter => KeyAction::Select,
        KeyCode::Esc => KeyAction::Back,
        KeyCode::Tab => KeyAction::Tab,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) => KeyAction::Char(c),
        _ => return None,
    };
    Some(Action::Key(key))
}

/// Keys as the views see them. Letters arrive as `Char` so text entry can use them;
/// `command` gives their meaning everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    Back,
    Refresh,
    Tab,
    Filter,
    Quit,
    Backspace,
    Char(char),
}

impl KeyAction {
    pub fn command(self) -> Self {
        match self {
            KeyAction::Char('q') => KeyAction::Quit,
            KeyAction::Char('k') => KeyAction::Up,
            KeyAction::Char('j') => KeyAction::Down,
            KeyAction::Char('h') => KeyAction::Left,
            KeyAction::Char('l') => KeyAction::Right,
            KeyAction::Char('g') => KeyAction::Home,
            KeyAction::Char('G') => KeyAction::End,
            KeyAction::Char('r') => KeyAction::Refresh,
            KeyAction::Char('/') => KeyAction::Filter,
            other => other,
        }
    }
}
