//! Dashboard reducer.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{ModalField, ModalKind, ProfileModal, ProfileState};
use crate::state::Route;

/// What the dashboard asks the app to do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Navigate(Route),
    Logout,
    Quit,
}

pub fn handle_key(state: &mut ProfileState, key: KeyEvent) -> DashboardAction {
    if state.modal.is_some() {
        handle_modal_key(state, key);
        return DashboardAction::None;
    }

    match key.code {
        KeyCode::Char('e') => {
            state.modal = Some(ProfileModal::open(ModalKind::EditUser, &state.profile));
            DashboardAction::None
        }
        KeyCode::Char('p') => {
            state.modal = Some(ProfileModal::open(ModalKind::EditPersonal, &state.profile));
            DashboardAction::None
        }
        KeyCode::Char('n') => DashboardAction::Navigate(Route::Decks),
        KeyCode::Char('l') => DashboardAction::Logout,
        KeyCode::Char('q') | KeyCode::Esc => DashboardAction::Quit,
        _ => DashboardAction::None,
    }
}

fn handle_modal_key(state: &mut ProfileState, key: KeyEvent) {
    let Some(modal) = state.modal.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => state.modal = None,
        KeyCode::Enter => {
            if let Some(modal) = state.modal.take() {
                modal.apply(&mut state.profile);
            }
        }
        KeyCode::Tab | KeyCode::Down => modal.focus_next(),
        KeyCode::BackTab | KeyCode::Up => modal.focus_prev(),
        _ => match modal.focused_mut() {
            Some(ModalField::Text { input, .. }) => {
                input.handle_key(&key);
            }
            Some(ModalField::Choice {
                options, selected, ..
            }) => match key.code {
                KeyCode::Left => *selected = (*selected + options.len() - 1) % options.len(),
                KeyCode::Right | KeyCode::Char(' ') => *selected = (*selected + 1) % options.len(),
                _ => {}
            },
            None => {}
        },
    }
}

/// Inserts pasted text into the focused modal field.
pub(crate) fn paste(state: &mut ProfileState, text: &str) {
    if let Some(ModalField::Text { input, .. }) =
        state.modal.as_mut().and_then(ProfileModal::focused_mut)
    {
        input.insert_str(text);
    }
}
