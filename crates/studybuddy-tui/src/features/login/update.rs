//! Login reducer.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{LoginField, LoginState};
use crate::effects::UiEffect;
use crate::events::{LoginMethod, LoginUiEvent, TimerEvent};
use crate::state::Route;

pub use studybuddy_core::api::{GOOGLE_LOGIN_FAILED, INVALID_CREDENTIALS, MISSING_FIELDS};

pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";

/// Delay between a successful login and the move to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
/// How long a failed-login message stays visible.
pub const MESSAGE_CLEAR_DELAY: Duration = Duration::from_secs(2);

pub fn handle_key(state: &mut LoginState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            vec![]
        }
        KeyCode::Enter => match state.focus {
            LoginField::GoogleToken => submit_google(state),
            LoginField::Email | LoginField::Password => submit(state),
        },
        KeyCode::Esc => vec![UiEffect::Quit],
        _ => {
            state.focused_input_mut().handle_key(&key);
            vec![]
        }
    }
}

/// Validates the form and starts the email/password exchange.
pub fn submit(state: &mut LoginState) -> Vec<UiEffect> {
    if state.pending {
        return vec![];
    }
    if state.email.is_empty() || state.password.is_empty() {
        state.error = Some(MISSING_FIELDS.to_string());
        state.success = None;
        return vec![];
    }

    state.pending = true;
    state.error = None;
    vec![UiEffect::SubmitLogin {
        email: state.email.value().to_string(),
        password: state.password.value().to_string(),
    }]
}

/// Starts the Google identity token exchange.
pub fn submit_google(state: &mut LoginState) -> Vec<UiEffect> {
    if state.pending {
        return vec![];
    }
    let id_token = state.google_token.value().trim().to_string();
    if id_token.is_empty() {
        state.error = Some(MISSING_FIELDS.to_string());
        state.success = None;
        return vec![];
    }

    state.pending = true;
    state.error = None;
    vec![UiEffect::SubmitGoogleLogin { id_token }]
}

pub fn handle_login_event(state: &mut LoginState, event: LoginUiEvent) -> Vec<UiEffect> {
    state.pending = false;
    match event {
        LoginUiEvent::Succeeded { method, token } => {
            tracing::info!(?method, "login succeeded");
            state.success = Some(LOGIN_SUCCESS.to_string());
            state.error = None;
            state.clear_fields();
            vec![
                UiEffect::PersistSession { token },
                UiEffect::Schedule {
                    delay: REDIRECT_DELAY,
                    event: TimerEvent::NavigateTo(Route::Dashboard),
                },
            ]
        }
        LoginUiEvent::Failed {
            method,
            server_message,
        } => {
            let message = match method {
                LoginMethod::Password => {
                    server_message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string())
                }
                LoginMethod::Google => GOOGLE_LOGIN_FAILED.to_string(),
            };
            state.success = None;
            state.error = Some(message);
            state.error_generation += 1;
            vec![UiEffect::Schedule {
                delay: MESSAGE_CLEAR_DELAY,
                event: TimerEvent::ClearLoginError {
                    generation: state.error_generation,
                },
            }]
        }
    }
}

/// Clears the error scheduled at `generation`, unless a newer one replaced it.
pub fn clear_error(state: &mut LoginState, generation: u64) {
    if state.error_generation == generation {
        state.error = None;
    }
}
