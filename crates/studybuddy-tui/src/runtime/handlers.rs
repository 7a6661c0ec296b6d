//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return the `UiEvent`
//! describing the result. They never touch state; the runtime spawns them
//! and forwards their result to the inbox.

use std::time::Duration;

use studybuddy_core::api::{ApiClient, ApiError};
use studybuddy_core::session::{
    InvalidReason, SessionStatus, SessionStore, now_secs, now_secs_f64,
};

use crate::events::{LoginMethod, LoginUiEvent, TagUiEvent, TimerEvent, UiEvent};
use crate::state::Route;

pub async fn timer(delay: Duration, event: TimerEvent) -> UiEvent {
    tokio::time::sleep(delay).await;
    UiEvent::Timer(event)
}

/// Reads and validates the stored credential for a guarded navigation.
pub async fn check_session(store: SessionStore, route: Route) -> UiEvent {
    let status = tokio::task::spawn_blocking(move || store.check(now_secs_f64()))
        .await
        .map_err(anyhow::Error::from)
        .and_then(|result| result)
        .unwrap_or_else(|err| {
            tracing::error!(error = %format!("{err:#}"), "session check failed");
            SessionStatus::Invalid(InvalidReason::Malformed)
        });
    UiEvent::SessionChecked { route, status }
}

/// Writes a freshly issued credential. Returns an event only on failure.
pub fn persist_session(store: &SessionStore, token: &str) -> Option<UiEvent> {
    let err = store.save(token, now_secs()).err()?;
    tracing::error!(error = %format!("{err:#}"), "failed to persist session");
    Some(UiEvent::SessionPersistFailed {
        error: err.to_string(),
    })
}

pub async fn password_login(api: ApiClient, email: String, password: String) -> UiEvent {
    login_event(LoginMethod::Password, api.login(&email, &password).await)
}

pub async fn google_login(api: ApiClient, id_token: String) -> UiEvent {
    login_event(LoginMethod::Google, api.google_login(&id_token).await)
}

fn login_event(method: LoginMethod, result: Result<String, ApiError>) -> UiEvent {
    match result {
        Ok(token) => UiEvent::Login(LoginUiEvent::Succeeded { method, token }),
        Err(err) => {
            tracing::warn!(?method, error = %err, "login failed");
            UiEvent::Login(LoginUiEvent::Failed {
                method,
                server_message: err.server_message().map(str::to_string),
            })
        }
    }
}

pub async fn fetch_tags(api: ApiClient, mount: u64) -> UiEvent {
    let result = api.list_tags().await.map_err(|err| err.to_string());
    UiEvent::Tags(TagUiEvent::Loaded { mount, result })
}

pub async fn create_tag(api: ApiClient, mount: u64, name: String) -> UiEvent {
    let result = api.create_tag(&name).await.map_err(|err| err.to_string());
    UiEvent::Tags(TagUiEvent::Created {
        mount,
        name,
        result,
    })
}
