//! UI events delivered to the reducer.
//!
//! Terminal input, ticks, timers and async completions all arrive as
//! `UiEvent`s through the runtime inbox.

use crossterm::event::Event;
use studybuddy_core::session::SessionStatus;
use studybuddy_core::tags::Tag;

use crate::state::Route;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick for animations.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// A scheduled timer fired.
    Timer(TimerEvent),
    /// The session check for a guarded navigation finished.
    SessionChecked { route: Route, status: SessionStatus },
    /// The credential could not be written to disk.
    SessionPersistFailed { error: String },
    Login(LoginUiEvent),
    Tags(TagUiEvent),
}

/// Events scheduled with `UiEffect::Schedule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    NavigateTo(Route),
    /// Clear the login error if it is still the one shown at `generation`.
    ClearLoginError { generation: u64 },
}

/// How the user authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    Password,
    Google,
}

#[derive(Debug, Clone)]
pub enum LoginUiEvent {
    Succeeded {
        method: LoginMethod,
        token: String,
    },
    Failed {
        method: LoginMethod,
        /// Message from the server's error body, if it sent one.
        server_message: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum TagUiEvent {
    Loaded {
        mount: u64,
        result: Result<Vec<Tag>, String>,
    },
    Created {
        mount: u64,
        name: String,
        result: Result<Tag, String>,
    },
}
