//! UI effects (side effects) returned by the reducer.
//!
//! The reducer (`update`) is pure: it mutates state and returns a list of
//! effects. The runtime executes them (HTTP calls, session file I/O, timers)
//! and feeds the results back as `UiEvent`s.

use std::time::Duration;

use crate::events::TimerEvent;
use crate::state::Route;

/// Effects that the runtime should execute after a state update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Exit the application.
    Quit,

    /// Deliver `event` back to the reducer after `delay`.
    Schedule { delay: Duration, event: TimerEvent },

    /// Read and validate the stored credential for a guarded navigation.
    /// Answers with `UiEvent::SessionChecked`.
    CheckSession { route: Route },

    /// Exchange email + password for a credential.
    SubmitLogin { email: String, password: String },

    /// Exchange a Google identity token for a credential.
    SubmitGoogleLogin { id_token: String },

    /// Persist a freshly issued credential with the one-day lifetime.
    PersistSession { token: String },

    /// Delete the stored credential (logout).
    ClearSession,

    /// Fetch the tag catalog for the selector mounted as `mount`.
    FetchTags { mount: u64 },

    /// Create a tag remotely on behalf of the selector mounted as `mount`.
    CreateTag { mount: u64, name: String },
}
