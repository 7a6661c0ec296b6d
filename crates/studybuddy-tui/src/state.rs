//! Application state.

use crate::features::decks::DeckEditorState;
use crate::features::gate::GateState;
use crate::features::login::LoginState;
use crate::features::profile::ProfileState;

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Public entry screen.
    #[default]
    Login,
    /// Main area: profile and dashboard.
    Dashboard,
    /// Deck editor hosting the tag selector.
    Decks,
}

impl Route {
    /// Whether the route is rendered only behind a valid credential.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Decks => "Create Deck",
        }
    }
}

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    /// Gate for the current route; `None` on public routes.
    pub gate: Option<GateState>,
    pub login: LoginState,
    pub profile: ProfileState,
    pub decks: DeckEditorState,
    /// Notice shown on the entry screen after a denied navigation.
    pub notice: Option<String>,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// Source of mount ids for widgets that fetch on mount.
    next_mount: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh mount id.
    pub fn next_mount_id(&mut self) -> u64 {
        self.next_mount += 1;
        self.next_mount
    }

    /// True once the gate has permitted the current protected route.
    pub fn is_permitted(&self) -> bool {
        !self.route.is_protected() || self.gate.as_ref().is_some_and(GateState::is_permitted)
    }
}
