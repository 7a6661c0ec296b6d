//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use studybuddy_core::session::SessionStatus;

use crate::effects::UiEffect;
use crate::events::{TagUiEvent, TimerEvent, UiEvent};
use crate::features::decks::DeckKeyOutcome;
use crate::features::gate::{GateOutcome, GateState, UNAUTHORIZED_NOTICE};
use crate::features::profile::DashboardAction;
use crate::features::{login, profile};
use crate::state::{AppState, Route};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Timer(TimerEvent::NavigateTo(route)) => navigate(app, route),
        UiEvent::Timer(TimerEvent::ClearLoginError { generation }) => {
            login::clear_error(&mut app.login, generation);
            vec![]
        }
        UiEvent::SessionChecked { route, status } => handle_session_checked(app, route, status),
        UiEvent::SessionPersistFailed { error } => {
            app.login.success = None;
            app.login.error = Some(format!("Could not save session: {error}"));
            vec![]
        }
        UiEvent::Login(login_event) => login::handle_login_event(&mut app.login, login_event),
        UiEvent::Tags(TagUiEvent::Loaded { mount, result }) => {
            app.decks.selector.handle_loaded(mount, result);
            vec![]
        }
        UiEvent::Tags(TagUiEvent::Created {
            mount,
            name,
            result,
        }) => {
            let decks = &mut app.decks;
            decks
                .selector
                .handle_created(&mut decks.tags, mount, &name, result);
            vec![]
        }
    }
}

/// Moves to `route`. Protected routes get a fresh gate in `Checking`.
pub fn navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    tracing::debug!(?route, "navigate");
    app.route = route;

    if route.is_protected() {
        let (gate, effects) = GateState::checking(route);
        app.gate = Some(gate);
        effects
    } else {
        app.gate = None;
        app.login.success = None;
        vec![]
    }
}

fn handle_session_checked(app: &mut AppState, route: Route, status: SessionStatus) -> Vec<UiEffect> {
    // A newer navigation owns the screen now.
    if app.route != route {
        return vec![];
    }
    let Some(gate) = app.gate.as_mut() else {
        return vec![];
    };

    match gate.resolve(status) {
        Some(GateOutcome::Permit) => {
            app.notice = None;
            on_enter(app, route)
        }
        Some(GateOutcome::Deny) => {
            app.notice = Some(UNAUTHORIZED_NOTICE.to_string());
            navigate(app, Route::Login)
        }
        None => vec![],
    }
}

/// Runs once a protected route has been permitted.
fn on_enter(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    match route {
        Route::Decks => {
            let mount = app.next_mount_id();
            app.decks.mount(mount)
        }
        Route::Dashboard | Route::Login => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if app.route == Route::Login {
        return login::handle_key(&mut app.login, key);
    }

    // Guarded content takes no input until the gate permits it.
    if !app.is_permitted() {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![UiEffect::Quit],
            _ => vec![],
        };
    }

    match app.route {
        Route::Dashboard => match profile::handle_key(&mut app.profile, key) {
            DashboardAction::None => vec![],
            DashboardAction::Navigate(route) => navigate(app, route),
            DashboardAction::Logout => logout(app),
            DashboardAction::Quit => vec![UiEffect::Quit],
        },
        Route::Decks => match app.decks.handle_key(key) {
            DeckKeyOutcome::Handled(effects) => effects,
            DeckKeyOutcome::Back => navigate(app, Route::Dashboard),
        },
        Route::Login => vec![],
    }
}

fn logout(app: &mut AppState) -> Vec<UiEffect> {
    app.profile.modal = None;
    app.notice = None;
    let mut effects = vec![UiEffect::ClearSession];
    effects.extend(navigate(app, Route::Login));
    effects
}

fn handle_paste(app: &mut AppState, text: &str) {
    if app.route == Route::Login {
        app.login.focused_input_mut().insert_str(text);
        return;
    }
    if !app.is_permitted() {
        return;
    }
    match app.route {
        Route::Dashboard => profile::paste(&mut app.profile, text),
        Route::Decks => app.decks.paste(text),
        Route::Login => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use studybuddy_core::session::{Claims, InvalidReason};
    use studybuddy_core::tags::Tag;

    use super::*;
    use crate::common::TextInput;
    use crate::events::{LoginMethod, LoginUiEvent};

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn valid() -> SessionStatus {
        SessionStatus::Valid(Claims {
            exp: None,
            extra: Default::default(),
        })
    }

    fn permitted_at(route: Route) -> AppState {
        let mut app = AppState::new();
        navigate(&mut app, route);
        update(
            &mut app,
            UiEvent::SessionChecked {
                route,
                status: valid(),
            },
        );
        app
    }

    #[test]
    fn test_enter_with_empty_fields_shows_validation_only() {
        let mut app = AppState::new();
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.login.error.as_deref(), Some(login::MISSING_FIELDS));
    }

    #[test]
    fn test_successful_login_redirects_to_dashboard_after_delay() {
        let mut app = AppState::new();
        app.login.email = TextInput::with_value("a@b.c");
        app.login.password = TextInput::with_value("secret");
        assert_eq!(update(&mut app, press(KeyCode::Enter)).len(), 1);

        let effects = update(
            &mut app,
            UiEvent::Login(LoginUiEvent::Succeeded {
                method: LoginMethod::Password,
                token: "tok".to_string(),
            }),
        );
        assert!(effects.contains(&UiEffect::PersistSession {
            token: "tok".to_string()
        }));
        assert!(effects.contains(&UiEffect::Schedule {
            delay: Duration::from_secs(2),
            event: TimerEvent::NavigateTo(Route::Dashboard),
        }));
        assert_eq!(app.route, Route::Login);

        let effects = update(&mut app, UiEvent::Timer(TimerEvent::NavigateTo(Route::Dashboard)));
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(
            effects,
            vec![UiEffect::CheckSession {
                route: Route::Dashboard
            }]
        );
    }

    #[test]
    fn test_failed_login_schedules_message_clear() {
        let mut app = AppState::new();
        let effects = update(
            &mut app,
            UiEvent::Login(LoginUiEvent::Failed {
                method: LoginMethod::Password,
                server_message: None,
            }),
        );
        assert_eq!(app.login.error.as_deref(), Some(login::INVALID_CREDENTIALS));
        let [UiEffect::Schedule { delay, event }] = effects.as_slice() else {
            panic!("expected a single timer, got {effects:?}");
        };
        assert_eq!(*delay, login::MESSAGE_CLEAR_DELAY);

        update(&mut app, UiEvent::Timer(event.clone()));
        assert_eq!(app.login.error, None);
    }

    #[test]
    fn test_protected_route_waits_for_check() {
        let mut app = AppState::new();
        navigate(&mut app, Route::Dashboard);
        assert!(!app.is_permitted());
        assert!(update(&mut app, press(KeyCode::Char('n'))).is_empty());
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_expired_or_malformed_session_redirects_to_login() {
        for status in [
            SessionStatus::Expired,
            SessionStatus::Invalid(InvalidReason::Malformed),
            SessionStatus::Invalid(InvalidReason::Missing),
        ] {
            let mut app = AppState::new();
            navigate(&mut app, Route::Decks);
            let effects = update(
                &mut app,
                UiEvent::SessionChecked {
                    route: Route::Decks,
                    status,
                },
            );
            assert!(effects.is_empty());
            assert_eq!(app.route, Route::Login);
            assert_eq!(app.gate, None);
            assert_eq!(app.notice.as_deref(), Some(UNAUTHORIZED_NOTICE));
        }
    }

    #[test]
    fn test_stale_session_check_is_ignored() {
        let mut app = AppState::new();
        navigate(&mut app, Route::Dashboard);
        navigate(&mut app, Route::Decks);
        update(
            &mut app,
            UiEvent::SessionChecked {
                route: Route::Dashboard,
                status: SessionStatus::Expired,
            },
        );
        assert_eq!(app.route, Route::Decks);
        assert!(app.gate.as_ref().is_some_and(GateState::is_checking));
    }

    #[test]
    fn test_permitted_decks_mounts_tag_selector() {
        let mut app = AppState::new();
        navigate(&mut app, Route::Decks);
        let effects = update(
            &mut app,
            UiEvent::SessionChecked {
                route: Route::Decks,
                status: valid(),
            },
        );
        let mount = app.decks.selector.mount_id();
        assert_eq!(effects, vec![UiEffect::FetchTags { mount }]);
        assert!(app.is_permitted());
    }

    #[test]
    fn test_created_tag_lands_in_deck_selection() {
        let mut app = permitted_at(Route::Decks);
        let mount = app.decks.selector.mount_id();
        app.decks.tags = vec!["biology".to_string()];
        update(
            &mut app,
            UiEvent::Tags(TagUiEvent::Loaded {
                mount,
                result: Ok(vec![Tag::new("1", "biology")]),
            }),
        );

        app.decks.selector.new_tag.set("physics");
        let effects = app.decks.selector.add_tag(&mut app.decks.tags);
        assert_eq!(
            effects,
            vec![UiEffect::CreateTag {
                mount,
                name: "physics".to_string()
            }]
        );

        update(
            &mut app,
            UiEvent::Tags(TagUiEvent::Created {
                mount,
                name: "physics".to_string(),
                result: Ok(Tag::new("2", "physics")),
            }),
        );
        assert_eq!(app.decks.tags, vec!["biology", "physics"]);
        assert!(app.decks.selector.catalog.contains("physics"));
    }

    #[test]
    fn test_logout_clears_session_and_returns_to_login() {
        let mut app = permitted_at(Route::Dashboard);
        let effects = update(&mut app, press(KeyCode::Char('l')));
        assert_eq!(effects, vec![UiEffect::ClearSession]);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = permitted_at(Route::Decks);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_leaving_decks_rechecks_dashboard() {
        let mut app = permitted_at(Route::Decks);
        let effects = update(&mut app, press(KeyCode::Esc));
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(
            effects,
            vec![UiEffect::CheckSession {
                route: Route::Dashboard
            }]
        );
    }
}
