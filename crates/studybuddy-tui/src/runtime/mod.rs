//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; async handlers send their resulting `UiEvent` to the inbox,
//! which the loop drains every iteration.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use studybuddy_core::api::ApiClient;
use studybuddy_core::config::Config;
use studybuddy_core::session::SessionStore;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Route};
use crate::{render, terminal, update};

/// Poll interval while an exchange or check is in flight (spinner cadence).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    store: SessionStore,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the API client or the terminal cannot be set up.
    pub fn new(config: &Config, store: SessionStore) -> Result<Self> {
        let api = ApiClient::from_config(config)?;

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state: AppState::new(),
            api,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop, starting at `initial_route`.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self, initial_route: Route) -> Result<()> {
        let effects = update::navigate(&mut self.state, initial_route);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                dirty |= !matches!(&event, UiEvent::Tick) || self.is_busy();
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    /// True while something animates.
    fn is_busy(&self) -> bool {
        self.state.login.pending
            || self.state.decks.selector.loading
            || self.state.decks.selector.pending_create.is_some()
            || self
                .state
                .gate
                .as_ref()
                .is_some_and(|gate| gate.is_checking())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.is_busy() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its result to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Schedule { delay, event } => {
                self.spawn_effect(move || handlers::timer(delay, event));
            }
            UiEffect::CheckSession { route } => {
                let store = self.store.clone();
                self.spawn_effect(move || handlers::check_session(store, route));
            }
            UiEffect::SubmitLogin { email, password } => {
                let api = self.api.clone();
                self.spawn_effect(move || handlers::password_login(api, email, password));
            }
            UiEffect::SubmitGoogleLogin { id_token } => {
                let api = self.api.clone();
                self.spawn_effect(move || handlers::google_login(api, id_token));
            }
            UiEffect::PersistSession { token } => {
                if let Some(event) = handlers::persist_session(&self.store, &token) {
                    let effects = update::update(&mut self.state, event);
                    self.execute_effects(effects);
                }
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.store.clear() {
                    tracing::error!(error = %format!("{err:#}"), "failed to clear session");
                }
            }
            UiEffect::FetchTags { mount } => {
                let api = self.api.clone();
                self.spawn_effect(move || handlers::fetch_tags(api, mount));
            }
            UiEffect::CreateTag { mount, name } => {
                let api = self.api.clone();
                self.spawn_effect(move || handlers::create_tag(api, mount, name));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
