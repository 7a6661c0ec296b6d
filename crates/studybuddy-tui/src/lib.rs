//! Full-screen terminal UI for StudyBuddy.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use studybuddy_core::config::Config;
use studybuddy_core::session::{SessionStore, now_secs_f64};

use crate::state::Route;

/// Runs the interactive UI until the user quits.
///
/// Starts on the dashboard when a valid session is already stored, and on
/// the login screen otherwise.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the UI fails.
pub async fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `studybuddy login`, `studybuddy status` or `studybuddy tags` instead."
        );
    }

    let store = SessionStore::default_location();
    let initial_route = match store.check(now_secs_f64()) {
        Ok(status) if status.is_valid() => Route::Dashboard,
        Ok(_) => Route::Login,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "could not check stored session");
            Route::Login
        }
    };
    tracing::info!(?initial_route, "starting interactive session");

    let mut runtime = TuiRuntime::new(config, store)?;
    let result = runtime.run(initial_route);
    drop(runtime);
    result?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
