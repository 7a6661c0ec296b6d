//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use studybuddy_core::api::{ApiClient, GOOGLE_LOGIN_FAILED, MISSING_FIELDS};
use studybuddy_core::config::Config;
use studybuddy_core::session::{
    SessionStatus, SessionStore, mask_token, now_secs, now_secs_f64,
};

pub async fn login_password(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if email.is_empty() || password.is_empty() {
        anyhow::bail!(MISSING_FIELDS);
    }

    let api = ApiClient::from_config(config)?;
    let token = match api.login(email, &password).await {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            let message = err.login_message().to_string();
            return Err(anyhow::Error::new(err).context(message));
        }
    };

    store_session(&token)
}

pub async fn login_google(config: &Config, id_token: &str) -> Result<()> {
    let id_token = id_token.trim();
    if id_token.is_empty() {
        anyhow::bail!(MISSING_FIELDS);
    }

    let api = ApiClient::from_config(config)?;
    let token = api.google_login(id_token).await.map_err(|err| {
        tracing::warn!(error = %err, "google login failed");
        anyhow::Error::new(err).context(GOOGLE_LOGIN_FAILED)
    })?;

    store_session(&token)
}

fn store_session(token: &str) -> Result<()> {
    let store = SessionStore::default_location();
    let stored = store.save(token, now_secs())?;

    println!("✓ Logged in");
    println!("Session saved to: {}", store.path().display());
    println!("Valid until: {}", format_timestamp(stored.expires_at));
    Ok(())
}

/// Reads the password from stdin, prompting on stderr when interactive.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::default_location();
    if store.clear()? {
        println!("✓ Logged out");
        println!("Removed session from: {}", store.path().display());
    } else {
        println!("Not logged in");
    }
    Ok(())
}

/// Runs the session gate once. Fails unless the session is valid.
pub fn status() -> Result<()> {
    let store = SessionStore::default_location();

    // Read before checking: the check deletes bad credentials.
    let stored = store.load().ok().flatten();
    let status = store.check(now_secs_f64())?;

    match status {
        SessionStatus::Valid(claims) => {
            let token = stored.map(|s| s.token).unwrap_or_default();
            println!("Logged in (token: {})", mask_token(&token));
            if let Some(subject) = claims
                .get_str("email")
                .or_else(|| claims.get_str("sub"))
            {
                println!("User: {subject}");
            }
            if let Some(exp) = claims.expires_at() {
                println!("Token expires: {}", format_timestamp(exp));
            }
            Ok(())
        }
        denied => {
            println!("Session: {}", denied.label());
            anyhow::bail!("Unauthorized: {}", denied.label())
        }
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(
        || secs.to_string(),
        |utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string()
        },
    )
}
