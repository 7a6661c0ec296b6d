//! HTTP client for the StudyBuddy API.
//!
//! Endpoints consumed:
//! - `POST /api/users/login` (email + password)
//! - `POST /api/users/google-login` (Google identity token)
//! - `GET /api/tags`
//! - `POST /api/tags`

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::tags::Tag;

const LOGIN_PATH: &str = "api/users/login";
const GOOGLE_LOGIN_PATH: &str = "api/users/google-login";
const TAGS_PATH: &str = "api/tags";

/// Shown when a login form is submitted with an empty field.
pub const MISSING_FIELDS: &str = "Please fill in all fields";
/// Shown for a failed password login when the server gives no message.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Shown for any failed Google login.
pub const GOOGLE_LOGIN_FAILED: &str = "Google login failed. Try again.";

/// Errors from remote calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(
        "server returned HTTP {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Server { status: u16, message: Option<String> },

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("login response did not include a token")]
    MissingToken,
}

impl ApiError {
    /// The message supplied by the server in an error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// User-facing message for a failed password login.
    pub fn login_message(&self) -> &str {
        self.server_message().unwrap_or(INVALID_CREDENTIALS)
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the remote API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        // Url::join replaces the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, base })
    }

    /// Creates a client from config (honouring `STUDYBUDDY_API_URL`).
    ///
    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(&config.effective_api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Exchanges email + password for a session token.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a
    /// response without a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let body = serde_json::json!({ "email": email, "password": password });
        self.exchange(url, &body).await
    }

    /// Exchanges a Google identity token for a session token.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a
    /// response without a token.
    pub async fn google_login(&self, id_token: &str) -> Result<String, ApiError> {
        let url = self.endpoint(GOOGLE_LOGIN_PATH)?;
        let body = serde_json::json!({ "token": id_token });
        self.exchange(url, &body).await
    }

    async fn exchange(&self, url: Url, body: &serde_json::Value) -> Result<String, ApiError> {
        let response = self.http.post(url).json(body).send().await?;
        let response = check_status(response).await?;
        let login: LoginResponse = response.json().await?;
        login
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)
    }

    /// Fetches the tag catalog.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// unexpected body.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let url = self.endpoint(TAGS_PATH)?;
        let response = check_status(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Creates a tag and returns the server's record of it.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// unexpected body.
    pub async fn create_tag(&self, name: &str) -> Result<Tag, ApiError> {
        let url = self.endpoint(TAGS_PATH)?;
        let body = serde_json::json!({ "name": name });
        let response = check_status(self.http.post(url).json(&body).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Maps non-success responses to `ApiError::Server`, keeping any `message`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
