//! Session credential storage and validation.
//!
//! The credential issued by the auth service is stored in
//! `<base>/session.json` with restricted permissions (0600), together with a
//! client-side expiry one day after login. Tokens are never logged in full.
//!
//! Validation is split from storage: [`validate`] inspects a token against a
//! clock value and never touches disk, while [`SessionStore::check`] applies
//! the result (removing expired or malformed credentials).

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::paths;

/// Client-side lifetime of a stored credential (one day).
pub const SESSION_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// JWT segments are URL-safe base64; accept them with or without padding.
const JWT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Current wall-clock time in whole seconds since the epoch.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Current wall-clock time in seconds since the epoch, with millisecond precision.
pub fn now_secs_f64() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Masks a token for display (keeps the first and last few characters).
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Claims decoded from a credential payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry timestamp in seconds since epoch. Unset when absent or not a number.
    #[serde(default, deserialize_with = "deserialize_numeric_date")]
    pub exp: Option<f64>,
    /// Every other claim, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Returns a string claim, if present.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    /// Expiry in whole seconds, for display.
    pub fn expires_at(&self) -> Option<i64> {
        self.exp.map(|exp| exp.floor() as i64)
    }
}

/// NumericDate may be fractional. Anything other than a number leaves `exp` unset.
fn deserialize_numeric_date<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Reasons a credential payload cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes the claims of a JWT without verifying its signature.
///
/// # Errors
/// Returns an error if the token has no payload segment or the payload is not
/// base64-encoded JSON claims.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(DecodeError::MissingPayload)?;
    let bytes = JWT_BASE64.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Why a credential is not usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No credential is stored.
    Missing,
    /// The credential could not be decoded.
    Malformed,
}

/// Result of validating a credential against the clock.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Valid(Claims),
    Expired,
    Invalid(InvalidReason),
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid(_))
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Valid(_) => "valid",
            SessionStatus::Expired => "expired",
            SessionStatus::Invalid(InvalidReason::Missing) => "not logged in",
            SessionStatus::Invalid(InvalidReason::Malformed) => "malformed",
        }
    }
}

/// Validates a credential at time `now` (fractional seconds since epoch).
///
/// A credential expires only when its `exp` is strictly less than `now`; a
/// credential without a numeric `exp` never expires here.
pub fn validate(token: Option<&str>, now: f64) -> SessionStatus {
    let Some(token) = token else {
        return SessionStatus::Invalid(InvalidReason::Missing);
    };

    match decode_claims(token) {
        Ok(Claims { exp: Some(exp), .. }) if exp < now => SessionStatus::Expired,
        Ok(claims) => SessionStatus::Valid(claims),
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode session token");
            SessionStatus::Invalid(InvalidReason::Malformed)
        }
    }
}

/// A credential as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// The signed token issued by the auth service.
    pub token: String,
    /// Client-side expiry in seconds since epoch.
    pub expires_at: i64,
}

impl StoredCredential {
    /// Returns true once the client-side lifetime has elapsed.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<base>/session.json`.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored credential, if any.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<StoredCredential>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read session from {}", self.path.display())
                });
            }
        };

        let stored = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(stored))
    }

    /// Returns the stored token unless its client-side lifetime has elapsed.
    /// A lapsed credential is removed, the way a browser drops an expired cookie.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be read, parsed or removed.
    pub fn token_at(&self, now: i64) -> Result<Option<String>> {
        match self.load()? {
            Some(stored) if stored.is_expired_at(now) => {
                tracing::debug!("stored credential lifetime elapsed");
                self.clear()?;
                Ok(None)
            }
            Some(stored) => Ok(Some(stored.token)),
            None => Ok(None),
        }
    }

    /// Persists a token with a one-day lifetime starting at `now`.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be written.
    pub fn save(&self, token: &str, now: i64) -> Result<StoredCredential> {
        let stored = StoredCredential {
            token: token.to_string(),
            expires_at: now + SESSION_LIFETIME_SECS,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        tracing::info!(token = %mask_token(token), "session saved");
        Ok(stored)
    }

    /// Removes the stored credential. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }

    /// Reads and validates the stored credential at time `now` (fractional
    /// seconds since epoch).
    ///
    /// Expired or malformed credentials are deleted. An unreadable session
    /// file counts as malformed.
    ///
    /// # Errors
    /// Returns an error only if a bad credential cannot be removed.
    pub fn check(&self, now: f64) -> Result<SessionStatus> {
        let token = match self.token_at(now.floor() as i64) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "unreadable session file");
                self.clear()?;
                return Ok(SessionStatus::Invalid(InvalidReason::Malformed));
            }
        };

        let status = validate(token.as_deref(), now);
        if matches!(
            status,
            SessionStatus::Expired | SessionStatus::Invalid(InvalidReason::Malformed)
        ) {
            self.clear()?;
        }
        Ok(status)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use tempfile::tempdir;

    use super::*;

    /// Builds an unsigned JWT-shaped token carrying `claims`.
    pub(crate) fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    const NOW: i64 = 1_700_000_000;
    const NOW_F: f64 = NOW as f64;

    #[test]
    fn test_decode_claims_reads_exp_and_extra() {
        let token = token_with_claims(&serde_json::json!({"exp": NOW, "sub": "u1"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(NOW_F));
        assert_eq!(claims.get_str("sub"), Some("u1"));
    }

    #[test]
    fn test_decode_claims_accepts_padded_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":12}"#);
        let claims = decode_claims(&format!("h.{payload}.s")).unwrap();
        assert_eq!(claims.exp, Some(12.0));
    }

    #[test]
    fn test_decode_claims_keeps_fractional_exp() {
        let token = token_with_claims(&serde_json::json!({"exp": 100.9}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(100.9));
        assert_eq!(claims.expires_at(), Some(100));
    }

    #[test]
    fn test_decode_claims_without_numeric_exp_leaves_it_unset() {
        let no_exp = token_with_claims(&serde_json::json!({"sub": "u1"}));
        assert_eq!(decode_claims(&no_exp).unwrap().exp, None);

        let text_exp = token_with_claims(&serde_json::json!({"exp": "abc"}));
        assert_eq!(decode_claims(&text_exp).unwrap().exp, None);
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(matches!(
            decode_claims("not-a-token"),
            Err(DecodeError::MissingPayload)
        ));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(DecodeError::Base64(_))
        ));
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(decode_claims(&not_json), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_validate_states() {
        let valid = token_with_claims(&serde_json::json!({"exp": NOW + 60}));
        let expired = token_with_claims(&serde_json::json!({"exp": NOW - 1}));

        assert!(validate(Some(&valid), NOW_F).is_valid());
        assert_eq!(validate(Some(&expired), NOW_F), SessionStatus::Expired);
        assert_eq!(
            validate(None, NOW_F),
            SessionStatus::Invalid(InvalidReason::Missing)
        );
        assert_eq!(
            validate(Some("garbage"), NOW_F),
            SessionStatus::Invalid(InvalidReason::Malformed)
        );
    }

    #[test]
    fn test_validate_exp_equal_to_now_is_still_valid() {
        let token = token_with_claims(&serde_json::json!({"exp": NOW}));
        assert!(validate(Some(&token), NOW_F).is_valid());
    }

    #[test]
    fn test_validate_compares_fractional_seconds() {
        let token = token_with_claims(&serde_json::json!({"exp": 100.2}));
        assert_eq!(validate(Some(&token), 100.5), SessionStatus::Expired);
        assert!(validate(Some(&token), 100.1).is_valid());
    }

    #[test]
    fn test_validate_without_exp_is_valid() {
        let token = token_with_claims(&serde_json::json!({"sub": "u1"}));
        assert!(validate(Some(&token), NOW_F).is_valid());
    }

    #[test]
    fn test_save_sets_one_day_lifetime() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let stored = store.save("tok", NOW).unwrap();
        assert_eq!(stored.expires_at, NOW + SESSION_LIFETIME_SECS);
        assert_eq!(store.load().unwrap(), Some(stored));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save("tok", NOW).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_token_at_drops_lapsed_credential() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save("tok", NOW).unwrap();

        assert_eq!(store.token_at(NOW + 10).unwrap().as_deref(), Some("tok"));
        assert_eq!(store.token_at(NOW + SESSION_LIFETIME_SECS).unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_check_removes_expired_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let token = token_with_claims(&serde_json::json!({"exp": NOW - 5}));
        store.save(&token, NOW).unwrap();

        assert_eq!(store.check(NOW_F).unwrap(), SessionStatus::Expired);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_check_removes_malformed_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save("definitely.not-json.token", NOW).unwrap();

        assert_eq!(
            store.check(NOW_F).unwrap(),
            SessionStatus::Invalid(InvalidReason::Malformed)
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn test_check_treats_corrupt_file_as_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SessionStore::new(&path);

        assert_eq!(
            store.check(NOW_F).unwrap(),
            SessionStatus::Invalid(InvalidReason::Malformed)
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_check_keeps_valid_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let token = token_with_claims(&serde_json::json!({"exp": NOW + 3600}));
        store.save(&token, NOW).unwrap();

        assert!(store.check(NOW_F).unwrap().is_valid());
        assert!(store.path().exists());
    }

    #[test]
    fn test_check_keeps_token_without_exp() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let token = token_with_claims(&serde_json::json!({"sub": "u1"}));
        store.save(&token, NOW).unwrap();

        let status = store.check(NOW_F).unwrap();
        assert!(status.is_valid());
        assert!(store.path().exists());
    }

    #[test]
    fn test_check_missing_is_invalid_without_error() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(
            store.check(NOW_F).unwrap(),
            SessionStatus::Invalid(InvalidReason::Missing)
        );
    }

    #[test]
    fn test_clear_reports_presence() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(!store.clear().unwrap());
        store.save("tok", NOW).unwrap();
        assert!(store.clear().unwrap());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("abcdefghijklmnop"), "abcdef...mnop");
    }
}
