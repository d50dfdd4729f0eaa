//! Admin session persistence.
//!
//! The token returned by the login endpoint is kept in `session.json` in the
//! data directory so the admin stays signed in across runs.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback display name when the token carries none
pub const DEFAULT_USERNAME: &str = "admin";

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// Build a session from a token, taking the username from the server
    /// reply if given, else from the token payload
    pub fn new(token: String, username: Option<String>) -> Self {
        let username = username
            .filter(|name| !name.trim().is_empty())
            .or_else(|| username_from_token(&token))
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        Self { token, username }
    }
}

/// Read `username` (or `sub`) out of a JWT payload without verifying it
pub fn username_from_token(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    ["username", "sub"]
        .iter()
        .filter_map(|key| claims.get(*key).and_then(|v| v.as_str()))
        .find(|name| !name.trim().is_empty())
        .map(str::to_string)
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing or unreadable file means signed out
    pub fn load(&self) -> Option<Session> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring corrupt session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        write_private(&self.path, contents.as_bytes())
            .with_context(|| format!("Failed to write session file {:?}", self.path))?;
        tracing::info!("Saved session for '{}'", session.username);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session file {:?}", self.path))?;
            tracing::info!("Cleared stored session");
        }
        Ok(())
    }
}

/// The file holds a bearer token: owner read/write only
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on create
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_username_from_token() {
        let token = jwt(serde_json::json!({"username": "robert", "sub": "42"}));
        assert_eq!(username_from_token(&token).as_deref(), Some("robert"));

        let token = jwt(serde_json::json!({"sub": "ops"}));
        assert_eq!(username_from_token(&token).as_deref(), Some("ops"));

        assert_eq!(username_from_token("not-a-jwt"), None);
        assert_eq!(username_from_token("a.%%%.c"), None);
    }

    #[test]
    fn test_session_username_fallbacks() {
        let token = jwt(serde_json::json!({"username": "robert"}));
        assert_eq!(Session::new(token.clone(), Some("server".into())).username, "server");
        assert_eq!(Session::new(token, Some("  ".into())).username, "robert");
        assert_eq!(Session::new("opaque".into(), None).username, DEFAULT_USERNAME);
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().is_none());

        let session = Session::new("tok".into(), Some("admin".into()));
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{}").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Session::new("tok".into(), None)).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().token, "tok");
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_none());
    }
}
