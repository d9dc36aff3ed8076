//! Creates a valid Google session (access token) that we can use to call the Calendar API.
//!
//! The token cache lives at ~/.config/gcal-insights/session.toml and is only
//! readable by its owner.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};

use crate::app_config::{Credentials, base_dir};

pub struct Session {
    path: PathBuf,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        let expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        }
    }
}

impl Session {
    pub fn default_path() -> Result<PathBuf> {
        Ok(base_dir()?.join("session.toml"))
    }

    pub fn new(path: PathBuf, data: SessionData) -> Self {
        Session { path, data }
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.data.refresh_token.is_empty()
    }

    /// Load the cached session, if there is one.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read Google OAuth session from {}", path.display())
        })?;

        let data: SessionData = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse Google OAuth session from {}", path.display())
        })?;

        Ok(Some(Session {
            path: path.to_path_buf(),
            data,
        }))
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.data.expires_at
    }

    /// Exchange the refresh token for a new access token and persist it.
    pub async fn refresh(&mut self, creds: &Credentials) -> Result<()> {
        let client = Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        );

        let mut tokens = client
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()?;

        tracing::debug!(expires_at = %self.data.expires_at, "refreshed Google access token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(expires_at: DateTime<Utc>) -> SessionData {
        SessionData {
            access_token: "ya29.token".to_string(),
            refresh_token: "1//refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_missing_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load(&dir.path().join("session.toml")).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");
        let session = Session::new(path.clone(), data(Utc::now() + Duration::hours(1)));
        session.save().unwrap();

        let loaded = Session::load(&path).unwrap().unwrap();
        assert_eq!(loaded.data, session.data);
        assert_eq!(loaded.access_token(), "ya29.token");
        assert!(!loaded.is_expired());
        assert!(loaded.has_refresh_token());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        Session::new(path.clone(), data(Utc::now())).save().unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(
            dir.path().join("session.toml"),
            data(Utc::now() - Duration::seconds(1)),
        );
        assert!(session.is_expired());
    }
}
