//! OAuth client credentials for the Google provider.
//!
//! The user downloads `credentials.json` from the Google Cloud console
//! (OAuth client of type "Desktop app") and places it at:
//!   ~/.config/gcal-insights/credentials.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use insights_core::config::AppConfig;
use serde::{Deserialize, Serialize};

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// The console download wraps the credentials in an `installed` (desktop)
/// or `web` object. A bare object is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum CredentialsFile {
    Installed { installed: Credentials },
    Web { web: Credentials },
    Bare(Credentials),
}

pub fn base_dir() -> Result<PathBuf> {
    AppConfig::config_dir().context("Could not determine config directory")
}

pub fn credentials_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("credentials.json"))
}

pub fn load() -> Result<Credentials> {
    load_from(&credentials_path()?)
}

pub fn load_from(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        anyhow::bail!(
            "Google credentials not found.\n\n\
            Create an OAuth client (Desktop app) at\n\
            https://console.cloud.google.com/apis/credentials\n\
            with the Google Calendar API enabled, download its JSON and save it as:\n  \
            {}",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

    parse(&contents).with_context(|| format!("Failed to parse credentials from {}", path.display()))
}

fn parse(contents: &str) -> Result<Credentials> {
    let file: CredentialsFile = serde_json::from_str(contents)?;

    Ok(match file {
        CredentialsFile::Installed { installed } => installed,
        CredentialsFile::Web { web } => web,
        CredentialsFile::Bare(creds) => creds,
    })
}
