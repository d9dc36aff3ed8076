//! Application configuration at ~/.config/gcal-insights/config.toml

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR_NAME, DEFAULT_CALENDAR_ID};
use crate::error::{InsightsError, InsightsResult};

const DEFAULT_REDIRECT_PORT: u16 = 8085;
const CATEGORIES_FILE: &str = "categories.json";

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_redirect_port() -> u16 {
    DEFAULT_REDIRECT_PORT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Calendar to analyze.
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// Local port for the OAuth redirect.
    #[serde(default = "default_redirect_port")]
    pub redirect_port: u16,

    /// Where the color → category mapping lives (defaults to the config dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            calendar_id: default_calendar_id(),
            redirect_port: default_redirect_port(),
            categories_path: None,
        }
    }
}

impl AppConfig {
    /// ~/.config/gcal-insights (platform equivalent elsewhere)
    pub fn config_dir() -> InsightsResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| InsightsError::Config("Could not determine config directory".into()))?
            .join(APP_DIR_NAME);
        Ok(dir)
    }

    pub fn config_path() -> InsightsResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> InsightsResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> InsightsResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| InsightsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| InsightsError::Config(e.to_string()))
    }

    /// Location of the category mapping file, with `~` expanded.
    pub fn categories_path(&self) -> InsightsResult<PathBuf> {
        match &self.categories_path {
            Some(path) => Ok(PathBuf::from(
                shellexpand::tilde(&path.to_string_lossy()).into_owned(),
            )),
            None => Ok(Self::config_dir()?.join(CATEGORIES_FILE)),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> InsightsResult<()> {
        let contents = format!(
            "\
# gcal-insights configuration

# Calendar to analyze:
# calendar_id = \"{DEFAULT_CALENDAR_ID}\"

# Local port Google redirects to after you grant access:
# redirect_port = {DEFAULT_REDIRECT_PORT}

# Where your color -> category labels are stored:
# categories_path = \"~/.config/{APP_DIR_NAME}/{CATEGORIES_FILE}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                InsightsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| InsightsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.calendar_id, "primary");
        assert_eq!(config.redirect_port, 8085);
    }

    #[test]
    fn test_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gcal-insights").join("config.toml");
        AppConfig::create_default_config(&path).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "calendar_id = \"me@example.com\"\nredirect_port = 9000\ncategories_path = \"/tmp/labels.json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.calendar_id, "me@example.com");
        assert_eq!(config.redirect_port, 9000);
        assert_eq!(
            config.categories_path().unwrap(),
            PathBuf::from("/tmp/labels.json")
        );
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "redirect_port = \"not a port\"\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(InsightsError::Config(_))
        ));
    }
}
