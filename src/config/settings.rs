//! User settings loaded from `config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::chat::{ThemeMode, REPLY_DELAY};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for one run of the chat screen.
///
/// Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start in dark mode
    pub dark_mode: bool,
    /// Delay before the simulated reply, in milliseconds
    pub reply_delay_ms: u64,
    /// Show "octocat 正在输入" while a reply is pending
    pub typing_indicator: bool,
    /// UI tick interval, in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            reply_delay_ms: REPLY_DELAY.as_millis() as u64,
            typing_indicator: true,
            tick_rate_ms: 100,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        // Zero would spin the event thread
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode(), ThemeMode::Light);
        assert_eq!(settings.reply_delay(), Duration::from_millis(1500));
        assert!(settings.typing_indicator);
        assert_eq!(settings.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dark_mode = true\nreply_delay_ms = 250").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.mode(), ThemeMode::Dark);
        assert_eq!(settings.reply_delay(), Duration::from_millis(250));
        assert!(settings.typing_indicator);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dark_mode = \"sometimes\"").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn test_tick_rate_floor() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.tick_rate(), Duration::from_millis(10));
    }
}
