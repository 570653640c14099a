//! XDG Base Directory support.

use std::path::PathBuf;

const APP_DIR: &str = "octochat";

/// XDG directory paths for Octochat.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    /// Config directory (~/.config/octochat or XDG_CONFIG_HOME/octochat)
    pub config: PathBuf,
    /// State directory (~/.local/state/octochat or XDG_STATE_HOME/octochat)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::resolve(
            &home,
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            std::env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        )
    }

    fn resolve(home: &std::path::Path, config: Option<PathBuf>, state: Option<PathBuf>) -> Self {
        Self {
            config: config
                .unwrap_or_else(|| home.join(".config"))
                .join(APP_DIR),
            state: state
                .unwrap_or_else(|| home.join(".local/state"))
                .join(APP_DIR),
        }
    }

    /// Default settings file.
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    /// Default log file.
    pub fn log_file(&self) -> PathBuf {
        self.state.join("octochat.log")
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.state] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_under_home() {
        let dirs = XdgDirs::resolve(Path::new("/home/u"), None, None);
        assert_eq!(dirs.config, Path::new("/home/u/.config/octochat"));
        assert_eq!(dirs.state, Path::new("/home/u/.local/state/octochat"));
        assert_eq!(dirs.config_file(), Path::new("/home/u/.config/octochat/config.toml"));
        assert_eq!(dirs.log_file(), Path::new("/home/u/.local/state/octochat/octochat.log"));
    }

    #[test]
    fn test_env_overrides() {
        let dirs = XdgDirs::resolve(
            Path::new("/home/u"),
            Some(PathBuf::from("/xdg/config")),
            Some(PathBuf::from("/xdg/state")),
        );
        assert_eq!(dirs.config, Path::new("/xdg/config/octochat"));
        assert_eq!(dirs.state, Path::new("/xdg/state/octochat"));
    }

    #[test]
    fn test_ensure_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = XdgDirs::resolve(tmp.path(), None, None);
        dirs.ensure_dirs().unwrap();
        assert!(dirs.config.is_dir());
        assert!(dirs.state.is_dir());
    }
}
