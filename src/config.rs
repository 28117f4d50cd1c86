//! Configuration file support for jot
//!
//! Config files are loaded in order (later overrides earlier):
//! 1. `~/.config/jot/config.toml` (user defaults)
//! 2. `.jot.toml` in the current directory (project overrides)
//!
//! CLI flags override all config file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project-level config file name
pub const PROJECT_CONFIG: &str = ".jot.toml";

/// Configuration options loaded from config files
///
/// # Example
///
/// ```toml
/// # ~/.config/jot/config.toml or .jot.toml
/// file = "/home/user/notes.json"  # Where notes are stored
/// color = true                    # Colored terminal output
/// quiet = false                   # Suppress confirmations
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Notes file (overridden by --file / JOT_FILE)
    pub file: Option<PathBuf>,
    /// Colored output
    pub color: Option<bool>,
    /// Enable quiet mode by default
    pub quiet: Option<bool>,
}

impl Config {
    /// Load configuration from user and project config files
    pub fn load(project_dir: &Path) -> Self {
        let user_config = dirs::config_dir()
            .map(|d| d.join("jot/config.toml"))
            .and_then(|p| Self::load_file(&p))
            .unwrap_or_default();

        let project_config =
            Self::load_file(&project_dir.join(PROJECT_CONFIG)).unwrap_or_default();

        // Project overrides user
        let merged = user_config.override_with(project_config);
        tracing::debug!(
            file = ?merged.file,
            color = ?merged.color,
            quiet = ?merged.quiet,
            "Effective config after merge"
        );
        merged
    }

    /// Load configuration from a specific file
    fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str::<Self>(&content) {
            Ok(mut config) => {
                // Relative paths in a config file are relative to that file
                if let (Some(file), Some(dir)) = (config.file.as_mut(), path.parent()) {
                    if file.is_relative() {
                        *file = dir.join(&*file);
                    }
                }
                tracing::debug!(path = %path.display(), file = ?config.file, "Loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Layer another config on top (other overrides self where present)
    fn override_with(self, other: Self) -> Self {
        Config {
            file: other.file.or(self.file),
            color: other.color.or(self.color),
            quiet: other.quiet.or(self.quiet),
        }
    }

    // ===== Accessors with defaults =====

    /// Notes file used when nothing else is configured
    pub const DEFAULT_FILE: &'static str = "notes.json";

    /// Notes file with default fallback (relative to the current directory)
    pub fn file_or_default(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Colored output with default fallback (true)
    pub fn color_or_default(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Quiet mode with default fallback (false)
    pub fn quiet_or_default(&self) -> bool {
        self.quiet.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&config_path, "file = \"/tmp/n.json\"\nquiet = true\n").unwrap();

        let config = Config::load_file(&config_path).unwrap();
        assert_eq!(config.file, Some(PathBuf::from("/tmp/n.json")));
        assert_eq!(config.quiet, Some(true));
        assert!(config.color.is_none());
    }

    #[test]
    fn test_relative_file_resolved_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&config_path, "file = \"data/notes.json\"\n").unwrap();

        let config = Config::load_file(&config_path).unwrap();
        assert_eq!(config.file, Some(dir.path().join("data/notes.json")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_file(&dir.path().join("nonexistent.toml"));
        assert!(config.is_none());
    }

    #[test]
    fn test_load_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&config_path, "not valid [[[").unwrap();
        assert!(Config::load_file(&config_path).is_none());
    }

    #[test]
    fn test_load_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&config_path, "limit = 5\n").unwrap();
        assert!(Config::load_file(&config_path).is_none());
    }

    #[test]
    fn test_merge_override() {
        let base = Config {
            file: Some("/user/notes.json".into()),
            quiet: Some(true),
            ..Default::default()
        };
        let override_cfg = Config {
            file: Some("/project/notes.json".into()),
            color: Some(false),
            ..Default::default()
        };

        let merged = base.override_with(override_cfg);
        assert_eq!(merged.file, Some(PathBuf::from("/project/notes.json")));
        assert_eq!(merged.quiet, Some(true));
        assert_eq!(merged.color, Some(false));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.file_or_default(), PathBuf::from("notes.json"));
        assert!(config.color_or_default());
        assert!(!config.quiet_or_default());
    }
}
