//! Configuration file support
//!
//! Loads settings from ~/.notes-render.conf (or %USERPROFILE%\.notes-render.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # notes-render configuration
//! color = true
//! max-input-bytes = 1048576
//! tab-width = 4
//! languages-file = /home/me/.notes-languages.toml
//! session-ttl-minutes = 60
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Default upper bound on note size accepted by the renderer
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Emit ANSI colors in terminal output
    pub color: bool,
    /// Notes larger than this are rejected before rendering
    pub max_input_bytes: usize,
    /// Tab width used when expanding tabs for terminal output
    pub tab_width: usize,
    /// Optional TOML file with extra language rule sets
    pub languages_file: Option<PathBuf>,
    /// Lifetime of an admin session in minutes
    pub session_ttl_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            tab_width: 4,
            languages_file: None,
            session_ttl_minutes: 60,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".notes-render.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".notes-render.conf"))
        }
    }

    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    log::debug!("Loading config from {}", path.display());
                    config.apply(&Self::parse(&contents));
                }
                Err(_) => log::debug!("No config at {}, using defaults", path.display()),
            }
        }

        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("color") {
            self.color = parse_bool(value);
        }

        if let Some(value) = settings.get("max-input-bytes") {
            match value.parse::<usize>() {
                Ok(n) => self.max_input_bytes = n.max(1024),
                Err(_) => log::warn!("Ignoring invalid max-input-bytes: {}", value),
            }
        }

        if let Some(value) = settings.get("tab-width") {
            match value.parse::<usize>() {
                Ok(n) => self.tab_width = n.clamp(1, 16),
                Err(_) => log::warn!("Ignoring invalid tab-width: {}", value),
            }
        }

        if let Some(value) = settings.get("languages-file") {
            if !value.is_empty() {
                self.languages_file = Some(PathBuf::from(value));
            }
        }

        if let Some(value) = settings.get("session-ttl-minutes") {
            match value.parse::<i64>() {
                Ok(n) => self.session_ttl_minutes = n.max(1),
                Err(_) => log::warn!("Ignoring invalid session-ttl-minutes: {}", value),
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
color = false
max-input-bytes = 4096
tab-width = 2
languages-file = /tmp/langs.toml
        "#;

        let settings = Config::parse(contents);
        assert_eq!(settings.get("color"), Some(&"false".to_string()));
        assert_eq!(settings.get("max-input-bytes"), Some(&"4096".to_string()));
        assert_eq!(settings.get("tab-width"), Some(&"2".to_string()));
        assert_eq!(settings.get("languages-file"), Some(&"/tmp/langs.toml".to_string()));
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("color".to_string(), "off".to_string());
        settings.insert("max-input-bytes".to_string(), "2048".to_string());
        settings.insert("tab-width".to_string(), "8".to_string());
        settings.insert("languages-file".to_string(), "langs.toml".to_string());
        settings.insert("session-ttl-minutes".to_string(), "15".to_string());

        config.apply(&settings);

        assert!(!config.color);
        assert_eq!(config.max_input_bytes, 2048);
        assert_eq!(config.tab_width, 8);
        assert_eq!(config.languages_file, Some(PathBuf::from("langs.toml")));
        assert_eq!(config.session_ttl_minutes, 15);
    }

    #[test]
    fn test_apply_clamps_and_ignores_garbage() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("max-input-bytes".to_string(), "10".to_string());
        settings.insert("tab-width".to_string(), "99".to_string());
        settings.insert("session-ttl-minutes".to_string(), "soon".to_string());

        config.apply(&settings);

        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.tab_width, 16);
        assert_eq!(config.session_ttl_minutes, 60);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("anything"));
    }
}
