//! TOML-based configuration for the focus toggle.
//!
//! The file declares which pages the toggle may act on, which style sheet it
//! injects, and the shortcut the host should register:
//!
//! ```toml
//! log_level = "info"
//!
//! [focus]
//! allowed_prefixes = [
//!   "https://developer.chrome.com/docs/extensions",
//!   "https://developer.chrome.com/docs/webstore",
//! ]
//! style_resource = "focus-mode.css"
//!
//! [shortcut]
//! command = "_execute_action"
//! default_key = "Ctrl+B"
//! mac_key = "Command+B"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so a missing or
//! partial file still yields a working configuration.
//!
//! # Validation
//!
//! Parsing only checks shape.  [`AppConfig::validate`] turns the raw strings
//! into the immutable domain inputs the use case needs
//! ([`AllowedPrefixSet`] and [`StyleResource`]) and rejects values that would
//! make the toggle useless or dangerous (an empty prefix matches every page).

use std::path::{Path, PathBuf};

use focus_core::{AllowedPrefixSet, PrefixError, StyleResource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The allowed prefixes are unusable.
    #[error("invalid focus.allowed_prefixes: {0}")]
    Prefixes(#[from] PrefixError),

    /// No style resource was configured.
    #[error("focus.style_resource must not be empty")]
    EmptyStyleResource,
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub shortcut: ShortcutConfig,
}

/// What the toggle acts on and what it injects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusConfig {
    /// URL prefixes of the pages the toggle may style.
    #[serde(default = "default_allowed_prefixes")]
    pub allowed_prefixes: Vec<String>,
    /// Style sheet reference handed to the host's style applicator.
    #[serde(default = "default_style_resource")]
    pub style_resource: String,
}

/// Keyboard shortcut the host registers for the toggle.
///
/// The toggle itself never listens for keys; the host maps the key
/// combination to the same trigger event as an icon click.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortcutConfig {
    /// Host command name.  `_execute_action` makes the shortcut behave
    /// exactly like clicking the toolbar icon.
    #[serde(default = "default_command")]
    pub command: String,
    /// Suggested key combination on Windows, Linux, and ChromeOS.
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Suggested key combination on macOS.
    #[serde(default = "default_mac_key")]
    pub mac_key: String,
}

/// The validated, immutable inputs of the toggle use case.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSettings {
    pub prefixes: AllowedPrefixSet,
    pub style: StyleResource,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_allowed_prefixes() -> Vec<String> {
    vec![
        "https://developer.chrome.com/docs/extensions".to_string(),
        "https://developer.chrome.com/docs/webstore".to_string(),
    ]
}
fn default_style_resource() -> String {
    "focus-mode.css".to_string()
}
fn default_command() -> String {
    "_execute_action".to_string()
}
fn default_key() -> String {
    "Ctrl+B".to_string()
}
fn default_mac_key() -> String {
    "Command+B".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            focus: FocusConfig::default(),
            shortcut: ShortcutConfig::default(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: default_allowed_prefixes(),
            style_resource: default_style_resource(),
        }
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            default_key: default_key(),
            mac_key: default_mac_key(),
        }
    }
}

impl AppConfig {
    /// Builds the use case inputs from the raw configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Prefixes`] when the prefix list is empty or
    /// contains an empty string, and [`ConfigError::EmptyStyleResource`] when
    /// no style sheet is configured.
    pub fn validate(&self) -> Result<FocusSettings, ConfigError> {
        let prefixes = AllowedPrefixSet::new(self.focus.allowed_prefixes.iter().cloned())?;
        let style_resource = self.focus.style_resource.trim();
        if style_resource.is_empty() {
            return Err(ConfigError::EmptyStyleResource);
        }
        Ok(FocusSettings {
            prefixes,
            style: StyleResource::new(style_resource),
        })
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_allows_chrome_docs() {
        // Arrange / Act
        let settings = AppConfig::default().validate().unwrap();

        // Assert
        assert!(settings
            .prefixes
            .matches("https://developer.chrome.com/docs/extensions/mv3/"));
        assert!(settings
            .prefixes
            .matches("https://developer.chrome.com/docs/webstore/"));
        assert!(!settings.prefixes.matches("https://example.com/"));
    }

    #[test]
    fn test_default_style_resource() {
        let settings = AppConfig::default().validate().unwrap();
        assert_eq!(settings.style.as_str(), "focus-mode.css");
    }

    #[test]
    fn test_default_shortcut() {
        let cfg = ShortcutConfig::default();
        assert_eq!(cfg.command, "_execute_action");
        assert_eq!(cfg.default_key, "Ctrl+B");
        assert_eq!(cfg.mac_key, "Command+B");
    }

    #[test]
    fn test_default_log_level_is_info() {
        assert_eq!(AppConfig::default().log_level, "info");
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_focus_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[focus]
style_resource = "reader.css"
"#;

        // Act
        let cfg = parse_config(toml_str).unwrap();

        // Assert
        assert_eq!(cfg.focus.style_resource, "reader.css");
        assert_eq!(cfg.focus.allowed_prefixes, default_allowed_prefixes());
        assert_eq!(cfg.shortcut, ShortcutConfig::default());
    }

    #[test]
    fn test_custom_prefixes_replace_defaults() {
        let toml_str = r#"
log_level = "debug"

[focus]
allowed_prefixes = ["https://docs.rs/"]
"#;
        let cfg = parse_config(toml_str).unwrap();
        let settings = cfg.validate().unwrap();

        assert_eq!(cfg.log_level, "debug");
        assert!(settings.prefixes.matches("https://docs.rs/tokio"));
        assert!(!settings
            .prefixes
            .matches("https://developer.chrome.com/docs/extensions/"));
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let result = parse_config("[[[ not valid toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.shortcut.default_key = "Alt+F".to_string();

        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&toml_str).unwrap();

        assert_eq!(cfg, restored);
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_rejects_empty_prefix_list() {
        let mut cfg = AppConfig::default();
        cfg.focus.allowed_prefixes.clear();

        let result = cfg.validate();

        assert!(matches!(result, Err(ConfigError::Prefixes(PrefixError::Empty))));
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut cfg = AppConfig::default();
        cfg.focus.allowed_prefixes.push(String::new());

        let result = cfg.validate();

        assert!(matches!(
            result,
            Err(ConfigError::Prefixes(PrefixError::EmptyPrefix(2)))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_style_resource() {
        let mut cfg = AppConfig::default();
        cfg.focus.style_resource = "   ".to_string();

        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyStyleResource)));
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/focus-toggle.toml");

        let cfg = load_config(&path).unwrap();

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_reads_file_from_temp_dir() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("focus_toggle_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("focus-toggle.toml");
        std::fs::write(&path, "[focus]\nstyle_resource = \"calm.css\"\n").unwrap();

        // Act
        let cfg = load_config(&path).unwrap();

        // Assert
        assert_eq!(cfg.focus.style_resource, "calm.css");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_on_directory_is_io_error() {
        let dir = std::env::temp_dir();

        let result = load_config(&dir);

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
