use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub poll_interval_ms: u64,
    pub startup_delay_ms: u64,
    pub kill_refresh_delay_ms: u64,
    pub history_length: usize,
    pub max_table_rows: usize,
    pub kill_signal: String,
    /// JSON snapshot file published by a host; unset means sample locally.
    pub source: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            poll_interval_ms: 2000,
            startup_delay_ms: 500,
            kill_refresh_delay_ms: 1000,
            history_length: 25,
            max_table_rows: 50,
            kill_signal: "kill".to_string(),
            source: None,
        }
    }
}

impl GeneralConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            startup_delay: Duration::from_millis(self.startup_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            kill_refresh_delay: Duration::from_millis(self.kill_refresh_delay_ms),
        }
    }
}

/// The three fixed delays that drive refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub startup_delay: Duration,
    pub poll_interval: Duration,
    pub kill_refresh_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        GeneralConfig::default().timing()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub kill: String,
    pub pid_input: String,
    pub refresh: String,
    pub cycle_theme: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            kill: "k".to_string(),
            pid_input: "p".to_string(),
            refresh: "r".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Parses a keybind string such as `"q"`, `"Enter"` or `"F5"`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysdash").join("config.toml"))
}

/// Loads the config from the default location. A missing file yields the
/// defaults; an unreadable or invalid one yields the defaults plus the error
/// so the caller can report it once logging is up.
pub fn load_config() -> (Config, Option<ConfigError>) {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => (Config::default(), None),
    }
}

pub fn load_config_from_path(path: &Path) -> (Config, Option<ConfigError>) {
    match try_load_config_from_path(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

pub fn try_load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.poll_interval_ms, 2000);
        assert_eq!(config.general.startup_delay_ms, 500);
        assert_eq!(config.general.kill_refresh_delay_ms, 1000);
        assert_eq!(config.general.history_length, 25);
        assert_eq!(config.general.max_table_rows, 50);
        assert_eq!(config.general.kill_signal, "kill");
        assert!(config.general.source.is_none());
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
poll_interval_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.poll_interval_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.history_length, 25);
        assert_eq!(config.colors.theme, "dark");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
poll_interval_ms = 1000
startup_delay_ms = 0
kill_refresh_delay_ms = 250
history_length = 60
max_table_rows = 20
kill_signal = "term"
source = "/run/host/metrics.json"

[colors]
theme = "light"

[keybinds]
quit = "x"
pid_input = "F2"

[logging]
level = "debug"
file = "/tmp/sysdash.log"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.poll_interval_ms, 1000);
        assert_eq!(config.general.startup_delay_ms, 0);
        assert_eq!(config.general.history_length, 60);
        assert_eq!(config.general.max_table_rows, 20);
        assert_eq!(config.general.kill_signal, "term");
        assert_eq!(
            config.general.source.as_deref(),
            Some(Path::new("/run/host/metrics.json"))
        );
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(parse_key(&config.keybinds.pid_input), Some(KeyCode::F(2)));
        assert_eq!(config.logging.level, "debug");

        let timing = config.general.timing();
        assert_eq!(timing.poll_interval, Duration::from_millis(1000));
        assert_eq!(timing.startup_delay, Duration::ZERO);
        assert_eq!(timing.kill_refresh_delay, Duration::from_millis(250));
    }

    #[test]
    fn parse_key_variants() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("K"), Some(KeyCode::Char('K')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let general = GeneralConfig {
            poll_interval_ms: 0,
            ..GeneralConfig::default()
        };
        assert_eq!(general.timing().poll_interval, Duration::from_millis(1));
    }

    #[test]
    fn missing_file_returns_default() {
        let (config, err) = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.poll_interval_ms, 2000);
        assert!(matches!(err, Some(ConfigError::Read { .. })));
    }

    #[test]
    fn invalid_toml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{{").unwrap();
        let (config, err) = load_config_from_path(&path);
        assert_eq!(config.general.poll_interval_ms, 2000);
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }
}
