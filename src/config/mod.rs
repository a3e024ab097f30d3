use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// SQLite file holding the persisted session
    pub db_path: Option<String>,
    /// Keep the session in memory only
    pub ephemeral: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { latency_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long transient messages stay on screen
    pub message_ttl_ms: u64,
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_ttl_ms: 3_000,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
    pub export: ExportConfig,
}

impl Config {
    pub fn api_latency(&self) -> Duration {
        Duration::from_millis(self.api.latency_ms)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.ui.message_ttl_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms.max(10))
    }

    pub fn session_db_path(&self) -> Option<PathBuf> {
        self.session
            .db_path
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("session.sqlite3")))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log
            .file
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("gatehouse.log")))
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export
            .dir
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("exports")))
            .unwrap_or_else(|| PathBuf::from(".gatehouse").join("exports"))
    }
}

/// Load the config file, falling back to defaults when it is missing or invalid
pub fn load(explicit: Option<&Path>) -> Config {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(config_path) else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring invalid config");
        Config::default()
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("GATEHOUSE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("gatehouse").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("gatehouse").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "gatehouse", "gatehouse")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("gatehouse"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("gatehouse"));
    }
    directories::ProjectDirs::from("io", "gatehouse", "gatehouse")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.api_latency(), Duration::from_millis(500));
        assert_eq!(config.message_ttl(), Duration::from_secs(3));
        assert_eq!(config.log.level, "info");
        assert!(!config.session.ephemeral);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse(
            r#"
            [session]
            ephemeral = true

            [api]
            latency_ms = 50

            [log]
            level = "debug"
            file = "/tmp/gatehouse-test.log"
            "#,
        )
        .unwrap();
        assert!(config.session.ephemeral);
        assert_eq!(config.api_latency(), Duration::from_millis(50));
        assert_eq!(config.ui.tick_ms, 200);
        assert_eq!(config.log.level, "debug");
        assert_eq!(
            config.log_path(),
            Some(PathBuf::from("/tmp/gatehouse-test.log"))
        );
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("gatehouse-bad-{}.toml", std::process::id()));
        fs::write(&path, "[api]\nlatency_ms = \"soon\"\n").unwrap();
        let config = load(Some(&path));
        assert_eq!(config.api.latency_ms, 500);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load(Some(Path::new("/definitely/not/here/gatehouse.toml")));
        assert_eq!(config.ui.message_ttl_ms, 3_000);
    }

    #[test]
    fn test_tick_rate_has_floor() {
        let config = parse("[ui]\ntick_ms = 0").unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(10));
    }
}
