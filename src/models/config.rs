//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// What to watch and where to keep state
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// HTTP settings for fetching the monitored page
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Push notification endpoint
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Notification texts
    #[serde(default)]
    pub messages: Messages,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Override the monitored URL and topic, ignoring `None`.
    pub fn with_overrides(mut self, url: Option<String>, topic: Option<String>) -> Self {
        if let Some(url) = url {
            self.monitor.url = url;
        }
        if let Some(topic) = topic {
            self.notifier.topic = topic;
        }
        self
    }

    /// Validate configuration values before any I/O happens.
    ///
    /// A missing URL or topic is a configuration error; other bad values are
    /// validation errors.
    pub fn validate(&self) -> Result<()> {
        if self.monitor.url.trim().is_empty() || self.notifier.topic.trim().is_empty() {
            return Err(AppError::config("Missing SHOWTIMES_URL or NTFY_TOPIC"));
        }
        if self.monitor.marker.is_empty() {
            return Err(AppError::validation("monitor.marker is empty"));
        }
        if self.monitor.cooldown_minutes == 0 {
            return Err(AppError::validation("monitor.cooldown_minutes must be > 0"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.notifier.timeout_secs == 0 {
            return Err(AppError::validation("notifier.timeout_secs must be > 0"));
        }
        self.notifier.server_url()?;
        Ok(())
    }
}

/// Monitored page and run state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Page to poll (usually supplied through `SHOWTIMES_URL`)
    #[serde(default)]
    pub url: String,

    /// Literal substring whose presence means showtimes are listed
    #[serde(default = "defaults::marker")]
    pub marker: String,

    /// Minimum minutes between "still unavailable" notifications
    #[serde(default = "defaults::cooldown_minutes")]
    pub cooldown_minutes: u64,

    /// Where the run state is persisted
    #[serde(default = "defaults::state_file")]
    pub state_file: PathBuf,
}

impl MonitorConfig {
    pub fn cooldown(&self) -> TimeDelta {
        i64::try_from(self.cooldown_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            marker: defaults::marker(),
            cooldown_minutes: defaults::cooldown_minutes(),
            state_file: defaults::state_file(),
        }
    }
}

/// HTTP client settings for the page fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "defaults::fetch_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header; the client default is used when unset
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::fetch_timeout(),
            user_agent: None,
        }
    }
}

/// ntfy endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Base URL of the ntfy server
    #[serde(default = "defaults::server")]
    pub server: String,

    /// Topic to publish to (usually supplied through `NTFY_TOPIC`)
    #[serde(default)]
    pub topic: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::notify_timeout")]
    pub timeout_secs: u64,
}

impl NotifierConfig {
    /// Parsed server URL, always ending in `/` so topics join as a child path.
    pub fn server_url(&self) -> Result<Url> {
        let mut server = self.server.trim().to_string();
        if !server.ends_with('/') {
            server.push('/');
        }
        let url = Url::parse(&server)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "notifier.server must be an http(s) URL, got {}",
                self.server
            )));
        }
        Ok(url)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            server: defaults::server(),
            topic: String::new(),
            timeout_secs: defaults::notify_timeout(),
        }
    }
}

/// Notification texts. `{url}` is replaced with the monitored URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::available_title")]
    pub available_title: String,
    #[serde(default = "defaults::available_body")]
    pub available_body: String,
    #[serde(default = "defaults::available_tags")]
    pub available_tags: Vec<String>,
    #[serde(default = "defaults::available_action_label")]
    pub available_action_label: String,
    #[serde(default = "defaults::unavailable_title")]
    pub unavailable_title: String,
    #[serde(default = "defaults::unavailable_body")]
    pub unavailable_body: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            available_title: defaults::available_title(),
            available_body: defaults::available_body(),
            available_tags: defaults::available_tags(),
            available_action_label: defaults::available_action_label(),
            unavailable_title: defaults::unavailable_title(),
            unavailable_body: defaults::unavailable_body(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Monitor defaults
    pub fn marker() -> String {
        r#"id="showtimes""#.into()
    }
    pub fn cooldown_minutes() -> u64 {
        120
    }
    pub fn state_file() -> PathBuf {
        PathBuf::from("state.json")
    }

    // HTTP defaults
    pub fn fetch_timeout() -> u64 {
        30
    }
    pub fn server() -> String {
        "https://ntfy.sh".into()
    }
    pub fn notify_timeout() -> u64 {
        15
    }

    // Message defaults
    pub fn available_title() -> String {
        "Showtimes Available 🎉".into()
    }
    pub fn available_body() -> String {
        "🎬 Showtimes just appeared on {url}".into()
    }
    pub fn available_tags() -> Vec<String> {
        vec!["popcorn".into(), "clapper".into(), "vox-cinemas".into()]
    }
    pub fn available_action_label() -> String {
        "Book now".into()
    }
    pub fn unavailable_title() -> String {
        "No Showtimes yet".into()
    }
    pub fn unavailable_body() -> String {
        "❌ Still no showtimes on {url}".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config::default().with_overrides(
            Some("https://cinema.example/movie/42".to_string()),
            Some("showtimes-alerts".to_string()),
        )
    }

    #[test]
    fn validate_filled_config_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_url_or_topic() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.is_config());

        let mut config = valid_config();
        config.notifier.topic = "   ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = valid_config();
        config.monitor.url.clear();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_cooldown() {
        let mut config = valid_config();
        config.monitor.cooldown_minutes = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn defaults_match_showtimes_page() {
        let config = Config::default();
        assert_eq!(config.monitor.marker, r#"id="showtimes""#);
        assert_eq!(config.monitor.cooldown(), TimeDelta::hours(2));
        assert_eq!(config.notifier.timeout_secs, 15);
        assert_eq!(config.monitor.state_file, PathBuf::from("state.json"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [monitor]
            url = "https://cinema.example"
            cooldown_minutes = 30

            [notifier]
            topic = "alerts"
            "#,
        )
        .unwrap();

        assert_eq!(config.monitor.cooldown(), TimeDelta::minutes(30));
        assert_eq!(config.notifier.server, "https://ntfy.sh");
        assert_eq!(config.messages.available_action_label, "Book now");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = valid_config().with_overrides(None, Some("other".to_string()));
        assert_eq!(config.monitor.url, "https://cinema.example/movie/42");
        assert_eq!(config.notifier.topic, "other");
    }

    #[test]
    fn server_url_gets_trailing_slash() {
        let mut notifier = NotifierConfig::default();
        notifier.server = "https://push.example/ntfy".to_string();
        let url = notifier.server_url().unwrap();
        assert_eq!(url.as_str(), "https://push.example/ntfy/");
        assert_eq!(
            url.join("alerts").unwrap().as_str(),
            "https://push.example/ntfy/alerts"
        );
    }

    #[test]
    fn server_url_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.notifier.server = "mailto:alerts@example.com".to_string();
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("nope.toml"));
        assert_eq!(config.monitor.cooldown_minutes, 120);
    }

    #[test]
    fn load_or_default_tolerates_garbage() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("showwatch.toml");
        std::fs::write(&path, "[monitor\nurl = ").unwrap();
        let config = Config::load_or_default(&path);
        assert!(config.monitor.url.is_empty());
    }
}
