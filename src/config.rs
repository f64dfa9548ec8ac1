//! Configuration types, loaded from the process environment.

use std::time::Duration;

/// HTTP server and storage settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            db_path: "./data/inspiration-board.db".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("BOARD_API_HOST").unwrap_or(defaults.host),
            port: std::env::var("BOARD_API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            db_path: std::env::var("BOARD_API_DB_PATH").unwrap_or(defaults.db_path),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Slack `chat.postMessage` settings for card-created notifications.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub enabled: bool,
    pub api_url: String,
    pub channel: String,
    /// Name of the environment variable holding the bot token.
    /// The token itself is read at send time.
    pub token_var: String,
    pub timeout: Duration,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://slack.com/api/chat.postMessage".to_string(),
            channel: "orange-purple".to_string(),
            token_var: "SLACK_TOKEN".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl SlackConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("SLACK_NOTIFY_ENABLED")
                .map(|v| {
                    !matches!(
                        v.trim().to_ascii_lowercase().as_str(),
                        "0" | "false" | "no" | "off"
                    )
                })
                .unwrap_or(defaults.enabled),
            api_url: std::env::var("SLACK_API_URL").unwrap_or(defaults.api_url),
            channel: std::env::var("SLACK_CHANNEL").unwrap_or(defaults.channel),
            token_var: std::env::var("SLACK_TOKEN_VAR").unwrap_or(defaults.token_var),
            timeout: std::env::var("SLACK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
