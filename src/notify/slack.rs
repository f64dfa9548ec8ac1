//! Slack notifier: posts to `chat.postMessage` with a bot token.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::Notifier;
use crate::config::SlackConfig;
use crate::error::NotifyError;

/// Slack Web API response envelope. Slack reports most failures as
/// HTTP 200 with `ok: false`.
#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts messages to one Slack channel.
pub struct SlackNotifier {
    config: SlackConfig,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Read the bot token from the environment.
    fn token(&self) -> Result<SecretString, NotifyError> {
        std::env::var(&self.config.token_var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| NotifyError::MissingToken {
                var: self.config.token_var.clone(),
            })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &str {
        "slack"
    }

    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let token = self.token()?;
        let body = serde_json::json!({
            "channel": self.config.channel,
            "text": text,
        });

        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let reason = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                service: "slack".into(),
                reason: format!("HTTP {status}: {reason}"),
            });
        }

        let parsed: SlackResponse = resp.json().await?;
        if !parsed.ok {
            return Err(NotifyError::Rejected {
                service: "slack".into(),
                reason: parsed.error.unwrap_or_else(|| "unknown error".into()),
            });
        }

        debug!(channel = %self.config.channel, "Slack message posted");
        Ok(())
    }
}
