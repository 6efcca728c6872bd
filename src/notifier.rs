use chrono::Utc;
use tracing::{debug, error};

use crate::error::DeliveryError;
use crate::message::{render, RobotMessage};
use crate::signing::sign;
use crate::types::{Event, RobotConfig};

/// Fixed DingTalk robot endpoint.
pub const DEFAULT_WEBHOOK_URL: &str = "https://oapi.dingtalk.com/robot/send";

/// Best-effort dispatcher for one robot webhook.
///
/// Holds no mutable state beyond its immutable configuration, so a
/// single instance can serve concurrent `send` calls without locking.
pub struct Notifier {
    config: RobotConfig,
    endpoint: String,
    http: reqwest::Client,
}

impl Notifier {
    /// Create a notifier posting to the fixed DingTalk endpoint.
    ///
    /// Uses a default HTTP client: no custom timeout, no retry.
    pub fn new(config: RobotConfig) -> Self {
        Self {
            config,
            endpoint: DEFAULT_WEBHOOK_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Override the webhook endpoint URL.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Deliver a notification for `event`.
    ///
    /// Infallible from the caller's viewpoint: events that map to no
    /// message return without a network call, and delivery failures are
    /// logged and swallowed. The upstream pipeline is never blocked or
    /// failed by a notification attempt.
    pub async fn send(&self, event: &Event) {
        let Some(message) = render(
            event,
            &self.config.mention_directive,
            self.config.display_offset,
        ) else {
            return;
        };

        if let Err(e) = self.deliver(&message).await {
            error!(error = %e, "webhook delivery failed");
        }
    }

    async fn deliver(&self, message: &RobotMessage) -> Result<(), DeliveryError> {
        let mut params = vec![("access_token", self.config.access_token.clone())];
        if let Some(secret) = self.config.secret.as_deref().filter(|s| !s.is_empty()) {
            let timestamp = Utc::now().timestamp_millis();
            params.push(("timestamp", timestamp.to_string()));
            params.push(("sign", sign(secret, timestamp)));
        }

        let body = serde_json::to_string(message)?;

        let response = self
            .http
            .post(&self.endpoint)
            .query(&params)
            .header("Content-Type", "application/json;charset=utf-8")
            .body(body)
            .send()
            .await?;

        // The robot API reports errors in the body of a 200 response;
        // the status line is not checked. See the crate docs.
        let reply = response.text().await?;
        debug!(reply = %reply, "webhook response");
        Ok(())
    }
}
