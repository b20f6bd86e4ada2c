// src/services/notifier.rs

//! Best-effort push notifications through ntfy.
//!
//! Delivery failures are logged and reported as a [`DeliveryOutcome`], never
//! as an error: a missed notification must not stop the state from being
//! saved.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Notification, NotifierConfig};
use crate::utils::http;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint accepted the message
    Delivered { status: u16 },
    /// No topic configured, nothing was sent
    Skipped,
    /// Transport error or error-class response
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

/// Port for sending a notification to a topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, topic: &str, notification: &Notification) -> DeliveryOutcome;
}

/// Publishes to `<server>/<topic>` on an ntfy server.
pub struct NtfyNotifier {
    client: Client,
    server: Url,
}

impl NtfyNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_notify_client(config)?,
            server: config.server_url()?,
        })
    }

    /// Publish URL for a topic. The topic is always a single path segment
    /// under the server URL.
    pub fn endpoint(&self, topic: &str) -> Result<Url> {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config(format!("ntfy server {} cannot take a path", self.server))
            })?
            .pop_if_empty()
            .push(topic.trim());
        Ok(url)
    }

    /// Build request headers. Values are passed as raw UTF-8 so emoji titles
    /// reach ntfy unchanged.
    fn header_map(notification: &Notification) -> std::result::Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        for (name, value) in notification.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name {}: {}", name, e))?;
            let header_value = HeaderValue::from_bytes(value.as_bytes())
                .map_err(|e| format!("invalid value for header {}: {}", name, e))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn send(&self, topic: &str, notification: &Notification) -> DeliveryOutcome {
        if topic.trim().is_empty() {
            log::info!("NTFY_TOPIC not configured. Skipping notification.");
            return DeliveryOutcome::Skipped;
        }

        let endpoint = match self.endpoint(topic) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Cannot build ntfy URL for topic {:?}: {}", topic, e);
                return DeliveryOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let headers = match Self::header_map(notification) {
            Ok(headers) => headers,
            Err(reason) => {
                log::error!("Error creating notification request: {}", reason);
                return DeliveryOutcome::Failed { reason };
            }
        };

        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .body(notification.message.clone())
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status();
                if status.is_client_error() || status.is_server_error() {
                    log::error!("ntfy returned status {}", status.as_u16());
                    DeliveryOutcome::Failed {
                        reason: format!("ntfy returned status {}", status.as_u16()),
                    }
                } else {
                    log::info!("Sent {} notification to {}", notification.kind, topic);
                    DeliveryOutcome::Delivered {
                        status: status.as_u16(),
                    }
                }
            }
            Err(e) => {
                log::error!("Error sending notification: {}", e);
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
