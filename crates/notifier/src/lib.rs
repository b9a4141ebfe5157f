pub mod digest;

use common::error::{ConfigError, NotifyError};
use common::http::{build_client, success_text};
use common::{Config, Digest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub use digest::format_digest;

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    template: &'a str,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    SkippedNoToken,
}

/// Pushes digests to a PushPlus channel as Markdown messages.
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    api_url: String,
    token: String,
}

impl Notifier {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client(config.network, config.timeouts.notify)?,
            api_url: config.endpoints.pushplus.clone(),
            token: config.push_token.clone(),
        })
    }

    /// Delivers the digest and logs the outcome. Failures stay here.
    pub async fn send_digest(&self, digest: &Digest) {
        match self.deliver(digest).await {
            Ok(Delivery::Sent) => info!("[{}] pushed successfully", digest.title),
            Ok(Delivery::SkippedNoToken) => warn!("No push token configured; skipping push"),
            Err(NotifyError::Rejected { code, body }) => {
                error!(code, "Push rejected: {}", body)
            }
            Err(e) => error!(error = %e, "Push failed"),
        }
    }

    pub async fn deliver(&self, digest: &Digest) -> Result<Delivery, NotifyError> {
        if self.token.is_empty() {
            return Ok(Delivery::SkippedNoToken);
        }

        info!(
            "Pushing digest to {} ({} bytes)",
            self.api_url,
            digest.body.len()
        );

        let request = PushRequest {
            token: &self.token,
            title: &digest.title,
            content: &digest.body,
            template: "markdown",
        };
        let response = self.client.post(&self.api_url).json(&request).send().await?;
        let body: String = success_text::<NotifyError>(response).await?;
        let result: PushResponse = serde_json::from_str(&body)?;

        if result.code == 200 {
            Ok(Delivery::Sent)
        } else {
            Err(NotifyError::Rejected {
                code: result.code,
                body,
            })
        }
    }
}
