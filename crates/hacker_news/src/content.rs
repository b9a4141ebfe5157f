use common::error::{ConfigError, FetchError};
use common::http::{build_client, success_text};
use common::Config;
use reqwest::Client;
use tracing::{info, warn};

/// Retrieves a readable-text rendition of an article through a reader proxy
/// that takes the target URL appended to its prefix.
#[derive(Clone)]
pub struct ContentFetcher {
    client: Client,
    prefix: String,
}

impl ContentFetcher {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = build_client(config.network, config.timeouts.content)?;
        Ok(Self {
            client,
            prefix: config.endpoints.reader_prefix.clone(),
        })
    }

    /// Returns the extracted text, or an empty string when `url` is empty or
    /// the proxy could not deliver it.
    ///
    /// Callers cannot tell a failed fetch from a genuinely short page; both
    /// come back short.
    pub async fn fetch_content(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }
        info!("Reading article: {}", url);
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url, error = %e, "Failed to read article");
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let reader_url = format!("{}{}", self.prefix, url);
        let resp = self.client.get(&reader_url).send().await?;
        success_text(resp).await
    }
}
