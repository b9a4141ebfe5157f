use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::NetworkProfile;
use crate::error::UpstreamStatus;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub fn build_client(profile: NetworkProfile, timeout: Duration) -> reqwest::Result<Client> {
    profile
        .apply(Client::builder().user_agent(USER_AGENT).timeout(timeout))
        .build()
}

/// Reads the response body, turning a non-success status into an error that
/// keeps the body for logging.
pub async fn success_text<E>(response: Response) -> Result<String, E>
where
    E: From<reqwest::Error> + UpstreamStatus,
{
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(E::from_status(status.as_u16(), body))
    }
}

/// Like [`success_text`], then decodes the body as JSON.
pub async fn success_json<T, E>(response: Response) -> Result<T, E>
where
    T: DeserializeOwned,
    E: From<reqwest::Error> + From<serde_json::Error> + UpstreamStatus,
{
    let body: String = success_text::<E>(response).await?;
    Ok(serde_json::from_str(&body)?)
}
