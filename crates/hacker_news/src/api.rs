use crate::models::HNItem;
use common::error::{FetchError, FetchResult};
use common::http::success_json;
use reqwest::Client;

#[derive(Clone)]
pub struct HackerNewsAPI {
    client: Client,
    base_url: String,
}

impl HackerNewsAPI {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_top_stories(&self, limit: usize) -> FetchResult<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let ids = success_json::<Vec<u64>, FetchError>(resp).await?;
        Ok(ids.into_iter().take(limit).collect())
    }

    /// `None` when the item no longer exists (the API answers `null`).
    pub async fn get_story(&self, story_id: u64) -> FetchResult<Option<HNItem>> {
        let url = format!("{}/item/{}.json", self.base_url, story_id);
        let resp = self.client.get(&url).send().await?;
        success_json(resp).await
    }
}
