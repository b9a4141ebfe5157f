pub mod api;
pub mod content;
pub mod models;

use api::HackerNewsAPI;
use async_trait::async_trait;
use common::error::{ConfigError, FetchResult};
use common::http::build_client;
use common::{Config, RankingSource, Story};
use tracing::{error, info};

pub use content::ContentFetcher;

pub struct StoryFetcher {
    api: HackerNewsAPI,
}

impl StoryFetcher {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = build_client(config.network, config.timeouts.ranking)?;
        Ok(Self {
            api: HackerNewsAPI::new(client, &config.endpoints.hacker_news),
        })
    }

    /// Up to `n` top stories that link somewhere, in ranking order.
    ///
    /// Link-less posts among the first `n` ids are skipped without being
    /// replaced, so fewer than `n` may come back. Any failure, including one on
    /// a single item, discards the whole batch.
    pub async fn get_top_stories(&self, n: usize) -> Vec<Story> {
        info!("Querying the top {} Hacker News stories", n);
        match self.collect_stories(n).await {
            Ok(stories) => stories,
            Err(e) => {
                error!(
                    error = %e,
                    unavailable = e.is_unavailable(),
                    "Failed to fetch Hacker News stories"
                );
                Vec::new()
            }
        }
    }

    async fn collect_stories(&self, n: usize) -> FetchResult<Vec<Story>> {
        let story_ids = self.api.get_top_stories(n).await?;
        info!("Fetched {} top story IDs", story_ids.len());

        let mut stories = Vec::with_capacity(story_ids.len());
        for story_id in story_ids {
            let Some(item) = self.api.get_story(story_id).await? else {
                info!("Skipping deleted item {}", story_id);
                continue;
            };
            let title = item.title.clone();
            match item.into_story() {
                Some(story) => stories.push(story),
                None => info!("Skipping story without link: {}", title),
            }
        }
        Ok(stories)
    }
}

#[async_trait]
impl RankingSource for StoryFetcher {
    type Item = Story;

    async fn fetch_ranked(&self, limit: usize) -> Vec<Story> {
        self.get_top_stories(limit).await
    }

    fn name(&self) -> &'static str {
        "Hacker News"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer) -> StoryFetcher {
        let mut config = Config::new("key", "token");
        config.endpoints.hacker_news = server.uri();
        StoryFetcher::new(&config).unwrap()
    }

    async fn mount_item(server: &MockServer, id: u64, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/item/{}.json", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn keeps_ranking_order_and_skips_linkless_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([11, 22, 33, 44])))
            .mount(&server)
            .await;
        mount_item(&server, 11, json!({"id": 11, "title": "First", "url": "https://one.example", "score": 300})).await;
        mount_item(&server, 22, json!({"id": 22, "title": "Ask HN: anything?", "score": 80})).await;
        mount_item(&server, 33, json!({"id": 33, "title": "Third", "url": "https://three.example", "score": 50})).await;
        Mock::given(method("GET"))
            .and(path("/item/44.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 44})))
            .expect(0)
            .mount(&server)
            .await;

        let stories = fetcher_for(&server).get_top_stories(3).await;

        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].title, "First");
        assert_eq!(stories[0].score, 300);
        assert_eq!(stories[1].title, "Third");
        assert!(stories.iter().all(|s| !s.url.is_empty()));
    }

    #[tokio::test]
    async fn zero_limit_fetches_no_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
            .mount(&server)
            .await;

        assert!(fetcher_for(&server).get_top_stories(0).await.is_empty());
    }

    #[tokio::test]
    async fn one_failed_item_discards_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
            .mount(&server)
            .await;
        mount_item(&server, 1, json!({"id": 1, "title": "Fine", "url": "https://fine.example"})).await;
        Mock::given(method("GET"))
            .and(path("/item/2.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(fetcher_for(&server).get_top_stories(2).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_ranking_yields_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server);
        assert!(fetcher.fetch_ranked(5).await.is_empty());
        assert_eq!(fetcher.name(), "Hacker News");
    }

    #[tokio::test]
    async fn deleted_items_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([7, 8])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/item/7.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;
        mount_item(&server, 8, json!({"id": 8, "title": "Alive", "url": "https://alive.example"})).await;

        let stories = fetcher_for(&server).get_top_stories(2).await;
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "Alive");
    }
}
