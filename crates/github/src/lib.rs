pub mod models;

use async_trait::async_trait;
use common::error::{ConfigError, FetchError, FetchResult};
use common::http::{build_client, success_json};
use common::{Config, RankingSource, Repository};
use models::{TrendRow, TrendsResponse};
use tracing::{error, info, warn};

const NO_DESCRIPTION: &str = "暂无描述";
const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Reads the trending-repositories ranking from the OSS Insight trends API.
pub struct TrendingFetcher {
    http_client: reqwest::Client,
    api_url: String,
}

impl TrendingFetcher {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http_client = build_client(config.network, config.timeouts.trends)?;
        Ok(Self {
            http_client,
            api_url: config.endpoints.trends.clone(),
        })
    }

    pub async fn get_trending_repos(&self, n: usize) -> Vec<Repository> {
        info!("Querying the top {} GitHub trending repositories", n);
        match self.fetch_rows(n).await.and_then(|rows| to_repositories(rows, n)) {
            Ok(repositories) => {
                info!("Found {} trending repositories", repositories.len());
                repositories
            }
            Err(e) => {
                error!(
                    error = %e,
                    unavailable = e.is_unavailable(),
                    "Failed to fetch GitHub trending"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_rows(&self, n: usize) -> FetchResult<Vec<TrendRow>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("limit", n)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let trends: TrendsResponse = success_json::<TrendsResponse, FetchError>(response).await?;
        Ok(trends.data.rows)
    }
}

fn to_repositories(rows: Vec<TrendRow>, n: usize) -> FetchResult<Vec<Repository>> {
    let mut repositories = Vec::with_capacity(n.min(rows.len()));
    for row in rows.into_iter().take(n) {
        let stars = row.star_count().ok_or_else(|| {
            FetchError::Malformed(serde::de::Error::custom(format!(
                "unreadable star count {} for {:?}",
                row.stars, row.repo_name
            )))
        })?;
        let Some(name) = row.repo_name.filter(|name| !name.is_empty()) else {
            warn!("Could not extract repository name from a trends row. Skipping.");
            continue;
        };

        repositories.push(Repository {
            url: format!("https://github.com/{}", name),
            name,
            description: row
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            stars,
            language: row
                .primary_language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        });
    }
    Ok(repositories)
}

#[async_trait]
impl RankingSource for TrendingFetcher {
    type Item = Repository;

    async fn fetch_ranked(&self, limit: usize) -> Vec<Repository> {
        self.get_trending_repos(limit).await
    }

    fn name(&self) -> &'static str {
        "GitHub Trending"
    }
}
