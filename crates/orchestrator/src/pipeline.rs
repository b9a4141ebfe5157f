use std::fmt;

use anyhow::{Context, Result};
use common::config::DigestConfig;
use common::{Config, Digest, RankingSource, Repository, Story, SummarizedStory};
use github::TrendingFetcher;
use hacker_news::{ContentFetcher, StoryFetcher};
use notifier::{format_digest, Notifier};
use summarizer::Summarizer;
use time::{OffsetDateTime, UtcOffset};
use tracing::{info, warn};

/// Shown in place of a summary when the article text could not be used.
pub const CONTENT_FALLBACK: &str = "无法抓取正文，请直接点击链接查看。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ConfigLoaded,
    RankingsFetched,
    ProcessingStory { index: usize, total: usize },
    DigestAssembled,
    Notified,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::ConfigLoaded => write!(f, "config loaded"),
            Stage::RankingsFetched => write!(f, "rankings fetched"),
            Stage::ProcessingStory { index, total } => {
                write!(f, "processing story {}/{}", index, total)
            }
            Stage::DigestAssembled => write!(f, "digest assembled"),
            Stage::Notified => write!(f, "notified"),
            Stage::Done => write!(f, "done"),
        }
    }
}

fn enter(stage: Stage) {
    info!(stage = %stage, "Pipeline stage");
}

#[derive(Debug)]
pub struct RunReport {
    pub stories: Vec<SummarizedStory>,
    pub repositories: Vec<Repository>,
    /// `None` when there was nothing to report.
    pub digest: Option<Digest>,
    pub notified: bool,
}

/// Loads configuration from the environment and runs one digest.
pub async fn run_once() -> Result<RunReport> {
    enter(Stage::Init);
    let config = Config::from_env().context("configuration error")?;
    run_pipeline(&config).await
}

pub async fn run_pipeline(config: &Config) -> Result<RunReport> {
    run_pipeline_at(config, OffsetDateTime::now_utc()).await
}

/// Runs the pipeline with `captured_at` as the digest timestamp.
///
/// Only client construction can fail; every upstream problem is absorbed by
/// the component that hit it.
pub async fn run_pipeline_at(config: &Config, captured_at: OffsetDateTime) -> Result<RunReport> {
    enter(Stage::ConfigLoaded);

    let RunClients {
        story_fetcher,
        trending_fetcher,
        content_fetcher,
        summarizer,
        notifier,
    } = RunClients::build(config)?;

    let stories = collect_ranking(&story_fetcher, config.digest.story_count).await;
    let repositories = collect_ranking(&trending_fetcher, config.digest.repo_count).await;
    enter(Stage::RankingsFetched);

    let summarized = process_stories(&stories, &content_fetcher, &summarizer, &config.digest).await;
    // Releases the summarizer's connection pool; early returns above drop it too.
    drop(summarizer);

    if summarized.is_empty() && repositories.is_empty() {
        warn!("No usable stories or repositories today; nothing to push");
        enter(Stage::Done);
        return Ok(RunReport {
            stories: summarized,
            repositories,
            digest: None,
            notified: false,
        });
    }

    let offset = UtcOffset::from_hms(config.digest.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC);
    let digest = format_digest(&summarized, &repositories, captured_at.to_offset(offset));
    enter(Stage::DigestAssembled);

    notifier.send_digest(&digest).await;
    enter(Stage::Notified);
    enter(Stage::Done);

    Ok(RunReport {
        stories: summarized,
        repositories,
        digest: Some(digest),
        notified: true,
    })
}

/// Every client a run needs, built up front so a setup failure happens before
/// any request goes out.
struct RunClients {
    story_fetcher: StoryFetcher,
    trending_fetcher: TrendingFetcher,
    content_fetcher: ContentFetcher,
    summarizer: Summarizer,
    notifier: Notifier,
}

impl RunClients {
    fn build(config: &Config) -> Result<Self> {
        Ok(Self {
            story_fetcher: StoryFetcher::new(config)
                .context("failed to set up Hacker News client")?,
            trending_fetcher: TrendingFetcher::new(config)
                .context("failed to set up GitHub trending client")?,
            content_fetcher: ContentFetcher::new(config)
                .context("failed to set up reader client")?,
            summarizer: Summarizer::new(config).context("failed to set up summarizer")?,
            notifier: Notifier::new(config).context("failed to set up push client")?,
        })
    }
}

async fn collect_ranking<S: RankingSource>(source: &S, limit: usize) -> Vec<S::Item> {
    let items = source.fetch_ranked(limit).await;
    info!(source = source.name(), count = items.len(), "Ranking fetched");
    items
}

async fn process_stories(
    stories: &[Story],
    content_fetcher: &ContentFetcher,
    summarizer: &Summarizer,
    settings: &DigestConfig,
) -> Vec<SummarizedStory> {
    let total = stories.len();
    let mut summarized = Vec::with_capacity(total);

    for (i, story) in stories.iter().enumerate() {
        enter(Stage::ProcessingStory {
            index: i + 1,
            total,
        });

        let content = content_fetcher.fetch_content(&story.url).await;
        // A failed fetch and a very short page are indistinguishable here.
        let summary = if content.chars().count() < settings.min_content_chars {
            info!("Article text unusable ({} chars): {}", content.chars().count(), story.title);
            CONTENT_FALLBACK.to_string()
        } else {
            summarizer.summarize(&story.title, &content).await
        };

        summarized.push(SummarizedStory {
            story: story.clone(),
            summary,
        });

        if i + 1 < total && !settings.story_delay.is_zero() {
            tokio::time::sleep(settings.story_delay).await;
        }
    }

    summarized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn stage_names_read_naturally() {
        assert_eq!(Stage::Init.to_string(), "init");
        assert_eq!(Stage::ProcessingStory { index: 2, total: 5 }.to_string(), "processing story 2/5");
        assert_eq!(Stage::Done.to_string(), "done");
    }

    fn config_for(server: &MockServer) -> Config {
        let mut config = Config::new("sk-test", "push");
        config.endpoints.hacker_news = server.uri();
        config.endpoints.trends = server.uri();
        config.endpoints.reader_prefix = format!("{}/", server.uri());
        config.endpoints.summarizer = server.uri();
        config.endpoints.pushplus = server.uri();
        config
    }

    #[tokio::test]
    async fn clients_are_built_without_touching_the_network() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let clients = RunClients::build(&config_for(&server)).unwrap();
        drop(clients);
    }

    fn linkless(n: usize) -> Vec<Story> {
        (0..n)
            .map(|i| Story {
                title: format!("story {}", i),
                url: String::new(),
                score: 1,
            })
            .collect()
    }

    async fn elapsed_for(count: usize, delay: Duration) -> Duration {
        let mut config = Config::new("sk-test", "push");
        config.digest.story_delay = delay;
        let content_fetcher = ContentFetcher::new(&config).unwrap();
        let summarizer = Summarizer::new(&config).unwrap();

        let start = tokio::time::Instant::now();
        let summarized =
            process_stories(&linkless(count), &content_fetcher, &summarizer, &config.digest).await;
        assert_eq!(summarized.len(), count);
        assert!(summarized.iter().all(|s| s.summary == CONTENT_FALLBACK));
        start.elapsed()
    }

    #[tokio::test(start_paused = true)]
    async fn delay_only_separates_consecutive_stories() {
        let delay = Duration::from_secs(2);
        assert_eq!(elapsed_for(0, delay).await, Duration::ZERO);
        assert_eq!(elapsed_for(1, delay).await, Duration::ZERO);
        assert_eq!(elapsed_for(2, delay).await, delay);
        assert_eq!(elapsed_for(3, delay).await, delay * 2);
    }
}
