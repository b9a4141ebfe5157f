use std::env;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

/// Outbound network behaviour, selected once per process.
///
/// On a developer machine a system proxy is often configured for browsing but
/// breaks API calls, so the local profile bypasses it. Hosted CI runners keep
/// whatever the host provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkProfile {
    Local,
    Hosted,
}

impl NetworkProfile {
    /// `GITHUB_ACTIONS=true` is set by the hosted runner.
    pub fn detect(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("GITHUB_ACTIONS").as_deref() {
            Some("true") => NetworkProfile::Hosted,
            _ => NetworkProfile::Local,
        }
    }

    pub fn apply(self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        match self {
            NetworkProfile::Local => builder.no_proxy(),
            NetworkProfile::Hosted => builder,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub hacker_news: String,
    pub trends: String,
    pub reader_prefix: String,
    pub summarizer: String,
    pub pushplus: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            hacker_news: "https://hacker-news.firebaseio.com/v0".to_string(),
            trends: "https://api.ossinsight.io/v1/trends/repos".to_string(),
            reader_prefix: "https://r.jina.ai/".to_string(),
            summarizer: "https://api.deepseek.com".to_string(),
            pushplus: "http://www.pushplus.plus/send".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timeouts {
    pub ranking: Duration,
    pub trends: Duration,
    pub content: Duration,
    pub summarize: Duration,
    pub notify: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            ranking: Duration::from_secs(10),
            trends: Duration::from_secs(20),
            content: Duration::from_secs(20),
            summarize: Duration::from_secs(120),
            notify: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub story_count: usize,
    pub repo_count: usize,
    pub story_delay: Duration,
    /// Fetched content shorter than this many characters is not summarized.
    pub min_content_chars: usize,
    pub utc_offset_hours: i8,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            story_count: 5,
            repo_count: 5,
            story_delay: Duration::from_secs(1),
            min_content_chars: 100,
            utc_offset_hours: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub model: String,
    pub max_content_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            max_content_chars: 6000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub summarization_api_key: String,
    pub push_token: String,
    pub network: NetworkProfile,
    pub endpoints: Endpoints,
    pub timeouts: Timeouts,
    pub digest: DigestConfig,
    pub summarizer: SummarizerConfig,
}

impl Config {
    /// Builds a configuration with every tunable at its default.
    pub fn new(summarization_api_key: impl Into<String>, push_token: impl Into<String>) -> Self {
        Self {
            summarization_api_key: summarization_api_key.into(),
            push_token: push_token.into(),
            network: NetworkProfile::Local,
            endpoints: Endpoints::default(),
            timeouts: Timeouts::default(),
            digest: DigestConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            network = ?config.network,
            stories = config.digest.story_count,
            repos = config.digest.repo_count,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let summarization_api_key = require(&lookup, "DEEPSEEK_API_KEY")?;
        let push_token = require(&lookup, "PUSHPLUS_TOKEN")?;

        let mut config = Config::new(summarization_api_key, push_token);
        config.network = NetworkProfile::detect(&lookup);

        let defaults = DigestConfig::default();
        config.digest = DigestConfig {
            story_count: parsed(&lookup, "DIGEST_STORY_COUNT").unwrap_or(defaults.story_count),
            repo_count: parsed(&lookup, "DIGEST_REPO_COUNT").unwrap_or(defaults.repo_count),
            story_delay: parsed(&lookup, "DIGEST_STORY_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.story_delay),
            min_content_chars: parsed(&lookup, "DIGEST_MIN_CONTENT_CHARS")
                .unwrap_or(defaults.min_content_chars),
            utc_offset_hours: parsed(&lookup, "DIGEST_UTC_OFFSET_HOURS")
                .filter(|hours: &i8| (-12..=14).contains(hours))
                .unwrap_or(defaults.utc_offset_hours),
        };

        if let Some(model) = lookup("SUMMARY_MODEL").filter(|s| !s.is_empty()) {
            config.summarizer.model = model;
        }
        if let Some(max) = parsed(&lookup, "SUMMARY_MAX_CONTENT_CHARS") {
            config.summarizer.max_content_chars = max;
        }

        let endpoints = &mut config.endpoints;
        for (key, slot) in [
            ("HN_API_BASE", &mut endpoints.hacker_news),
            ("TRENDS_API_URL", &mut endpoints.trends),
            ("READER_PROXY_PREFIX", &mut endpoints.reader_prefix),
            ("SUMMARY_API_BASE", &mut endpoints.summarizer),
            ("PUSHPLUS_URL", &mut endpoints.pushplus),
        ] {
            if let Some(value) = lookup(key).filter(|s| !s.is_empty()) {
                *slot = value;
            }
        }

        Ok(config)
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
