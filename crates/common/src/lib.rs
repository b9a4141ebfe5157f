pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod source;

pub use config::{Config, NetworkProfile};
pub use error::{ConfigError, FetchError, FetchResult, NotifyError, SummarizeError};
pub use models::{Digest, Repository, Story, SummarizedStory};
pub use source::RankingSource;
