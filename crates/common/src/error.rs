use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (in the environment or a .env file)")]
    Missing(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Ranking and content fetch failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    /// True when the upstream could not be reached or refused the request,
    /// as opposed to answering with something unreadable.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, FetchError::Malformed(_))
    }
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response contained no choices")]
    NoChoices,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("push rejected with code {code}: {body}")]
    Rejected { code: i64, body: String },
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can carry a non-success HTTP status with its body.
pub trait UpstreamStatus {
    fn from_status(status: u16, body: String) -> Self;
}

macro_rules! impl_upstream_status {
    ($($ty:ty),*) => {
        $(impl UpstreamStatus for $ty {
            fn from_status(status: u16, body: String) -> Self {
                Self::Status { status, body }
            }
        })*
    };
}

impl_upstream_status!(FetchError, SummarizeError, NotifyError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_is_not_unavailable() {
        let parse_err = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        assert!(!FetchError::from(parse_err).is_unavailable());
        assert!(FetchError::from_status(503, String::new()).is_unavailable());
    }

    #[test]
    fn rejection_message_includes_code_and_body() {
        let err = NotifyError::Rejected {
            code: 900,
            body: "{\"code\":900}".to_string(),
        };
        assert_eq!(err.to_string(), "push rejected with code 900: {\"code\":900}");
    }
}
