use async_trait::async_trait;

/// An upstream that returns items in ranked order.
///
/// Implementations never fail outward: an unreachable or misbehaving upstream
/// yields an empty list and a log line.
#[async_trait]
pub trait RankingSource: Send + Sync {
    type Item: Send;

    async fn fetch_ranked(&self, limit: usize) -> Vec<Self::Item>;
    fn name(&self) -> &'static str;
}
