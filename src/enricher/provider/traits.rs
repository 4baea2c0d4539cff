use crate::enricher::{
    Result,
    types::{MatchCandidate, MediaDetails, MediaKind, SearchKind},
};
use async_trait::async_trait;

/// Contract over the metadata provider's search and details endpoints
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Provider identifier (e.g., "tmdb")
    fn id(&self) -> &'static str;

    /// Search one endpoint. Hits come back in provider order. Failures and
    /// non-success responses yield an empty list.
    async fn search(&self, kind: SearchKind, query: &str) -> Vec<MatchCandidate>;

    /// Extended details for one item in one locale
    async fn details(&self, kind: MediaKind, id: u64, language: &str) -> Result<MediaDetails>;
}
