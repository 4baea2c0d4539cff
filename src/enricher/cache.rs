use crate::enricher::{
    provider::SearchClient,
    types::{MediaDetails, MediaKind},
};
use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

/// Cache key for extended details
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct DetailsKey {
    kind: MediaKind,
    id: u64,
    language: String,
}

/// Run-scoped memo of details fetches.
///
/// Concurrent lookups of the same key are coalesced: one caller runs the
/// fetch, the others wait for its value. Entries never expire. Failed fetches
/// are not stored, so a later pass may try again.
#[derive(Clone)]
pub struct DetailsCache {
    client: Arc<dyn SearchClient>,
    cache: Cache<DetailsKey, Arc<MediaDetails>>,
}

impl DetailsCache {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            cache: Cache::builder().build(),
        }
    }

    /// Details for one item in one locale, `None` when the provider failed
    pub async fn get(&self, kind: MediaKind, id: u64, language: &str) -> Option<Arc<MediaDetails>> {
        let key = DetailsKey {
            kind,
            id,
            language: language.to_string(),
        };

        let client = Arc::clone(&self.client);
        let lang = language.to_string();
        let fetched = self
            .cache
            .try_get_with(key, async move {
                debug!("Fetching details: {}:{} ({})", kind, id, lang);
                client.details(kind, id, &lang).await.map(Arc::new)
            })
            .await;

        match fetched {
            Ok(details) => Some(details),
            Err(e) => {
                debug!("Details {}:{} unavailable: {}", kind, id, e);
                None
            }
        }
    }

    /// Details in the primary locale, with the synopsis taken from the
    /// fallback locale when the primary one has none
    pub async fn get_localized(
        &self,
        kind: MediaKind,
        id: u64,
        language: &str,
        fallback_language: Option<&str>,
    ) -> Option<MediaDetails> {
        let primary = self.get(kind, id, language).await;
        if primary.as_ref().is_some_and(|d| d.has_overview()) {
            return primary.map(|d| (*d).clone());
        }

        let Some(fallback_language) = fallback_language.filter(|l| *l != language) else {
            return primary.map(|d| (*d).clone());
        };

        let fallback = self.get(kind, id, fallback_language).await;
        match (primary, fallback) {
            (Some(primary), Some(fallback)) if fallback.has_overview() => {
                let mut merged = (*primary).clone();
                merged.overview = fallback.overview.clone();
                Some(merged)
            }
            (Some(primary), _) => Some((*primary).clone()),
            (None, fallback) => fallback.map(|d| (*d).clone()),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: u64,
}
