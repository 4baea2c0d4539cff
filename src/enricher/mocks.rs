//! In-memory [`SearchClient`] used by the enricher tests

use crate::enricher::{
    EnrichError, Result,
    provider::SearchClient,
    types::{MatchCandidate, MediaDetails, MediaKind, SearchKind},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned provider: search hits per endpoint (optionally tied to one query),
/// details per item, synopsis per locale. Counts every call.
#[derive(Default)]
pub struct StubClient {
    results: Vec<(SearchKind, Option<String>, MatchCandidate)>,
    details: HashMap<(MediaKind, u64), MediaDetails>,
    overviews: HashMap<(u64, String), String>,
    latency_ms: Option<(u64, u64)>,
    search_calls: AtomicUsize,
    details_calls: AtomicUsize,
    queries: Mutex<Vec<(SearchKind, String)>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit returned by `kind` for any query
    pub fn with_result(mut self, kind: SearchKind, candidate: MatchCandidate) -> Self {
        self.results.push((kind, None, candidate));
        self
    }

    /// Hit returned by `kind` only for `query`
    pub fn with_result_for(
        mut self,
        kind: SearchKind,
        query: &str,
        candidate: MatchCandidate,
    ) -> Self {
        self.results.push((kind, Some(query.to_string()), candidate));
        self
    }

    pub fn with_details(mut self, kind: MediaKind, id: u64, details: MediaDetails) -> Self {
        self.details.insert((kind, id), details);
        self
    }

    /// Synopsis served for `id` in `language`
    pub fn with_overview(mut self, id: u64, language: &str, overview: &str) -> Self {
        self.overviews
            .insert((id, language.to_string()), overview.to_string());
        self
    }

    /// Random delay in `[min, max]` milliseconds on every call
    pub fn with_latency(mut self, min: u64, max: u64) -> Self {
        self.latency_ms = Some((min, max.max(min)));
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(SearchKind, String)> {
        self.queries.lock().clone()
    }

    async fn delay(&self) {
        if let Some((min, max)) = self.latency_ms {
            let ms = rand::rng().random_range(min..=max);
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait]
impl SearchClient for StubClient {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn search(&self, kind: SearchKind, query: &str) -> Vec<MatchCandidate> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push((kind, query.to_string()));
        self.delay().await;

        self.results
            .iter()
            .filter(|(k, q, _)| *k == kind && q.as_deref().is_none_or(|q| q == query))
            .map(|(_, _, c)| c.clone())
            .collect()
    }

    async fn details(&self, kind: MediaKind, id: u64, language: &str) -> Result<MediaDetails> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;

        let mut details = self
            .details
            .get(&(kind, id))
            .cloned()
            .ok_or_else(|| EnrichError::Api {
                status: 404,
                message: format!("{kind}/{id} not found"),
            })?;
        if let Some(overview) = self.overviews.get(&(id, language.to_string())) {
            details.overview = Some(overview.clone());
        }
        Ok(details)
    }
}
