use crate::enricher::{
    manager::{Enricher, Pass, RunContext, SearchStrategy},
    progress::{ProgressSnapshot, RecordOutcome},
    titles::CandidateTitles,
    types::{CatalogRecord, EnrichmentResult, MediaKind, Reason, SearchKind},
};
use tracing::debug;

const RETRY_STRATEGY: SearchStrategy = SearchStrategy {
    kinds: &[SearchKind::Multi],
    raw_queries: true,
};

impl RunContext {
    /// Unresolved records and records whose synopsis is missing or too short
    pub(crate) fn needs_retry(&self, current: &EnrichmentResult) -> bool {
        !current.is_resolved() || !current.has_adequate_overview(self.config.min_overview_len)
    }

    /// Retry pass for one record. `None` means nothing was left to fix.
    pub(crate) async fn retry_record(
        &self,
        record: &CatalogRecord,
    ) -> Option<(EnrichmentResult, RecordOutcome)> {
        let current = &record.tmdb;
        if !self.needs_retry(current) {
            return None;
        }

        if let (Some(id), Some(kind)) = (current.id, current.media_type) {
            return Some(self.retry_overview(current, kind, id).await);
        }

        let source = &record.source;
        let titles = CandidateTitles::collect_for_retry(source);
        let found = if titles.is_empty() {
            None
        } else {
            self.search_titles(source, &titles, RETRY_STRATEGY).await
        };

        match found {
            Some(mut result) => {
                result.reason = Some(Reason::RetrySuccess);
                let mut updated = current.clone();
                updated.merge_from(result);
                Some((updated, RecordOutcome::Resolved))
            }
            None => {
                debug!("Retry exhausted: anilist:{}", source.anilist_id);
                Some((
                    EnrichmentResult::not_found(Reason::NotFoundFinal),
                    RecordOutcome::Unresolved,
                ))
            }
        }
    }

    /// Refetch the details of a matched item through the locale chain and
    /// keep the synopsis only if it is now long enough
    async fn retry_overview(
        &self,
        current: &EnrichmentResult,
        kind: MediaKind,
        id: u64,
    ) -> (EnrichmentResult, RecordOutcome) {
        let details = self
            .cache
            .get_localized(
                kind,
                id,
                &self.config.language,
                self.config.fallback_language.as_deref(),
            )
            .await;

        let min_len = self.config.min_overview_len.max(1);
        let overview = details
            .and_then(|d| d.overview)
            .filter(|o| o.trim().chars().count() >= min_len);

        let mut updated = current.clone();
        match overview {
            Some(overview) => {
                debug!("Synopsis recovered for {}:{}", kind, id);
                updated.overview = Some(overview);
                updated.checked = true;
                updated.reason = Some(Reason::RetrySuccess);
                (updated, RecordOutcome::Resolved)
            }
            None => (updated, RecordOutcome::Unresolved),
        }
    }
}

impl Enricher {
    /// Second sweep: multi-endpoint search with raw titles for unresolved
    /// records, locale fallback for thin synopses. Running it twice changes
    /// nothing the first run did not.
    pub async fn retry_all(&self, records: Vec<CatalogRecord>) -> (Vec<CatalogRecord>, ProgressSnapshot) {
        self.run_pass(Pass::Retry, records).await
    }
}
