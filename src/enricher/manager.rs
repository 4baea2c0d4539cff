use crate::enricher::{
    cache::DetailsCache,
    matcher::{SeasonResolver, YearFilter},
    normalizer::{TitleNormalizer, TitleVariant},
    progress::{ProgressSnapshot, ProgressTracker, RecordOutcome},
    provider::SearchClient,
    titles::CandidateTitles,
    types::{
        CatalogRecord, EnrichmentResult, MatchCandidate, MediaKind, Reason, RefreshPolicy,
        SearchKind, SourceRecord,
    },
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Enrichment run configuration
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Number of parallel workers
    pub workers: usize,
    /// Pause a worker takes after each record it queried for
    pub record_delay: Duration,
    /// Maximum year distance between record and candidate, for every pass
    pub year_tolerance: u32,
    /// Primary locale for search and details
    pub language: String,
    /// Locale tried when the primary one has no synopsis
    pub fallback_language: Option<String>,
    /// Fields whose absence makes a resolved record eligible again
    pub refresh: RefreshPolicy,
    /// Synopsis length under which the retry pass revisits a record
    pub min_overview_len: usize,
    /// Log a progress line every N records (0 disables)
    pub progress_log_every: u64,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            record_delay: Duration::from_millis(150),
            year_tolerance: 1,
            language: "pt-BR".to_string(),
            fallback_language: Some("en-US".to_string()),
            refresh: RefreshPolicy::default(),
            min_overview_len: 20,
            progress_log_every: 50,
        }
    }
}

/// Which sweep a worker pool is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Standard,
    Retry,
}

impl Pass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Retry => "retry",
        }
    }
}

/// Endpoints and query forms a pass searches with
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchStrategy {
    pub kinds: &'static [SearchKind],
    /// Try the untouched title before its normalized variants
    pub raw_queries: bool,
}

const STANDARD_STRATEGY: SearchStrategy = SearchStrategy {
    kinds: &SearchKind::STANDARD_ORDER,
    raw_queries: false,
};

/// End-of-run report
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub standard: ProgressSnapshot,
    pub retry: ProgressSnapshot,
    /// Records carrying a provider id after both passes
    pub resolved: usize,
    pub unresolved: usize,
}

/// State shared by every worker of a run
pub(crate) struct RunContext {
    pub(crate) client: Arc<dyn SearchClient>,
    pub(crate) cache: DetailsCache,
    pub(crate) config: EnricherConfig,
}

impl RunContext {
    async fn process(
        &self,
        pass: Pass,
        record: &CatalogRecord,
    ) -> Option<(EnrichmentResult, RecordOutcome)> {
        match pass {
            Pass::Standard => self.enrich_record(record).await,
            Pass::Retry => self.retry_record(record).await,
        }
    }

    /// Standard pass for one record. `None` means the record was skipped
    /// without touching the provider.
    async fn enrich_record(&self, record: &CatalogRecord) -> Option<(EnrichmentResult, RecordOutcome)> {
        let current = &record.tmdb;
        if !current.should_process(&self.config.refresh) {
            return None;
        }

        let source = &record.source;
        let titles = CandidateTitles::collect(source);
        if titles.is_empty() {
            warn!("No usable title: anilist:{}", source.anilist_id);
            return Some(Self::keep_or_mark(current, Reason::NotFound));
        }

        match self.search_titles(source, &titles, STANDARD_STRATEGY).await {
            Some(found) => {
                let mut updated = current.clone();
                updated.merge_from(found);
                Some((updated, RecordOutcome::Resolved))
            }
            None => {
                debug!("Not found: anilist:{} ({} titles)", source.anilist_id, titles.len());
                Some(Self::keep_or_mark(current, Reason::NotFound))
            }
        }
    }

    /// A failed refresh keeps the existing match; anything else becomes the
    /// not-found sentinel
    fn keep_or_mark(current: &EnrichmentResult, reason: Reason) -> (EnrichmentResult, RecordOutcome) {
        if current.is_resolved() {
            let mut kept = current.clone();
            kept.checked = true;
            (kept, RecordOutcome::Resolved)
        } else {
            (EnrichmentResult::not_found(reason), RecordOutcome::Unresolved)
        }
    }

    /// Walk titles, then query variants, then endpoints; the first candidate
    /// passing every filter wins
    pub(crate) async fn search_titles(
        &self,
        source: &SourceRecord,
        titles: &[String],
        strategy: SearchStrategy,
    ) -> Option<EnrichmentResult> {
        let mut rejected: HashSet<(MediaKind, u64, Option<u32>)> = HashSet::new();

        for title in titles {
            for variant in Self::queries_for(title, strategy) {
                for &kind in strategy.kinds {
                    let candidates = self.client.search(kind, &variant.query).await;

                    for candidate in &candidates {
                        let key = (candidate.kind, candidate.id, variant.season);
                        if rejected.contains(&key) {
                            continue;
                        }

                        if let Some(result) = self.accept(source, candidate, variant.season).await {
                            debug!(
                                "Matched anilist:{} -> {}:{} via {} \"{}\"",
                                source.anilist_id, candidate.kind, candidate.id, kind, variant.query
                            );
                            return Some(result);
                        }
                        rejected.insert(key);
                    }
                }
            }
        }

        None
    }

    fn queries_for(title: &str, strategy: SearchStrategy) -> Vec<TitleVariant> {
        let normalized = TitleNormalizer::variants(title);
        if !strategy.raw_queries {
            return normalized;
        }

        let raw = TitleVariant {
            query: title.to_string(),
            season: TitleNormalizer::season_hint(title),
        };
        let mut queries = vec![raw];
        for variant in normalized {
            if !queries.iter().any(|q| q.query == variant.query) {
                queries.push(variant);
            }
        }
        queries
    }

    /// Year filter, then season resolution for tv hits with a season hint,
    /// then details and classification
    async fn accept(
        &self,
        source: &SourceRecord,
        candidate: &MatchCandidate,
        season_hint: Option<u32>,
    ) -> Option<EnrichmentResult> {
        let candidate_year = candidate.year();
        if !YearFilter::accept(source.year, candidate_year, self.config.year_tolerance) {
            debug!(
                "Year mismatch for {}:{}: {:?} vs {:?}",
                candidate.kind, candidate.id, candidate_year, source.year
            );
            return None;
        }

        let season = match (candidate.kind, season_hint) {
            (MediaKind::Tv, Some(wanted)) => Some(
                SeasonResolver::new(&self.cache, &self.config.language)
                    .resolve(candidate.id, wanted)
                    .await?,
            ),
            _ => None,
        };

        let details = self
            .cache
            .get_localized(
                candidate.kind,
                candidate.id,
                &self.config.language,
                self.config.fallback_language.as_deref(),
            )
            .await;

        Some(EnrichmentResult::from_match(
            candidate,
            season.as_ref(),
            details.as_ref(),
        ))
    }
}

/// Drives the per-record pipeline over a catalog with a bounded worker pool.
///
/// Output order always equals input order: every record owns a slot that
/// only the worker holding its index writes to.
pub struct Enricher {
    ctx: Arc<RunContext>,
}

impl Enricher {
    pub fn new(client: Arc<dyn SearchClient>, config: EnricherConfig) -> Self {
        info!(
            "Enricher ready: provider {}, {} workers",
            client.id(),
            config.workers
        );
        let cache = DetailsCache::new(Arc::clone(&client));
        Self {
            ctx: Arc::new(RunContext {
                client,
                cache,
                config,
            }),
        }
    }

    pub fn config(&self) -> &EnricherConfig {
        &self.ctx.config
    }

    pub fn cache(&self) -> &DetailsCache {
        &self.ctx.cache
    }

    /// Standard pass over every record
    pub async fn enrich_all(&self, records: Vec<CatalogRecord>) -> (Vec<CatalogRecord>, ProgressSnapshot) {
        self.run_pass(Pass::Standard, records).await
    }

    /// Standard pass followed by the retry pass
    pub async fn run(&self, records: Vec<CatalogRecord>) -> (Vec<CatalogRecord>, RunSummary) {
        let started_at = Utc::now();

        let (records, standard) = self.enrich_all(records).await;
        let (records, retry) = self.retry_all(records).await;

        let resolved = records.iter().filter(|r| r.tmdb.is_resolved()).count();
        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            standard,
            retry,
            resolved,
            unresolved: records.len() - resolved,
        };

        info!(
            "Run finished: {} resolved, {} unresolved ({} details cached)",
            summary.resolved,
            summary.unresolved,
            self.ctx.cache.stats().entries
        );

        (records, summary)
    }

    pub(crate) async fn run_pass(
        &self,
        pass: Pass,
        records: Vec<CatalogRecord>,
    ) -> (Vec<CatalogRecord>, ProgressSnapshot) {
        let total = records.len();
        let workers = self.ctx.config.workers.max(1);
        let progress = Arc::new(ProgressTracker::new(
            pass.label(),
            total,
            self.ctx.config.progress_log_every,
        ));
        let slots: Arc<Vec<Mutex<CatalogRecord>>> =
            Arc::new(records.into_iter().map(Mutex::new).collect());

        info!(
            "Starting {} pass: {} records, {} workers",
            pass.label(),
            total,
            workers
        );

        let (tx, rx) = mpsc::channel::<usize>(workers * 2);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        let mut join_set = JoinSet::new();
        for worker_id in 0..workers {
            let ctx = Arc::clone(&self.ctx);
            let slots = Arc::clone(&slots);
            let rx = Arc::clone(&rx);
            let progress = Arc::clone(&progress);

            join_set.spawn(async move {
                loop {
                    let next = rx.lock().await.recv().await;
                    let Some(index) = next else {
                        break;
                    };

                    let record = slots[index].lock().clone();
                    let outcome = match ctx.process(pass, &record).await {
                        Some((result, outcome)) => {
                            slots[index].lock().tmdb = result;
                            tokio::time::sleep(ctx.config.record_delay).await;
                            outcome
                        }
                        None => RecordOutcome::Skipped,
                    };
                    progress.record(outcome);
                }
                debug!("Worker {} drained the queue", worker_id);
            });
        }

        for index in 0..total {
            if tx.send(index).await.is_err() {
                error!("All {} workers stopped early", pass.label());
                break;
            }
        }
        drop(tx);

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                error!("Worker task failed: {}", e);
            }
        }

        let records = match Arc::try_unwrap(slots) {
            Ok(slots) => slots.into_iter().map(Mutex::into_inner).collect(),
            Err(shared) => shared.iter().map(|slot| slot.lock().clone()).collect(),
        };

        let snapshot = progress.snapshot();
        info!(
            "Finished {} pass: {} resolved, {} unresolved, {} skipped in {:.1}s",
            pass.label(),
            snapshot.resolved,
            snapshot.unresolved,
            snapshot.skipped,
            snapshot.elapsed.as_secs_f64()
        );

        (records, snapshot)
    }
}
