use super::{MatchCandidate, MediaKind};
use crate::enricher::classifier::Classifier;
use serde::{Deserialize, Serialize};

/// Outcome code attached to a record after a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Standard pass exhausted every title and endpoint
    NotFound,
    /// Retry pass found a match or a usable synopsis
    RetrySuccess,
    /// Retry pass exhausted its strategies too
    NotFoundFinal,
}

/// Media sub-type derived from runtime and episode statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaSubtype {
    #[serde(rename = "MUSIC")]
    Music,
    #[serde(rename = "MOVIE")]
    Movie,
    #[serde(rename = "OVA/ONA")]
    OvaOna,
    #[serde(rename = "TV_SHORT")]
    TvShort,
    #[serde(rename = "TV")]
    Tv,
    #[serde(rename = "UNCLASSIFIED")]
    Unclassified,
}

/// Season entry of a tv details response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    /// Season number (0 for specials)
    pub number: u32,
    pub episode_count: Option<u32>,
    pub poster: Option<String>,
    pub air_date: Option<String>,
}

/// Extended fields from the per-item details endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    /// Runtime in minutes (movies)
    pub runtime: Option<u32>,
    /// Per-episode runtime in minutes (tv)
    pub episode_runtime: Option<u32>,
    /// Episode count (tv)
    pub episode_count: Option<u32>,
    /// Season list (tv)
    pub seasons: Vec<SeasonInfo>,
    /// Localized synopsis
    pub overview: Option<String>,
}

impl MediaDetails {
    /// Find a season by number
    #[must_use]
    pub fn season(&self, number: u32) -> Option<&SeasonInfo> {
        self.seasons.iter().find(|s| s.number == number)
    }

    /// Whether the synopsis is present and non-blank
    #[must_use]
    pub fn has_overview(&self) -> bool {
        is_present(self.overview.as_deref())
    }
}

/// Which fields must be non-empty for a resolved record to be left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshPolicy {
    pub require_overview: bool,
    pub require_poster: bool,
    pub require_backdrop: bool,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            require_overview: true,
            require_poster: true,
            require_backdrop: false,
        }
    }
}

/// Enrichment embedded in every catalog record.
///
/// `id` and `media_type` are always set or cleared together; the only
/// constructors that set them are [`EnrichmentResult::from_match`] and
/// [`EnrichmentResult::merge_from`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentResult {
    pub id: Option<u64>,
    pub media_type: Option<MediaKind>,
    pub season: Option<u32>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub episode_runtime: Option<u32>,
    pub episode_count: Option<u32>,
    #[serde(rename = "type")]
    pub classification: Option<MediaSubtype>,
    pub checked: bool,
    pub reason: Option<Reason>,
}

impl EnrichmentResult {
    /// Empty sentinel for a record no pass could resolve
    #[must_use]
    pub fn not_found(reason: Reason) -> Self {
        Self {
            checked: true,
            reason: Some(reason),
            ..Self::default()
        }
    }

    /// Build a resolved result from an accepted candidate, its optional
    /// season and its extended details
    #[must_use]
    pub fn from_match(
        candidate: &MatchCandidate,
        season: Option<&SeasonInfo>,
        details: Option<&MediaDetails>,
    ) -> Self {
        let overview = details
            .and_then(|d| d.overview.clone())
            .filter(|o| is_present(Some(o.as_str())))
            .or_else(|| candidate.overview.clone().filter(|o| is_present(Some(o.as_str()))));

        let poster = season
            .and_then(|s| s.poster.clone())
            .or_else(|| candidate.poster.clone());

        let episode_count = season
            .and_then(|s| s.episode_count)
            .or_else(|| details.and_then(|d| d.episode_count));

        let runtime = details.and_then(|d| d.runtime);
        let episode_runtime = details.and_then(|d| d.episode_runtime);

        let classification = Classifier::classify(
            Some(candidate.kind),
            runtime,
            episode_runtime,
            episode_count,
        );

        Self {
            id: Some(candidate.id),
            media_type: Some(candidate.kind),
            season: season.map(|s| s.number),
            poster,
            backdrop: candidate.backdrop.clone(),
            overview,
            vote_average: candidate.vote_average,
            release_date: candidate.release_date.clone(),
            runtime,
            episode_runtime,
            episode_count,
            classification: Some(classification),
            checked: true,
            reason: None,
        }
    }

    /// Upgrade this result with a newer one: values present in `newer` win,
    /// absent ones keep the current value. Identity fields move as a pair.
    pub fn merge_from(&mut self, newer: Self) {
        if let (Some(id), Some(kind)) = (newer.id, newer.media_type) {
            if self.id != Some(id) || self.media_type != Some(kind) {
                // Different title: drop fields that belonged to the old match.
                *self = Self::default();
            }
            self.id = Some(id);
            self.media_type = Some(kind);
        }

        replace_if_some(&mut self.season, newer.season);
        replace_if_some(&mut self.poster, newer.poster);
        replace_if_some(&mut self.backdrop, newer.backdrop);
        replace_if_some(&mut self.vote_average, newer.vote_average);
        replace_if_some(&mut self.release_date, newer.release_date);
        replace_if_some(&mut self.runtime, newer.runtime);
        replace_if_some(&mut self.episode_runtime, newer.episode_runtime);
        replace_if_some(&mut self.episode_count, newer.episode_count);
        replace_if_some(&mut self.classification, newer.classification);
        if is_present(newer.overview.as_deref()) {
            self.overview = newer.overview;
        }

        self.checked = self.checked || newer.checked;
        self.reason = newer.reason;
    }

    /// Whether a provider id is attached
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.id.is_some()
    }

    /// Resolved but missing a field the refresh policy requires
    #[must_use]
    pub fn needs_update(&self, policy: &RefreshPolicy) -> bool {
        self.is_resolved()
            && ((policy.require_overview && !is_present(self.overview.as_deref()))
                || (policy.require_poster && !is_present(self.poster.as_deref()))
                || (policy.require_backdrop && !is_present(self.backdrop.as_deref())))
    }

    /// Whether the standard pass has to (re)query this record
    #[must_use]
    pub fn should_process(&self, policy: &RefreshPolicy) -> bool {
        !self.checked || self.needs_update(policy)
    }

    /// Whether the synopsis exists and is at least `min_len` characters long
    #[must_use]
    pub fn has_adequate_overview(&self, min_len: usize) -> bool {
        self.overview
            .as_deref()
            .is_some_and(|o| o.trim().chars().count() >= min_len.max(1))
    }

    /// Whether the id/kind pair invariant holds
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.id.is_some() == self.media_type.is_some()
    }
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
