use crate::enricher::{
    cache::DetailsCache,
    types::{MediaDetails, MediaKind, SeasonInfo},
};
use tracing::debug;

/// Season number TMDB uses for specials
pub const SPECIALS_SEASON: u32 = 0;

/// Year proximity check between a record and a candidate
pub struct YearFilter;

impl YearFilter {
    /// Accept when either year is unknown or they differ by at most `tolerance`
    #[must_use]
    pub const fn accept(source_year: Option<i32>, candidate_year: Option<i32>, tolerance: u32) -> bool {
        match (source_year, candidate_year) {
            (Some(source), Some(candidate)) => candidate.abs_diff(source) <= tolerance,
            _ => true,
        }
    }
}

/// Picks the season of a multi-season series that a title refers to
pub struct SeasonResolver<'a> {
    cache: &'a DetailsCache,
    language: &'a str,
}

impl<'a> SeasonResolver<'a> {
    pub const fn new(cache: &'a DetailsCache, language: &'a str) -> Self {
        Self { cache, language }
    }

    /// Fetch the season list of `tv_id` and pick `wanted` (or the specials
    /// season). `None` means the candidate must be rejected.
    pub async fn resolve(&self, tv_id: u64, wanted: u32) -> Option<SeasonInfo> {
        let Some(details) = self.cache.get(MediaKind::Tv, tv_id, self.language).await else {
            debug!("No season list for tv:{}", tv_id);
            return None;
        };

        let season = Self::pick(&details, wanted).cloned();
        match &season {
            Some(s) => debug!("Season match for tv:{}: wanted {}, got {}", tv_id, wanted, s.number),
            None => debug!("No season {} for tv:{}", wanted, tv_id),
        }
        season
    }

    /// The wanted season if listed, otherwise specials, otherwise nothing
    #[must_use]
    pub fn pick(details: &MediaDetails, wanted: u32) -> Option<&SeasonInfo> {
        details
            .season(wanted)
            .or_else(|| details.season(SPECIALS_SEASON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enricher::mocks::StubClient;
    use std::sync::Arc;

    fn season(number: u32) -> SeasonInfo {
        SeasonInfo {
            number,
            episode_count: Some(12),
            poster: None,
            air_date: None,
        }
    }

    fn with_seasons(numbers: &[u32]) -> MediaDetails {
        MediaDetails {
            seasons: numbers.iter().copied().map(season).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_year_filter_boundaries() {
        let tol = 1;
        assert!(YearFilter::accept(Some(2012), Some(2012), tol));
        assert!(YearFilter::accept(Some(2012), Some(2012 + 1), tol));
        assert!(YearFilter::accept(Some(2012), Some(2012 - 1), tol));
        assert!(!YearFilter::accept(Some(2012), Some(2012 + 2), tol));
        assert!(!YearFilter::accept(Some(2012), Some(2012 - 2), tol));

        let tol = 3;
        assert!(YearFilter::accept(Some(2012), Some(2015), tol));
        assert!(!YearFilter::accept(Some(2012), Some(2016), tol));
    }

    #[test]
    fn test_year_filter_unknown_years_pass() {
        assert!(YearFilter::accept(None, Some(1990), 0));
        assert!(YearFilter::accept(Some(1990), None, 0));
        assert!(YearFilter::accept(None, None, 0));
    }

    #[test]
    fn test_pick_prefers_wanted_then_specials() {
        let details = with_seasons(&[0, 1, 2]);
        assert_eq!(SeasonResolver::pick(&details, 2).map(|s| s.number), Some(2));
        assert_eq!(SeasonResolver::pick(&details, 5).map(|s| s.number), Some(0));

        let details = with_seasons(&[1, 2]);
        assert!(SeasonResolver::pick(&details, 3).is_none());
    }

    #[tokio::test]
    async fn test_resolve_fetches_season_list() {
        let stub = Arc::new(StubClient::new().with_details(MediaKind::Tv, 7, with_seasons(&[1, 2])));
        let cache = DetailsCache::new(stub.clone());
        let resolver = SeasonResolver::new(&cache, "pt-BR");

        assert_eq!(resolver.resolve(7, 2).await.map(|s| s.number), Some(2));
        assert!(resolver.resolve(7, 4).await.is_none());
        assert!(resolver.resolve(8, 1).await.is_none());
        // Second lookup of tv:7 is served from the cache.
        assert_eq!(stub.details_calls(), 2);
    }
}
