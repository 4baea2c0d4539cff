use super::api_types::{
    MovieDetails, MovieResult, MultiResult, SearchResponse, TvDetails, TvResult,
};
use crate::enricher::{
    Result,
    credentials::CredentialRotator,
    provider::{
        HttpClient, SearchClient,
        http::DEFAULT_TIMEOUT,
    },
    types::{MatchCandidate, MediaDetails, MediaKind, SearchKind, SeasonInfo},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbOptions {
    pub base_url: String,
    /// Locale used for search requests
    pub language: String,
    pub timeout: Duration,
}

impl Default for TmdbOptions {
    fn default() -> Self {
        Self {
            base_url: TMDB_BASE_URL.to_string(),
            language: "pt-BR".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// TMDB search and details client. Every request draws the next bearer
/// credential from the rotator.
pub struct TmdbClient {
    client: HttpClient,
    credentials: CredentialRotator,
    language: String,
}

impl TmdbClient {
    pub fn new(credentials: CredentialRotator, options: TmdbOptions) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(options.base_url, options.timeout)?,
            credentials,
            language: options.language,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let token = self.credentials.next();
        self.client.get_with_params(endpoint, params, token).await
    }

    async fn search_endpoint(&self, kind: SearchKind, query: &str) -> Result<Vec<MatchCandidate>> {
        let params = [("query", query), ("language", self.language.as_str())];

        let candidates = match kind {
            SearchKind::Tv => {
                let response: SearchResponse<TvResult> =
                    self.request(kind.endpoint(), &params).await?;
                response
                    .results
                    .into_iter()
                    .map(Self::tv_result_to_candidate)
                    .collect()
            }
            SearchKind::Movie => {
                let response: SearchResponse<MovieResult> =
                    self.request(kind.endpoint(), &params).await?;
                response
                    .results
                    .into_iter()
                    .map(Self::movie_result_to_candidate)
                    .collect()
            }
            SearchKind::Multi => {
                let response: SearchResponse<MultiResult> =
                    self.request(kind.endpoint(), &params).await?;
                response
                    .results
                    .into_iter()
                    .filter_map(Self::multi_result_to_candidate)
                    .collect()
            }
        };

        Ok(candidates)
    }

    fn movie_result_to_candidate(movie: MovieResult) -> MatchCandidate {
        MatchCandidate::new(movie.id, MediaKind::Movie, movie.title)
            .with_release_date(movie.release_date)
            .with_images(movie.poster_path, movie.backdrop_path)
            .with_overview(movie.overview)
            .with_rating(movie.vote_average)
            .with_language(movie.original_language)
    }

    fn tv_result_to_candidate(tv: TvResult) -> MatchCandidate {
        MatchCandidate::new(tv.id, MediaKind::Tv, tv.name)
            .with_release_date(tv.first_air_date)
            .with_images(tv.poster_path, tv.backdrop_path)
            .with_overview(tv.overview)
            .with_rating(tv.vote_average)
            .with_language(tv.original_language)
    }

    /// People and other non-title hits are dropped
    fn multi_result_to_candidate(hit: MultiResult) -> Option<MatchCandidate> {
        let kind = MediaKind::from_tag(&hit.media_type)?;
        let (title, date) = match kind {
            MediaKind::Movie => (hit.title, hit.release_date),
            MediaKind::Tv => (hit.name, hit.first_air_date),
        };

        Some(
            MatchCandidate::new(hit.id, kind, title.unwrap_or_default())
                .with_release_date(date)
                .with_images(hit.poster_path, hit.backdrop_path)
                .with_overview(hit.overview)
                .with_rating(hit.vote_average)
                .with_language(hit.original_language),
        )
    }

    async fn movie_details(&self, id: u64, language: &str) -> Result<MediaDetails> {
        let endpoint = format!("/movie/{id}");
        let movie: MovieDetails = self.request(&endpoint, &[("language", language)]).await?;

        Ok(MediaDetails {
            runtime: movie.runtime.filter(|m| *m > 0),
            overview: movie.overview,
            ..Default::default()
        })
    }

    async fn tv_details(&self, id: u64, language: &str) -> Result<MediaDetails> {
        let endpoint = format!("/tv/{id}");
        let tv: TvDetails = self.request(&endpoint, &[("language", language)]).await?;

        Ok(MediaDetails {
            runtime: None,
            episode_runtime: tv.episode_run_time.iter().copied().find(|m| *m > 0),
            episode_count: tv.number_of_episodes,
            seasons: tv
                .seasons
                .into_iter()
                .map(|s| SeasonInfo {
                    number: s.season_number,
                    episode_count: s.episode_count,
                    poster: s.poster_path,
                    air_date: s.air_date,
                })
                .collect(),
            overview: tv.overview,
        })
    }
}

#[async_trait]
impl SearchClient for TmdbClient {
    fn id(&self) -> &'static str {
        "tmdb"
    }

    async fn search(&self, kind: SearchKind, query: &str) -> Vec<MatchCandidate> {
        match self.search_endpoint(kind, query).await {
            Ok(candidates) => {
                debug!(
                    "Search {} returned {} results for: {}",
                    kind,
                    candidates.len(),
                    query
                );
                candidates
            }
            Err(e) => {
                debug!("Search {} failed for {}: {}", kind, query, e);
                Vec::new()
            }
        }
    }

    async fn details(&self, kind: MediaKind, id: u64, language: &str) -> Result<MediaDetails> {
        match kind {
            MediaKind::Movie => self.movie_details(id, language).await,
            MediaKind::Tv => self.tv_details(id, language).await,
        }
    }
}
