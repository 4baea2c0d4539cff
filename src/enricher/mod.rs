pub mod cache;
pub mod classifier;
pub mod credentials;
pub mod manager;
pub mod matcher;
pub mod normalizer;
pub mod progress;
pub mod provider;
mod retry;
pub mod titles;
pub mod types;

#[cfg(test)]
mod mocks;

pub use cache::{CacheStats, DetailsCache};
pub use classifier::Classifier;
pub use credentials::{CredentialRotator, MIN_CREDENTIALS};
pub use manager::{Enricher, EnricherConfig, Pass, RunSummary};
pub use matcher::{SeasonResolver, YearFilter};
pub use normalizer::{NormalizedTitle, TitleNormalizer, TitleVariant};
pub use progress::{ProgressSnapshot, ProgressTracker, RecordOutcome};
pub use provider::{HttpClient, SearchClient, TmdbClient, TmdbOptions};
pub use titles::CandidateTitles;
pub use types::{
    CatalogRecord, EnrichmentResult, MatchCandidate, MediaDetails, MediaKind, MediaSubtype,
    Reason, RefreshPolicy, SearchKind, SeasonInfo, SourceRecord, TitleSet,
};

use crate::config::Settings;
use std::sync::Arc;
use tracing::info;

/// Enricher result type
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Enricher error types
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Need at least {required} TMDB credentials, found {found}")]
    InsufficientCredentials { found: usize, required: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build an enricher backed by TMDB from loaded settings.
///
/// Fails when fewer than [`MIN_CREDENTIALS`] distinct tokens are configured.
pub fn create_enricher(settings: &Settings) -> Result<Enricher> {
    let credentials = CredentialRotator::new(settings.tokens())?;
    info!("Loaded {} TMDB credentials", credentials.len());

    let client = TmdbClient::new(credentials, settings.tmdb_options())?;
    Ok(Enricher::new(Arc::new(client), settings.enricher_config()))
}
