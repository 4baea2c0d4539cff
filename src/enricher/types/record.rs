use super::EnrichmentResult;
use serde::{Deserialize, Serialize};

/// Title set as delivered by the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSet {
    /// Primary (English) title
    #[serde(rename = "english", default)]
    pub primary: Option<String>,
    /// Secondary (romanized) title
    #[serde(rename = "romaji", default)]
    pub secondary: Option<String>,
    /// Native-script title
    #[serde(default)]
    pub native: Option<String>,
}

/// Catalog entry as received from the upstream catalog. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Catalog id
    pub anilist_id: u64,
    /// Format tag (TV, MOVIE, OVA, ...)
    #[serde(default)]
    pub format: Option<String>,
    /// Airing status
    #[serde(default)]
    pub status: Option<String>,
    /// Episode count
    #[serde(default)]
    pub episodes: Option<u32>,
    /// Release year
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub titles: TitleSet,
    /// Alternate titles
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl SourceRecord {
    pub fn new(anilist_id: u64) -> Self {
        Self {
            anilist_id,
            ..Default::default()
        }
    }

    /// Builder pattern: set primary title
    pub fn with_primary(mut self, title: impl Into<String>) -> Self {
        self.titles.primary = Some(title.into());
        self
    }

    /// Builder pattern: set secondary title
    pub fn with_secondary(mut self, title: impl Into<String>) -> Self {
        self.titles.secondary = Some(title.into());
        self
    }

    /// Builder pattern: set native title
    pub fn with_native(mut self, title: impl Into<String>) -> Self {
        self.titles.native = Some(title.into());
        self
    }

    /// Builder pattern: add an alternate title
    pub fn with_synonym(mut self, title: impl Into<String>) -> Self {
        self.synonyms.push(title.into());
        self
    }

    /// Builder pattern: set year
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Builder pattern: set format tag
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Persisted catalog record: the source fields plus the embedded enrichment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(flatten)]
    pub source: SourceRecord,
    #[serde(default)]
    pub tmdb: EnrichmentResult,
}

impl CatalogRecord {
    /// Wrap a source record with an empty enrichment
    #[must_use]
    pub fn new(source: SourceRecord) -> Self {
        Self {
            source,
            tmdb: EnrichmentResult::default(),
        }
    }
}

impl From<SourceRecord> for CatalogRecord {
    fn from(source: SourceRecord) -> Self {
        Self::new(source)
    }
}
