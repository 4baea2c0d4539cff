use serde::{Deserialize, Serialize};

/// Media category of a resolved match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Tv,
    Movie,
}

impl MediaKind {
    /// Parse a provider `media_type` tag, ignoring anything that is not tv or movie
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tv" => Some(Self::Tv),
            "movie" => Some(Self::Movie),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tv => "tv",
            Self::Movie => "movie",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search endpoint selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Tv,
    Movie,
    Multi,
}

impl SearchKind {
    /// Endpoint order used by the standard pass
    pub const STANDARD_ORDER: [Self; 3] = [Self::Tv, Self::Movie, Self::Multi];

    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Tv => "/search/tv",
            Self::Movie => "/search/movie",
            Self::Multi => "/search/multi",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tv => write!(f, "tv"),
            Self::Movie => write!(f, "movie"),
            Self::Multi => write!(f, "multi"),
        }
    }
}

/// One provider search hit, before acceptance filtering
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Provider id
    pub id: u64,
    /// Media kind (resolved from the endpoint or the `media_type` tag)
    pub kind: MediaKind,
    /// Display title as returned by the provider
    pub title: String,
    /// Poster path
    pub poster: Option<String>,
    /// Backdrop path
    pub backdrop: Option<String>,
    /// Synopsis
    pub overview: Option<String>,
    /// Rating (0-10 scale)
    pub vote_average: Option<f64>,
    /// Release date (movie) or first air date (tv), YYYY-MM-DD
    pub release_date: Option<String>,
    /// Original language code
    pub original_language: Option<String>,
}

impl MatchCandidate {
    /// Create a candidate with the required fields
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            poster: None,
            backdrop: None,
            overview: None,
            vote_average: None,
            release_date: None,
            original_language: None,
        }
    }

    /// Builder pattern: set release date
    pub fn with_release_date(mut self, date: Option<String>) -> Self {
        self.release_date = date;
        self
    }

    /// Builder pattern: set poster and backdrop paths
    pub fn with_images(mut self, poster: Option<String>, backdrop: Option<String>) -> Self {
        self.poster = poster;
        self.backdrop = backdrop;
        self
    }

    /// Builder pattern: set overview
    pub fn with_overview(mut self, overview: Option<String>) -> Self {
        self.overview = overview;
        self
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.vote_average = rating;
        self
    }

    /// Builder pattern: set original language
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.original_language = language;
        self
    }

    /// Release year taken from the first four characters of the date
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}
