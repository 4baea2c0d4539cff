mod enrichment;
mod media;
mod record;

pub use enrichment::{
    EnrichmentResult, MediaDetails, MediaSubtype, Reason, RefreshPolicy, SeasonInfo,
};
pub use media::{MatchCandidate, MediaKind, SearchKind};
pub use record::{CatalogRecord, SourceRecord, TitleSet};
