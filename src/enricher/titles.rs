use crate::enricher::types::SourceRecord;

/// Collects the raw titles of a record in the order they are searched
pub struct CandidateTitles;

impl CandidateTitles {
    /// Primary, secondary and native titles followed by every alternate title.
    /// Blank entries and repeats are dropped, first occurrence wins.
    #[must_use]
    pub fn collect(record: &SourceRecord) -> Vec<String> {
        let titles = &record.titles;
        let ordered = [&titles.primary, &titles.secondary, &titles.native]
            .into_iter()
            .flatten()
            .chain(record.synonyms.iter());

        let mut seen: Vec<String> = Vec::new();
        for title in ordered {
            let trimmed = title.trim();
            if !trimmed.is_empty() && !seen.iter().any(|t| t == trimmed) {
                seen.push(trimmed.to_string());
            }
        }
        seen
    }

    /// Retry pass subset: secondary and native titles first, then the rest
    #[must_use]
    pub fn collect_for_retry(record: &SourceRecord) -> Vec<String> {
        let mut all = Self::collect(record);
        let preferred: Vec<String> = [&record.titles.secondary, &record.titles.native]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        all.sort_by_key(|t| preferred.iter().position(|p| p == t).unwrap_or(usize::MAX));
        all
    }
}
