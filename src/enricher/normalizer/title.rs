use super::patterns::{PATTERNS, ROMAN_NUMERALS};
use unicode_normalization::UnicodeNormalization;

/// Longest prefix, in words, tried as the truncated variant
const TRUNCATED_WORDS: usize = 6;

/// A query string derived from a raw title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleVariant {
    /// Normalized query
    pub query: String,
    /// Season number parsed from the raw title
    pub season: Option<u32>,
}

/// Full normalization of one raw title
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedTitle {
    /// Canonical comparable form
    pub canonical: String,
    /// Canonical form without stopwords and season phrase, if it differs
    pub soft: Option<String>,
    /// First words of the canonical form, for long titles
    pub truncated: Option<String>,
    /// Those first words run together ("re zero" -> "rezero")
    pub spaceless: Option<String>,
    /// Season hint
    pub season: Option<u32>,
}

pub struct TitleNormalizer;

impl TitleNormalizer {
    /// Canonical form: diacritics stripped, lowercase, roman numerals I-VI as
    /// digits, non-alphanumerics removed, whitespace collapsed. Idempotent.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        let folded: String = raw
            .nfkd()
            .filter(|c| !is_latin_diacritic(*c))
            .nfc()
            .collect::<String>()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        folded
            .split_whitespace()
            .map(|word| {
                ROMAN_NUMERALS
                    .iter()
                    .find(|(roman, _)| *roman == word)
                    .map_or(word, |(_, digit)| *digit)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Season hint from "season|stage|part|cour" followed by a number.
    ///
    /// The raw string is checked first; the canonical form is the fallback so
    /// that "Season II" still yields 2.
    #[must_use]
    pub fn season_hint(raw: &str) -> Option<u32> {
        Self::capture_season(raw).or_else(|| Self::capture_season(&Self::normalize(raw)))
    }

    /// Canonical form with low-information tokens and the season phrase removed.
    /// Returns `None` when nothing would change or nothing would remain.
    #[must_use]
    pub fn soften(canonical: &str) -> Option<String> {
        let without_season = PATTERNS.season_phrase.replace_all(canonical, " ");
        let without_stopwords = PATTERNS.stopwords.replace_all(&without_season, " ");
        let soft = without_stopwords.split_whitespace().collect::<Vec<_>>().join(" ");

        (!soft.is_empty() && soft != canonical).then_some(soft)
    }

    /// Normalize a raw title into all of its forms
    #[must_use]
    pub fn analyze(raw: &str) -> NormalizedTitle {
        let canonical = Self::normalize(raw);
        let soft = Self::soften(&canonical);

        let words: Vec<&str> = canonical.split_whitespace().collect();
        let truncated =
            (words.len() > TRUNCATED_WORDS).then(|| words[..TRUNCATED_WORDS].join(" "));
        let spaceless = (words.len() > 1)
            .then(|| words.iter().take(TRUNCATED_WORDS).copied().collect::<String>());

        NormalizedTitle {
            season: Self::season_hint(raw),
            canonical,
            soft,
            truncated,
            spaceless,
        }
    }

    /// Query variants in the order they are tried: canonical, soft,
    /// truncated, spaceless. Empty and duplicate variants are dropped.
    #[must_use]
    pub fn variants(raw: &str) -> Vec<TitleVariant> {
        let normalized = Self::analyze(raw);
        let season = normalized.season;

        let mut variants: Vec<TitleVariant> = Vec::with_capacity(4);
        for query in [
            Some(normalized.canonical),
            normalized.soft,
            normalized.truncated,
            normalized.spaceless,
        ]
        .into_iter()
        .flatten()
        {
            if !query.is_empty() && !variants.iter().any(|v| v.query == query) {
                variants.push(TitleVariant { query, season });
            }
        }

        variants
    }

    fn capture_season(text: &str) -> Option<u32> {
        PATTERNS
            .season
            .captures(text)
            .and_then(|caps| caps.get(2))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Combining Diacritical Marks block. Marks outside it (kana voicing marks,
/// for one) are recomposed instead of dropped.
const fn is_latin_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}
