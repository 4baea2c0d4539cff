use regex::Regex;
use std::sync::LazyLock;

/// Pre-compiled regex patterns for title normalization
pub struct Patterns {
    /// Season keyword followed by a number: "season 2", "Part3", "cour 1"
    pub season: Regex,
    /// Whole-word season phrase, removed from the soft variant
    pub season_phrase: Regex,
    /// Low-information tokens dropped from the soft variant: ordinals,
    /// bare season keywords, release-type and episode markers
    pub stopwords: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Self {
            season: Regex::new(r"(?i)(season|stage|part|cour)\s*(\d+)")
                .expect("Invalid season regex"),
            season_phrase: Regex::new(r"\b(season|stage|part|cour)\s*\d+\b")
                .expect("Invalid season phrase regex"),
            stopwords: Regex::new(
                r"\b(first|second|third|fourth|final|stage|part|season|cour|ova|ona|special|episode|ep|tv|the animation|anime)\b",
            )
            .expect("Invalid stopwords regex"),
        }
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Roman numerals replaced by digits when they form a whole word
pub const ROMAN_NUMERALS: [(&str, &str); 6] = [
    ("i", "1"),
    ("ii", "2"),
    ("iii", "3"),
    ("iv", "4"),
    ("v", "5"),
    ("vi", "6"),
];

/// Global singleton for patterns
pub static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);
