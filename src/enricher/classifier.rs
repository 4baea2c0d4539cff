use crate::enricher::types::{MediaKind, MediaSubtype};

/// Movies shorter than this are music videos
const MUSIC_MAX_RUNTIME: u32 = 15;
/// Series with at most this many episodes are OVA/ONA releases
const OVA_MAX_EPISODES: u32 = 6;
/// Series whose episodes are shorter than this are TV shorts
const SHORT_MAX_EPISODE_RUNTIME: u32 = 10;

/// Maps runtime and episode statistics to a media sub-type
pub struct Classifier;

impl Classifier {
    /// Rules are checked top to bottom within each kind; the first hit wins.
    #[must_use]
    pub fn classify(
        kind: Option<MediaKind>,
        runtime: Option<u32>,
        episode_runtime: Option<u32>,
        episode_count: Option<u32>,
    ) -> MediaSubtype {
        match kind {
            Some(MediaKind::Movie) => match runtime {
                Some(minutes) if minutes < MUSIC_MAX_RUNTIME => MediaSubtype::Music,
                _ => MediaSubtype::Movie,
            },
            Some(MediaKind::Tv) => {
                if episode_count.is_some_and(|n| n <= OVA_MAX_EPISODES) {
                    MediaSubtype::OvaOna
                } else if episode_runtime.is_some_and(|m| m < SHORT_MAX_EPISODE_RUNTIME) {
                    MediaSubtype::TvShort
                } else {
                    MediaSubtype::Tv
                }
            }
            None => MediaSubtype::Unclassified,
        }
    }
}
