//! Defines `Song`, the metadata the bot keeps for every queued track, and its
//! conversion from songbird's auxiliary metadata.

use songbird::input::AuxMetadata;
use std::time::Duration;

/// Metadata for a playable track. Immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Display name of the track.
    pub name: String,
    /// Canonical URL of the track.
    pub url: String,
    /// URL to a thumbnail image, if the source provides one.
    pub thumbnail: Option<String>,
    pub duration: Option<Duration>,
}

impl Default for Song {
    fn default() -> Self {
        Self {
            name: "Unknown Track".to_string(),
            url: String::new(),
            thumbnail: None,
            duration: None,
        }
    }
}

impl Song {
    /// Build a `Song` from resolved metadata. `requested_url` is used when the
    /// source does not report a canonical URL of its own.
    pub fn from_metadata(metadata: AuxMetadata, requested_url: &str) -> Self {
        let AuxMetadata {
            title,
            track,
            source_url,
            thumbnail,
            duration,
            ..
        } = metadata;

        Self {
            name: title.or(track).unwrap_or_else(|| Self::default().name),
            url: source_url.unwrap_or_else(|| requested_url.to_string()),
            thumbnail,
            duration,
        }
    }
}
