//! Helpers for classifying play queries and describing resolved tracks.

/// Submodule defining the `Song` struct used across the music commands.
pub mod track_metadata;

use regex::Regex;
use std::sync::LazyLock;

/// Matches queries that should be played directly instead of searched for.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

/// A utility struct providing general helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Scheme-prefix check only; it does not validate that the URL resolves or is audio.
    pub fn is_url(input: &str) -> bool {
        URL_REGEX.is_match(input)
    }
}
