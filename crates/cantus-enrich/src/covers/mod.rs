//! Album cover lookup.
//!
//! Cover art is a display nicety outside the recommender's correctness:
//! [`CoverArtResolver::resolve`] always yields an image URL, substituting
//! the configured placeholder when a lookup finds nothing or fails.

mod spotify;

use std::fmt;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::EnrichResult;

pub use spotify::SpotifyClient;

/// A source of album cover images.
#[async_trait]
pub trait CoverArtLookup: Send + Sync {
    /// Human-readable source name used in logs.
    fn name(&self) -> &str;

    /// URL of the cover for a song, or `None` when the source has no match.
    async fn lookup_cover_art(&self, song_title: &str, artist: &str)
        -> EnrichResult<Option<String>>;
}

/// Lookup that never finds anything; used when no source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderLookup;

#[async_trait]
impl CoverArtLookup for PlaceholderLookup {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn lookup_cover_art(&self, _song_title: &str, _artist: &str)
        -> EnrichResult<Option<String>> {
        Ok(None)
    }
}

/// Resolves a cover image for every song, never failing.
pub struct CoverArtResolver {
    lookup: Box<dyn CoverArtLookup>,
    placeholder: String,
}

impl fmt::Debug for CoverArtResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverArtResolver")
            .field("lookup", &self.lookup.name())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

impl CoverArtResolver {
    pub fn new(lookup: Box<dyn CoverArtLookup>, placeholder: impl Into<String>) -> Self {
        Self {
            lookup,
            placeholder: placeholder.into(),
        }
    }

    /// Build a resolver from configuration: Spotify when credentials are
    /// present, otherwise placeholders only.
    pub fn from_config(config: &Config) -> EnrichResult<Self> {
        let lookup: Box<dyn CoverArtLookup> = match config.spotify_credentials() {
            Some((id, secret)) => Box::new(SpotifyClient::new(id, secret)?),
            None => {
                log::debug!("No Spotify credentials configured; covers use the placeholder");
                Box::new(PlaceholderLookup)
            }
        };
        Ok(Self::new(lookup, config.placeholder_cover_url.clone()))
    }

    pub fn source_name(&self) -> &str {
        self.lookup.name()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Cover URL for a song, or the placeholder.
    pub async fn resolve(&self, song_title: &str, artist: &str) -> String {
        match self.lookup.lookup_cover_art(song_title, artist).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                log::debug!(
                    "No cover from {} for {} - {}",
                    self.lookup.name(),
                    artist,
                    song_title
                );
                self.placeholder.clone()
            }
            Err(e) => {
                log::warn!(
                    "Cover lookup via {} failed for {} - {}: {}",
                    self.lookup.name(),
                    artist,
                    song_title,
                    e
                );
                self.placeholder.clone()
            }
        }
    }
}
