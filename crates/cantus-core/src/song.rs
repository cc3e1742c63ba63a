use serde::Serialize;

use crate::normalize::normalize;

/// A single song in the corpus.
///
/// Titles are not unique: two rows may share a title (covers, different
/// artists), so a record is identified by its row position in the
/// [`Corpus`](crate::Corpus), never by title. Records are immutable once
/// created; the normalized text is derived at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRecord {
    song_title: String,
    artist: String,
    raw_text: String,
    normalized_text: String,
    #[serde(skip)]
    extra: Vec<String>,
}

impl SongRecord {
    #[must_use]
    pub fn new(
        song_title: impl Into<String>,
        artist: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        Self {
            song_title: song_title.into(),
            artist: artist.into(),
            raw_text,
            normalized_text,
            extra: Vec::new(),
        }
    }

    /// Attach pass-through values for the corpus's extra columns, in
    /// column order.
    #[must_use]
    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn song_title(&self) -> &str {
        &self.song_title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Values of the non-required columns, aligned with
    /// [`Corpus::extra_columns`](crate::Corpus::extra_columns).
    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}
