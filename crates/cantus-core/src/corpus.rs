//! The ordered song corpus and its loader.
//!
//! A corpus is read from a delimited file with a header row. The columns
//! `song`, `artist` and `text` are required; any other columns are carried
//! through untouched for collaborators. Row order is source order and is
//! the identity of each song.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Error, Result};
use crate::song::SongRecord;

/// Columns every corpus source must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["song", "artist", "text"];

/// Ordered sequence of songs, in source order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<SongRecord>,
    extra_columns: Vec<String>,
}

impl Corpus {
    /// Build a corpus from already-validated records.
    pub fn from_records(records: Vec<SongRecord>) -> Self {
        Self {
            records,
            extra_columns: Vec::new(),
        }
    }

    /// Load a corpus from a comma-delimited file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::DataSource {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_csv_reader(file, &path.display().to_string())
    }

    /// Load a corpus from any comma-delimited reader.
    ///
    /// `origin` names the source in error messages. The header is checked
    /// for all required columns before any row is read; every missing
    /// column is reported at once. A row with an absent or empty required
    /// cell fails the whole load.
    pub fn from_csv_reader<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| data_source_error(origin, &e))?
            .clone();
        let layout = ColumnLayout::from_headers(&headers)?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| data_source_error(origin, &e))?;
            // Header is line 1; fall back to that when the reader has no position.
            let line = row.position().map_or(index as u64 + 2, |p| p.line());
            records.push(layout.song_from_row(&row, line)?);
        }

        log::info!(
            "Loaded {} songs from {} ({} extra columns)",
            records.len(),
            origin,
            layout.extra.len()
        );

        Ok(Self {
            records,
            extra_columns: layout.extra.into_iter().map(|(_, name)| name).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at a row position.
    pub fn get(&self, position: usize) -> Option<&SongRecord> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[SongRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SongRecord> {
        self.records.iter()
    }

    /// Names of the pass-through columns, in source order.
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Value of a pass-through column for the record at `position`.
    pub fn extra_value(&self, position: usize, column: &str) -> Option<&str> {
        let col = self.extra_columns.iter().position(|c| c == column)?;
        self.records
            .get(position)?
            .extra()
            .get(col)
            .map(String::as_str)
    }

    /// Row position of the first record whose title matches exactly.
    ///
    /// Titles may repeat; later rows with the same title are never
    /// returned.
    pub fn position_of(&self, song_title: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.song_title() == song_title)
    }

    /// Song titles in corpus order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(SongRecord::song_title)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a SongRecord;
    type IntoIter = std::slice::Iter<'a, SongRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Header positions of the required and pass-through columns.
#[derive(Debug)]
struct ColumnLayout {
    song: usize,
    artist: usize,
    text: usize,
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| (*name).to_string())
            .collect();

        match (find("song"), find("artist"), find("text")) {
            (Some(song), Some(artist), Some(text)) => {
                let extra = headers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != song && *i != artist && *i != text)
                    .map(|(i, name)| (i, name.to_string()))
                    .collect();
                Ok(Self {
                    song,
                    artist,
                    text,
                    extra,
                })
            }
            _ => Err(Error::Schema { missing }),
        }
    }

    fn song_from_row(&self, row: &StringRecord, line: u64) -> Result<SongRecord> {
        let required = |index: usize, column: &'static str| {
            row.get(index)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingField { line, column })
        };

        let title = required(self.song, "song")?;
        let artist = required(self.artist, "artist")?;
        let text = required(self.text, "text")?;
        let extra = self
            .extra
            .iter()
            .map(|(i, _)| row.get(*i).unwrap_or_default().to_string())
            .collect();

        Ok(SongRecord::new(title, artist, text).with_extra(extra))
    }
}

fn data_source_error(origin: &str, err: &csv::Error) -> Error {
    Error::DataSource {
        path: origin.to_string(),
        message: err.to_string(),
    }
}
