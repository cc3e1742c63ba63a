//! The similarity index: a corpus and its term vectors, built together.

use std::path::Path;
use std::time::Instant;

use cantus_core::{Corpus, Result};
use serde::Serialize;

use crate::vectorizer::{TermVectorSpace, VectorizerConfig};

/// Number of recommendations returned when the caller has no preference.
pub const DEFAULT_TOP_N: usize = 5;

/// One ranked neighbor of a query song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Row position in the corpus.
    pub position: usize,
    pub title: String,
    pub artist: String,
    /// Cosine similarity to the query song.
    pub score: f32,
}

/// Immutable lyric similarity index.
///
/// Owns the corpus and its [`TermVectorSpace`]; row `i` of one is row `i`
/// of the other. Queries never mutate the index, so a built index can be
/// shared across threads freely.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    corpus: Corpus,
    space: TermVectorSpace,
}

impl SimilarityIndex {
    /// Vectorize a corpus. Infallible once the corpus itself has loaded.
    pub fn build(corpus: Corpus, config: &VectorizerConfig) -> Self {
        let started = Instant::now();
        let documents: Vec<&str> = corpus.iter().map(|s| s.normalized_text()).collect();
        let space = TermVectorSpace::fit(config, &documents);

        log::info!(
            "Built similarity index: {} songs, {} dimensions in {:.2?}",
            space.row_count(),
            space.dimensions(),
            started.elapsed()
        );

        Self { corpus, space }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vectors(&self) -> &TermVectorSpace {
        &self.space
    }

    pub fn into_parts(self) -> (Corpus, TermVectorSpace) {
        (self.corpus, self.space)
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Row position of the first song with this exact title.
    pub fn find_position(&self, song_title: &str) -> Option<usize> {
        self.corpus.position_of(song_title)
    }

    /// Similarity of the song at `position` to every song, in row order.
    pub fn similarities(&self, position: usize) -> Option<Vec<f32>> {
        self.space.similarities(position)
    }

    /// Top `top_n` neighbors of the song at `position`.
    ///
    /// The query row itself is never returned. Equal scores keep corpus
    /// order. An out-of-range position yields no recommendations.
    pub fn recommend_position(&self, position: usize, top_n: usize) -> Vec<Recommendation> {
        if top_n == 0 {
            return Vec::new();
        }
        let Some(scores) = self.similarities(position) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f32)> = scores
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .collect();
        // Stable: ties stay in ascending row order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_n);

        ranked
            .into_iter()
            .filter_map(|(i, score)| {
                let song = self.corpus.get(i)?;
                Some(Recommendation {
                    position: i,
                    title: song.song_title().to_string(),
                    artist: song.artist().to_string(),
                    score,
                })
            })
            .collect()
    }

    /// Top `top_n` neighbors of the first song titled `song_title`.
    ///
    /// An unknown title is not an error: the result is simply empty.
    pub fn recommend_detailed(&self, song_title: &str, top_n: usize) -> Vec<Recommendation> {
        match self.find_position(song_title) {
            Some(position) => self.recommend_position(position, top_n),
            None => {
                log::debug!("No song titled {:?} in corpus", song_title);
                Vec::new()
            }
        }
    }

    /// Titles of the top `top_n` neighbors of the first song titled
    /// `song_title`. Titles may repeat when the corpus repeats them.
    pub fn recommend(&self, song_title: &str, top_n: usize) -> Vec<String> {
        self.recommend_detailed(song_title, top_n)
            .into_iter()
            .map(|r| r.title)
            .collect()
    }
}

/// Load a corpus file and build its similarity index.
///
/// Fails with a schema error when required columns are missing, or a
/// data-source error when the file cannot be read or parsed.
pub fn build_similarity_model(path: &Path, config: &VectorizerConfig) -> Result<SimilarityIndex> {
    let corpus = Corpus::from_csv_path(path)?;
    Ok(SimilarityIndex::build(corpus, config))
}

/// Titles of the songs most similar to `song_title`.
pub fn recommend(song_title: &str, index: &SimilarityIndex, top_n: usize) -> Vec<String> {
    index.recommend(song_title, top_n)
}
