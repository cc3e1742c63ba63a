//! TF-IDF vectorization of normalized lyric text.
//!
//! The vocabulary is fitted once over the whole corpus and frozen. Terms
//! are unigrams and bigrams of the stop-word-filtered tokens; a term enters
//! the vocabulary only when it occurs in at least `min_df` documents, and
//! at most `max_features` terms are kept, preferring those with the highest
//! total count across the corpus. Each document becomes a sparse,
//! L2-normalized vector of `count * idf` weights, so the cosine similarity
//! of two rows is their dot product.

use std::collections::HashMap;

use crate::stop_words::is_stop_word;

/// Minimum number of documents a term must appear in.
pub const DEFAULT_MIN_DF: usize = 5;

/// Upper bound on vocabulary dimensions.
pub const DEFAULT_MAX_FEATURES: usize = 15_000;

/// Vectorizer policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Terms appearing in fewer documents are dropped.
    pub min_df: usize,
    /// Vocabulary cap.
    pub max_features: usize,
    /// Smallest and largest n-gram length, inclusive.
    pub ngram_range: (usize, usize),
    /// Drop English stop words before building n-grams.
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: DEFAULT_MIN_DF,
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 2),
            stop_words: true,
        }
    }
}

impl VectorizerConfig {
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Split normalized text into the terms counted for one document.
    fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .filter(|t| t.len() >= 2)
            .filter(|t| !self.stop_words || !is_stop_word(t))
            .collect();

        let (low, high) = self.ngram_range;
        let mut terms = Vec::new();
        for n in low.max(1)..=high {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| (*t).to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}

/// A sparse row: dimension indices in ascending order with their weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|(index, _)| *index);
        let (indices, mut values): (Vec<u32>, Vec<f32>) = entries.into_iter().unzip();

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }
        Self { indices, values }
    }

    /// Number of non-zero dimensions.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// `(dimension, weight)` pairs in ascending dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .zip(&self.values)
            .map(|(i, v)| (*i as usize, *v))
    }

    /// Dot product against a dense vector of the full dimensionality.
    pub fn dot_dense(&self, dense: &[f32]) -> f32 {
        self.iter()
            .map(|(i, v)| v * dense.get(i).copied().unwrap_or(0.0))
            .sum()
    }

    /// Scatter into a dense vector of `dimensions` entries.
    pub fn to_dense(&self, dimensions: usize) -> Vec<f32> {
        let mut dense = vec![0.0; dimensions];
        for (i, v) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot = v;
            }
        }
        dense
    }
}

/// Frozen vocabulary plus one vector per corpus row.
#[derive(Debug, Clone, Default)]
pub struct TermVectorSpace {
    vocabulary: HashMap<String, u32>,
    terms: Vec<String>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

#[derive(Debug, Default, Clone, Copy)]
struct TermStats {
    document_frequency: usize,
    total_count: u64,
}

impl TermVectorSpace {
    /// Fit the vocabulary over `documents` and vectorize every one of them.
    ///
    /// Row `i` of the result corresponds to `documents[i]`. An empty
    /// vocabulary is allowed: every row is then the zero vector.
    pub fn fit(config: &VectorizerConfig, documents: &[&str]) -> Self {
        let counts: Vec<HashMap<String, u32>> = documents
            .iter()
            .map(|doc| {
                let mut tf: HashMap<String, u32> = HashMap::new();
                for term in config.terms(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut stats: HashMap<&str, TermStats> = HashMap::new();
        for tf in &counts {
            for (term, count) in tf {
                let entry = stats.entry(term.as_str()).or_default();
                entry.document_frequency += 1;
                entry.total_count += u64::from(*count);
            }
        }

        let mut kept: Vec<(&str, TermStats)> = stats
            .into_iter()
            .filter(|(_, s)| s.document_frequency >= config.min_df)
            .collect();

        if kept.len() > config.max_features {
            kept.sort_by(|a, b| {
                b.1.total_count
                    .cmp(&a.1.total_count)
                    .then_with(|| a.0.cmp(b.0))
            });
            kept.truncate(config.max_features);
        }
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f32;
        let terms: Vec<String> = kept.iter().map(|(t, _)| (*t).to_string()).collect();
        let idf: Vec<f32> = kept
            .iter()
            .map(|(_, s)| ((1.0 + n) / (1.0 + s.document_frequency as f32)).ln() + 1.0)
            .collect();
        let vocabulary: HashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let entries = tf
                    .iter()
                    .filter_map(|(term, count)| {
                        let index = *vocabulary.get(term.as_str())?;
                        Some((index, *count as f32 * idf[index as usize]))
                    })
                    .collect();
                SparseVector::from_entries(entries)
            })
            .collect();

        log::debug!(
            "Fitted vocabulary of {} terms over {} documents",
            terms.len(),
            documents.len()
        );

        Self {
            vocabulary,
            terms,
            idf,
            rows,
        }
    }

    /// Vocabulary size; identical for every row.
    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.rows.get(position)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Vocabulary terms in dimension order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).map(|i| *i as usize)
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Cosine similarity of row `position` against every row, in row order.
    ///
    /// Only one similarity row is materialized. Returns `None` when the
    /// position is out of range.
    pub fn similarities(&self, position: usize) -> Option<Vec<f32>> {
        let query = self.row(position)?.to_dense(self.dimensions());
        Some(self.rows.iter().map(|row| row.dot_dense(&query)).collect())
    }
}
