//! Lyric similarity search for cantus.
//!
//! Fits a TF-IDF term space over a song corpus and answers "which songs
//! read most like this one" by scoring one query row against the whole
//! corpus on demand, without ever storing a pairwise similarity matrix.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod handle;
pub mod index;
mod stop_words;
pub mod vectorizer;

pub use handle::IndexHandle;
pub use index::{build_similarity_model, recommend, Recommendation, SimilarityIndex, DEFAULT_TOP_N};
pub use stop_words::is_stop_word;
pub use vectorizer::{SparseVector, TermVectorSpace, VectorizerConfig};
