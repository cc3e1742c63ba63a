//! Core domain model for cantus.
//!
//! This crate defines the song corpus (records kept in source order and
//! identified by row position), the lyric text normalizer, and loading
//! of the corpus from delimited files.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod corpus;
pub mod error;
pub mod normalize;
pub mod song;

pub use corpus::{Corpus, REQUIRED_COLUMNS};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use song::SongRecord;
