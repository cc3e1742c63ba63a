//! Configuration and external enrichment for cantus.
//!
//! Loads layered configuration and resolves album cover art for songs
//! through a pluggable [`CoverArtLookup`], falling back to a placeholder
//! image whenever no cover can be found.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod covers;
pub mod error;
pub mod resilience;

pub use config::Config;
pub use covers::{CoverArtLookup, CoverArtResolver, PlaceholderLookup, SpotifyClient};
pub use error::{EnrichError, EnrichResult};
