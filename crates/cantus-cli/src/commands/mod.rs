pub mod config;
pub mod recommend;
pub mod songs;
pub mod status;

use anyhow::{Context, Result};
use cantus_enrich::Config;
use cantus_search::SimilarityIndex;

pub use recommend::run_recommend;
pub use songs::list_songs;
pub use status::show_status;

/// Load the configured dataset and build its index.
pub fn load_index(config: &Config) -> Result<SimilarityIndex> {
    log::info!("Loading dataset from {}", config.dataset_path.display());
    cantus_search::build_similarity_model(&config.dataset_path, &config.vectorizer())
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path.display()))
}
