use anyhow::Result;
use cantus_enrich::Config;
use std::time::Instant;

use super::load_index;

pub fn show_status(config: &Config) -> Result<()> {
    let started = Instant::now();
    let index = load_index(config)?;
    let elapsed = started.elapsed();

    let vectors = index.vectors();
    let stored: usize = vectors.rows().iter().map(|row| row.nnz()).sum();
    let empty = vectors.rows().iter().filter(|row| row.is_zero()).count();

    println!("\n📊 Cantus Status\n");
    println!("  Dataset: {}", config.dataset_path.display());
    println!("  Songs: {}", index.len());
    println!(
        "  Vocabulary: {} terms (min_df {}, max {})",
        vectors.dimensions(),
        config.min_df,
        config.max_features
    );
    println!("  Stored weights: {}", stored);
    println!("  Load + index time: {:.2?}", elapsed);

    if empty > 0 {
        println!(
            "\n  {} songs share no indexed terms with others and always score 0",
            empty
        );
    }

    Ok(())
}
