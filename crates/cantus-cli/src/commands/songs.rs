use anyhow::{Context, Result};
use cantus_core::{Corpus, SongRecord};
use cantus_enrich::Config;

/// List titles in dataset order, optionally filtered.
pub fn list_songs(config: &Config, filter: Option<&str>) -> Result<()> {
    let corpus = Corpus::from_csv_path(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path.display()))?;

    let needle = filter.map(str::to_lowercase);
    let mut shown = 0;
    for song in corpus
        .iter()
        .filter(|song| needle.as_deref().map_or(true, |n| matches(song, n)))
    {
        println!("{}\t{}", song.song_title(), song.artist());
        shown += 1;
    }

    log::info!("{} of {} songs listed", shown, corpus.len());
    Ok(())
}

fn matches(song: &SongRecord, needle: &str) -> bool {
    song.song_title().to_lowercase().contains(needle)
        || song.artist().to_lowercase().contains(needle)
}
