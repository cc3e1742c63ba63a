use anyhow::Result;
use cantus_enrich::{Config, CoverArtResolver};
use cantus_search::Recommendation;
use serde::Serialize;

use super::load_index;

#[derive(Debug, Serialize)]
struct RecommendationView {
    #[serde(flatten)]
    recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_url: Option<String>,
}

pub async fn run_recommend(
    config: &Config,
    song: &str,
    top_n: usize,
    covers: bool,
    json: bool,
) -> Result<()> {
    let index = load_index(config)?;

    if index.find_position(song).is_none() && !json {
        println!("No song titled \"{}\" in the dataset.", song);
        println!("\nRun `cantus songs <filter>` to search available titles.");
        return Ok(());
    }

    let resolver = if covers {
        Some(CoverArtResolver::from_config(config)?)
    } else {
        None
    };

    let mut views = Vec::new();
    for recommendation in index.recommend_detailed(song, top_n) {
        let cover_url = match &resolver {
            Some(resolver) => Some(
                resolver
                    .resolve(&recommendation.title, &recommendation.artist)
                    .await,
            ),
            None => None,
        };
        views.push(RecommendationView {
            recommendation,
            cover_url,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if views.is_empty() {
        println!("No other songs to recommend.");
        return Ok(());
    }

    println!("\n🎵 Songs like \"{}\"\n", song);
    for (rank, view) in views.iter().enumerate() {
        let r = &view.recommendation;
        println!("  {}. {} — {}  ({:.3})", rank + 1, r.title, r.artist, r.score);
        if let Some(url) = &view.cover_url {
            println!("     cover: {}", url);
        }
    }

    Ok(())
}
