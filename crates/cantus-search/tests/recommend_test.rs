//! End-to-end tests: dataset file → similarity index → recommendations.

use std::io::Write;

use cantus_search::{build_similarity_model, recommend, IndexHandle, VectorizerConfig};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn permissive() -> VectorizerConfig {
    VectorizerConfig::default().with_min_df(1)
}

const DATASET: &str = "song,artist,text\n\
    A,X,love love love\n\
    B,Y,love love hate\n\
    C,Z,car engine speed\n";

/// Test the basic ranking on a file-backed corpus
#[test]
fn test_shared_words_rank_higher() {
    let file = write_csv(DATASET);
    let index = build_similarity_model(file.path(), &permissive()).unwrap();

    assert_eq!(recommend("A", &index, 2), vec!["B", "C"]);
}

/// Test that a song absent from the corpus yields nothing
#[test]
fn test_unknown_song() {
    let file = write_csv(DATASET);
    let index = build_similarity_model(file.path(), &VectorizerConfig::default()).unwrap();

    assert!(recommend("NoSuchSong123", &index, 5).is_empty());
}

/// Test the vector space shape under the default policy
#[test]
fn test_dimensions_bounded_and_rows_aligned() {
    let mut csv = String::from("song,artist,text\n");
    for i in 0..40 {
        csv.push_str(&format!(
            "Song {i},Artist {},\"baby baby heart night {} dance {}\"\n",
            i % 3,
            ["fire", "rain", "summer", "stars"][i % 4],
            ["forever", "tonight"][i % 2]
        ));
    }
    let file = write_csv(&csv);

    let index = build_similarity_model(file.path(), &VectorizerConfig::default()).unwrap();
    let vectors = index.vectors();

    assert_eq!(vectors.row_count(), 40);
    assert!(vectors.dimensions() > 0);
    assert!(vectors.dimensions() <= 15_000);
    assert!(vectors.terms().iter().any(|t| t == "baby heart"));
    assert!(vectors.term_index("fire").is_none(), "stop word indexed");

    for title in ["Song 0", "Song 7", "Song 39"] {
        let position = index.find_position(title).unwrap();
        let result = index.recommend_detailed(title, 5);
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|r| r.position != position));
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

/// Test that construction errors propagate from the file layer
#[test]
fn test_construction_errors() {
    let file = write_csv("song,text\nA,words\n");
    let err = build_similarity_model(file.path(), &permissive()).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("artist"));

    let missing = std::path::Path::new("/nonexistent/cantus/lyrics.csv");
    let err = build_similarity_model(missing, &permissive()).unwrap_err();
    assert!(err.is_data_source());
}

/// Test a rebuild swapped in behind a handle
#[test]
fn test_rebuild_and_swap() {
    let first = write_csv(DATASET);
    let handle = IndexHandle::new(build_similarity_model(first.path(), &permissive()).unwrap());
    let before = handle.current();

    let second = write_csv("song,artist,text\nD,X,river river\nE,Y,river stone\n");
    handle.replace(build_similarity_model(second.path(), &permissive()).unwrap());

    assert_eq!(recommend("A", &before, 2), vec!["B", "C"]);
    assert_eq!(recommend("D", &handle.current(), 5), vec!["E"]);
    assert!(recommend("A", &handle.current(), 5).is_empty());
}
