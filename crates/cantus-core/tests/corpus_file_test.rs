//! Integration tests for loading a corpus from a file on disk.

use std::io::Write;

use cantus_core::{Corpus, Error};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Test that extra columns survive loading untouched
#[test]
fn test_extra_columns_pass_through() {
    let file = write_csv(
        "artist,song,link,text\n\
         ABBA,Ahe's My Kind Of Girl,/a/abba/ahes+my+kind+of+girl_20598417.html,\"Look at her face, it's a wonderful face\"\n\
         ABBA,\"Andante, Andante\",/a/abba/andante+andante_20002708.html,\"Take it easy with me, please\"\n",
    );

    let corpus = Corpus::from_csv_path(file.path()).expect("Failed to load corpus");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.extra_columns(), ["link"]);
    assert_eq!(
        corpus.extra_value(0, "link"),
        Some("/a/abba/ahes+my+kind+of+girl_20598417.html")
    );
    assert_eq!(corpus.get(1).unwrap().song_title(), "Andante, Andante");
    assert_eq!(
        corpus.get(1).unwrap().normalized_text(),
        "take it easy with me please"
    );
}

/// Test that every missing column is named in one error
#[test]
fn test_schema_error_names_missing_columns() {
    let file = write_csv("song,lyrics\nAngel,la la\n");

    let err = Corpus::from_csv_path(file.path()).unwrap_err();

    match err {
        Error::Schema { missing } => assert_eq!(missing, vec!["artist", "text"]),
        other => panic!("expected schema error, got {other:?}"),
    }
}

/// Test that malformed quoting surfaces as a data-source error
#[test]
fn test_malformed_rows_fail_the_load() {
    let file = write_csv("song,artist,text\nAngel,ABBA,ok\nBroken,ABBA\n");

    let err = Corpus::from_csv_path(file.path()).unwrap_err();

    assert!(err.is_data_source());
}
