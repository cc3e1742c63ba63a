//! Shared, swappable access to a built index.

use std::sync::{Arc, PoisonError, RwLock};

use crate::index::SimilarityIndex;

/// Holds the current [`SimilarityIndex`] for an application.
///
/// Readers take an `Arc` snapshot and query it without holding any lock.
/// A rebuild constructs the new index completely and then swaps it in, so
/// a partially built index is never visible and in-flight queries keep the
/// snapshot they started with.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<SimilarityIndex>>,
}

impl IndexHandle {
    pub fn new(index: SimilarityIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Snapshot of the index in effect right now.
    pub fn current(&self) -> Arc<SimilarityIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the index, returning the previous one.
    pub fn replace(&self, index: SimilarityIndex) -> Arc<SimilarityIndex> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VectorizerConfig;
    use cantus_core::{Corpus, SongRecord};

    fn build(rows: &[(&str, &str)]) -> SimilarityIndex {
        let corpus = Corpus::from_records(
            rows.iter()
                .map(|(song, text)| SongRecord::new(*song, "Artist", *text))
                .collect(),
        );
        SimilarityIndex::build(corpus, &VectorizerConfig::default().with_min_df(1))
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_index_is_thread_safe() {
        assert_send_sync::<SimilarityIndex>();
        assert_send_sync::<IndexHandle>();
    }

    #[test]
    fn test_concurrent_queries_agree() {
        let handle = IndexHandle::new(build(&[
            ("A", "love love love"),
            ("B", "love love hate"),
            ("C", "car engine speed"),
        ]));
        let expected = handle.current().recommend("A", 2);

        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| handle.current().recommend("A", 2)))
                .collect();
            for worker in workers {
                assert_eq!(worker.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_replace_swaps_whole_index() {
        let handle = IndexHandle::new(build(&[("A", "rain"), ("B", "rain")]));
        let snapshot = handle.current();

        let previous = handle.replace(build(&[("C", "snow"), ("D", "snow"), ("E", "hail")]));

        assert!(Arc::ptr_eq(&previous, &snapshot));
        assert_eq!(snapshot.recommend("A", 5), vec!["B"]);
        assert_eq!(handle.current().len(), 3);
        assert!(handle.current().recommend("A", 5).is_empty());
        assert_eq!(handle.current().recommend("C", 1), vec!["D"]);
    }
}
