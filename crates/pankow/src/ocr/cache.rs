//! Process-wide reader cache with per-key construction locking.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use crate::error::{PankowError, Result};

use super::reader::{Reader, ReaderFactory, ReaderKey};

/// Maps (language set, accelerator flag) to a lazily-constructed reader.
///
/// Construction happens at most once per key: concurrent first-use of the
/// same key serializes on a per-key cell, the second caller waits and
/// reuses. A failed construction leaves the cell empty, so a later call
/// with the same key retries instead of seeing a poisoned entry.
///
/// The cache grows for the process lifetime; there is no eviction and no
/// key enumeration. It is not a general-purpose cache.
pub struct ReaderCache {
    factory: Arc<dyn ReaderFactory>,
    readers: DashMap<ReaderKey, Arc<OnceCell<Arc<dyn Reader>>>>,
}

impl ReaderCache {
    pub fn new(factory: Arc<dyn ReaderFactory>) -> Self {
        Self {
            factory,
            readers: DashMap::new(),
        }
    }

    /// Return the reader for this key, constructing it on first use.
    ///
    /// Construction runs on the blocking pool; model loading can take
    /// seconds. An empty language list never reaches the factory.
    pub async fn acquire(&self, languages: &[String], accelerate: bool) -> Result<Arc<dyn Reader>> {
        if languages.is_empty() {
            return Err(PankowError::reader_init("no languages specified"));
        }

        let key = ReaderKey::new(languages.to_vec(), accelerate);
        let cell = self
            .readers
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let reader = cell
            .get_or_try_init(|| async {
                tracing::info!(languages = ?key.languages, accelerate = key.accelerate, "constructing OCR reader");
                let factory = Arc::clone(&self.factory);
                let key = key.clone();
                tokio::task::spawn_blocking(move || factory.create(&key))
                    .await
                    .map_err(|e| PankowError::reader_init(format!("reader construction task failed: {}", e)))?
            })
            .await?;

        Ok(Arc::clone(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubReader;

    impl Reader for StubReader {
        fn read_text(&self, _image: &image::RgbImage) -> Result<Vec<crate::types::Detection>> {
            Ok(Vec::new())
        }
    }

    struct CountingFactory {
        constructions: AtomicUsize,
        fail_first: bool,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                constructions: AtomicUsize::new(0),
                fail_first: false,
            }
        }

        fn failing_once() -> Self {
            Self {
                constructions: AtomicUsize::new(0),
                fail_first: true,
            }
        }

        fn count(&self) -> usize {
            self.constructions.load(Ordering::SeqCst)
        }
    }

    impl ReaderFactory for CountingFactory {
        fn create(&self, _key: &ReaderKey) -> Result<Arc<dyn Reader>> {
            let n = self.constructions.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(PankowError::reader_init("unsupported language"));
            }
            Ok(Arc::new(StubReader))
        }
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_same_key_returns_same_handle() {
        let factory = Arc::new(CountingFactory::new());
        let cache = ReaderCache::new(factory.clone());

        let first = cache.acquire(&langs(&["es", "en"]), false).await.unwrap();
        let second = cache.acquire(&langs(&["es", "en"]), false).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_get_independent_handles() {
        let factory = Arc::new(CountingFactory::new());
        let cache = ReaderCache::new(factory.clone());

        let spanish = cache.acquire(&langs(&["es"]), false).await.unwrap();
        let english = cache.acquire(&langs(&["en"]), false).await.unwrap();
        let english_gpu = cache.acquire(&langs(&["en"]), true).await.unwrap();

        assert!(!Arc::ptr_eq(&spanish, &english));
        assert!(!Arc::ptr_eq(&english, &english_gpu));
        assert_eq!(factory.count(), 3);
    }

    #[tokio::test]
    async fn test_empty_languages_rejected_without_construction() {
        let factory = Arc::new(CountingFactory::new());
        let cache = ReaderCache::new(factory.clone());

        let err = cache.acquire(&[], false).await.unwrap_err();
        assert!(matches!(err, PankowError::ReaderInit { .. }));
        assert_eq!(factory.count(), 0);
    }

    #[tokio::test]
    async fn test_failed_construction_does_not_poison_key() {
        let factory = Arc::new(CountingFactory::failing_once());
        let cache = ReaderCache::new(factory.clone());

        let err = cache.acquire(&langs(&["xx"]), false).await.unwrap_err();
        assert!(matches!(err, PankowError::ReaderInit { .. }));

        // Same key retries construction and succeeds.
        let reader = cache.acquire(&langs(&["xx"]), false).await;
        assert!(reader.is_ok());
        assert_eq!(factory.count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_constructs_once() {
        let factory = Arc::new(CountingFactory::new());
        let cache = Arc::new(ReaderCache::new(factory.clone()));

        let (a, b) = tokio::join!(
            cache.acquire(&langs(&["es", "en"]), false),
            cache.acquire(&langs(&["es", "en"]), false),
        );

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(factory.count(), 1);
    }
}
