// Module declarations
pub mod config;
pub mod persistence;
pub mod system;
pub mod telemetry;

// Re-export all implementations
pub use config::StoreConfig;
pub use persistence::InMemoryDocumentRepository;
pub use system::{SystemClock, UuidGenerator};

use application::DocumentStore;
use std::sync::Arc;
use tracing::info;

/// Builds a `DocumentStore` over an in-memory repository, the system clock
/// and random UUID ids.
pub fn build_document_store(config: &StoreConfig) -> DocumentStore {
    let repository = Arc::new(InMemoryDocumentRepository::with_capacity(
        config.initial_capacity,
    ));
    info!(
        initial_capacity = config.initial_capacity,
        "In-memory document store initialized."
    );
    DocumentStore::new(repository, Arc::new(SystemClock), Arc::new(UuidGenerator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use domain::{Author, Document, DocumentId, SearchRequest};
    use std::sync::Mutex;

    /// A clock the test can move forward.
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn manual_store() -> (DocumentStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock(Mutex::new(start())));
        let store = DocumentStore::new(
            Arc::new(InMemoryDocumentRepository::new()),
            clock.clone(),
            Arc::new(UuidGenerator),
        );
        (store, clock)
    }

    #[tokio::test]
    async fn save_update_and_search_scenario() {
        let (store, clock) = manual_store();

        let saved = store
            .save(Document::new("A", "x", Author::new("a1", "Ann")))
            .await
            .unwrap();
        let id = saved.assigned_id().expect("generated id").clone();
        assert_eq!(saved.created(), Some(start()));

        clock.advance(Duration::minutes(5));
        let updated = store.save(saved.with_title("B")).await.unwrap();
        assert_eq!(updated.title(), "B");
        assert_eq!(updated.created(), Some(start()));

        let found = store.find_by_id(id.as_str()).await.unwrap().unwrap();
        assert_eq!(found, updated);

        let hits = store
            .search(&SearchRequest::default().with_author_ids(["a1"]))
            .await
            .unwrap();
        assert_eq!(hits, vec![updated]);
    }

    #[tokio::test]
    async fn created_window_excludes_documents_outside_range() {
        let (store, clock) = manual_store();
        let mut ids: Vec<DocumentId> = Vec::new();
        for title in ["early", "middle", "late"] {
            let saved = store
                .save(Document::new(title, "", Author::new("a1", "Ann")))
                .await
                .unwrap();
            ids.push(saved.assigned_id().unwrap().clone());
            clock.advance(Duration::hours(1));
        }

        let window = SearchRequest::default()
            .with_created_from(start() + Duration::hours(1))
            .with_created_to(start() + Duration::hours(1));
        let hits = store.search(&window).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title(), "middle");
        assert_eq!(hits[0].assigned_id(), Some(&ids[1]));
    }

    #[tokio::test]
    async fn built_store_generates_distinct_ids_near_now() {
        let store = build_document_store(&StoreConfig {
            initial_capacity: 16,
        });
        let before = Utc::now();

        let first = store
            .save(Document::new("one", "", Author::new("a1", "Ann")))
            .await
            .unwrap();
        let second = store
            .save(Document::new("two", "", Author::new("a1", "Ann")).with_id(""))
            .await
            .unwrap();

        let after = Utc::now();
        assert_ne!(first.assigned_id(), second.assigned_id());
        for doc in [&first, &second] {
            let created = doc.created().expect("stamped");
            assert!(created >= before && created <= after);
        }
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.find_by_id("never-saved").await.unwrap().is_none());
    }
}
