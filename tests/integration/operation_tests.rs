//! Full-loop tests against scripted and in-memory collaborators

use std::sync::Arc;

use async_trait::async_trait;
use pagebatch::{
    ApiError, BackoffConfig, BulkError, CollectionApi, CursorToken, OperationConfig, PageItem,
    PageRequest, PaginatedBulkOperation, ResponsePage, UnprocessedSet,
};
use serde_json::json;
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;

use crate::common::collaborators::{InMemoryStore, ScriptedApi};
use crate::common::fixtures::{forum_thread_write_batch, get_batch};
use crate::common::init_tracing;

fn fast_config() -> OperationConfig {
    OperationConfig {
        max_rounds: 32,
        backoff: BackoffConfig {
            initial_delay_ms: 1,
            max_delay_ms: 5,
            multiplier: 2.0,
            jitter: false,
        },
    }
}

fn operation<A: CollectionApi>(api: Arc<A>) -> PaginatedBulkOperation<A> {
    PaginatedBulkOperation::new(api, fast_config()).unwrap()
}

// ==================== Completeness ====================

/// Every requested key present in the store appears in the result, no matter
/// how many capacity-limited rounds it takes
#[tokio::test]
async fn test_throttled_gets_return_every_present_key() {
    init_tracing();
    let store = Arc::new(InMemoryStore::with_capacity_per_round(2));
    for key in ["a", "b", "c", "d"] {
        store.seed("Music", key, json!({"track": key}));
    }

    // "e" was never written; the store drops it silently
    let batch = get_batch("Music", &["a", "b", "c", "d", "e"]);
    let result = operation(Arc::clone(&store)).execute(batch).await.unwrap();

    let mut keys: Vec<_> = result.items().iter().map(|i| i.key.clone()).collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b", "c", "d"]);
    // 5 items at 2 per round
    assert_eq!(store.calls(), 3);
    assert_eq!(result.rounds(), 3);
}

#[tokio::test]
async fn test_unlimited_store_completes_in_one_round() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("Music", "a", json!(1));

    let result = assert_ok!(
        operation(Arc::clone(&store))
            .execute(get_batch("Music", &["a"]))
            .await
    );

    assert_eq!(result.rounds(), 1);
    assert_eq!(store.calls(), 1);
    assert_eq!(result.items()[0].body, Some(json!(1)));
}

// ==================== Order Preservation ====================

fn three_page_script() -> Vec<Result<ResponsePage, String>> {
    vec![
        Ok(ResponsePage::new(vec![
            PageItem::new("Jobs", "j1", None),
            PageItem::new("Jobs", "j2", None),
        ])
        .with_cursor(CursorToken::new("p2"))),
        Ok(ResponsePage::new(vec![PageItem::new("Jobs", "j3", None)])
            .with_cursor(CursorToken::new("p3"))),
        Ok(ResponsePage::new(vec![
            PageItem::new("Jobs", "j4", None),
            PageItem::new("Jobs", "j5", None),
        ])),
    ]
}

/// Concatenation order equals page arrival order, deterministically
#[tokio::test]
async fn test_pages_concatenate_in_arrival_order() {
    for _ in 0..2 {
        let api = Arc::new(ScriptedApi::new(three_page_script()));
        let result = operation(Arc::clone(&api))
            .execute(get_batch("Jobs", &["list"]))
            .await
            .unwrap();

        let keys: Vec<_> = result.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["j1", "j2", "j3", "j4", "j5"]);
        assert_eq!(api.calls(), 3);
    }
}

// ==================== Idempotent Delete / Worked Scenario ====================

/// Two puts and a delete of a nonexistent key: two acknowledgements, no
/// unprocessed entry, no error, one round-trip
#[tokio::test]
async fn test_delete_of_missing_key_is_silent_noop() {
    let store = Arc::new(InMemoryStore::new());

    let result = operation(Arc::clone(&store))
        .execute(forum_thread_write_batch())
        .await
        .unwrap();

    assert_eq!(result.rounds(), 1);
    assert_eq!(result.len(), 2);
    let keys: Vec<_> = result.items().iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["forum-1", "thread-1"]);

    assert!(store.contains("Forum", "forum-1"));
    assert!(store.contains("Thread", "thread-1"));
    assert!(!store.contains("Thread", "thread-missing"));
}

// ==================== Retry Until Clear ====================

/// Non-empty unprocessed sets on the first two responses force exactly three
/// round-trips, aggregating items from all three
#[tokio::test]
async fn test_unprocessed_sets_clear_after_three_rounds() {
    let throttled = |items: Vec<PageItem>, pending_key: &str| {
        let mut unprocessed = UnprocessedSet::new();
        unprocessed.insert(pagebatch::CollectionRequest::new(
            "Forum",
            vec![pagebatch::BatchItem::get(pending_key)],
        ));
        Ok(ResponsePage::new(items).with_unprocessed(unprocessed))
    };

    let api = Arc::new(ScriptedApi::new(vec![
        throttled(vec![PageItem::new("Forum", "f1", None)], "f2"),
        throttled(vec![PageItem::new("Forum", "f2", None)], "f3"),
        Ok(ResponsePage::new(vec![PageItem::new("Forum", "f3", None)])),
    ]));

    let result = operation(Arc::clone(&api))
        .execute(get_batch("Forum", &["f1", "f2", "f3"]))
        .await
        .unwrap();

    assert_eq!(api.calls(), 3);
    assert_eq!(result.rounds(), 3);
    let keys: Vec<_> = result.items().iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["f1", "f2", "f3"]);
}

// ==================== Hard Errors ====================

#[tokio::test]
async fn test_mid_pagination_error_discards_gathered_pages() {
    let api = Arc::new(ScriptedApi::new(vec![
        Ok(ResponsePage::new(vec![PageItem::new("Jobs", "j1", None)])
            .with_cursor(CursorToken::new("p2"))),
        Err("internal server error".to_string()),
    ]));

    let err = operation(Arc::clone(&api))
        .execute(get_batch("Jobs", &["list"]))
        .await
        .unwrap_err();

    assert_eq!(api.calls(), 2);
    match err {
        BulkError::Transport { rounds, message, .. } => {
            assert_eq!(rounds, 1);
            assert!(message.contains("internal server error"));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

// ==================== Cancellation ====================

/// Cancels its own token while answering the first round
struct CancelDuringFirstRound {
    token: CancellationToken,
}

#[async_trait]
impl CollectionApi for CancelDuringFirstRound {
    async fn submit(&self, _request: &PageRequest) -> Result<ResponsePage, ApiError> {
        self.token.cancel();
        Ok(ResponsePage::new(vec![PageItem::new("Jobs", "j1", None)])
            .with_cursor(CursorToken::new("p2")))
    }
}

#[tokio::test]
async fn test_cancellation_observed_between_rounds() {
    let token = CancellationToken::new();
    let api = Arc::new(CancelDuringFirstRound {
        token: token.clone(),
    });

    let op = PaginatedBulkOperation::new(api, fast_config())
        .unwrap()
        .with_cancellation(token);
    let err = op.execute(get_batch("Jobs", &["list"])).await.unwrap_err();

    // The in-flight round finished; its items were discarded with the rest
    assert!(matches!(err, BulkError::Cancelled { rounds: 1 }));
}

// ==================== Round Budget ====================

#[tokio::test]
async fn test_always_throttling_store_exhausts_round_budget() {
    // Capacity 0 means nothing ever completes
    let store = Arc::new(InMemoryStore::with_capacity_per_round(0));

    let config = OperationConfig {
        max_rounds: 4,
        ..fast_config()
    };
    let op = PaginatedBulkOperation::new(Arc::clone(&store), config).unwrap();
    let err = op.execute(get_batch("Music", &["a", "b"])).await.unwrap_err();

    assert_eq!(store.calls(), 4);
    match err {
        BulkError::RetriesExhausted { rounds, pending } => {
            assert_eq!(rounds, 4);
            assert_eq!(pending, 2);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
