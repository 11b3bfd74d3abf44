//! Operation catalog behaviour against in-memory ports.

mod support;

use std::sync::Arc;

use byt_core::ports::StoreExt;
use byt_core::OperationCatalog;
use byt_domain::constants::OPERATIONS_KEY;
use byt_domain::{BytError, FoaasOperation};
use support::fixtures::{self, BASE_URL};
use support::mocks::{MemoryStore, MockFoaasApi};

fn catalog(api: &MockFoaasApi, store: &MemoryStore) -> OperationCatalog {
    OperationCatalog::new(Arc::new(api.clone()), Arc::new(store.clone()), BASE_URL)
}

#[tokio::test]
async fn fetches_sorts_and_persists_on_first_use() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let store = MemoryStore::new();
    let catalog = catalog(&api, &store);

    let ops = catalog.operations().await;
    let names: Vec<&str> = ops.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, ["Ballmer", "Busy", "Version"]);

    let stored: Vec<FoaasOperation> = store.load_json(OPERATIONS_KEY).await.unwrap().unwrap();
    assert_eq!(stored, ops);

    // Second call is served from memory.
    catalog.operations().await;
    assert_eq!(api.operation_calls(), 1);
}

#[tokio::test]
async fn concurrent_first_calls_fetch_once() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let store = MemoryStore::new();
    let catalog = catalog(&api, &store);

    let (first, second, third) =
        tokio::join!(catalog.operations(), catalog.operations(), catalog.operations());

    assert_eq!(first.len(), 3);
    assert_eq!(second, first);
    assert_eq!(third, first);
    assert_eq!(api.operation_calls(), 1);
}

#[tokio::test]
async fn prefers_stored_operations_over_network() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let store = MemoryStore::new();
    let stored = vec![fixtures::operation("Off", "/off/:name/:from", &[])];
    store.save_json(OPERATIONS_KEY, &stored).await.unwrap();

    let ops = catalog(&api, &store).operations().await;

    assert_eq!(ops, stored);
    assert_eq!(api.operation_calls(), 0);
}

#[tokio::test]
async fn fetch_failure_yields_empty_list() {
    let api = MockFoaasApi::offline();
    let store = MemoryStore::new();

    assert!(catalog(&api, &store).operations().await.is_empty());
    assert!(store.raw(OPERATIONS_KEY).is_none());
}

#[tokio::test]
async fn corrupt_storage_falls_back_to_network() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let store = MemoryStore::new();
    store.insert_raw(OPERATIONS_KEY, b"not json");

    let ops = catalog(&api, &store).operations().await;

    assert_eq!(ops.len(), 3);
    assert_eq!(api.operation_calls(), 1);
}

#[tokio::test]
async fn delete_stored_forces_refetch() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let store = MemoryStore::new();
    let catalog = catalog(&api, &store);

    catalog.operations().await;
    catalog.delete_stored().await.unwrap();
    assert!(catalog.load().await.unwrap().is_none());

    catalog.operations().await;
    assert_eq!(api.operation_calls(), 2);
}

#[tokio::test]
async fn builder_for_matches_name_or_shortname() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let catalog = catalog(&api, &MemoryStore::new());

    let by_short = catalog.builder_for("bus").await.unwrap();
    assert_eq!(by_short.build(), format!("{BASE_URL}/bus/Name/From"));

    let by_name = catalog.builder_for("ballmer").await.unwrap();
    assert_eq!(by_name.index_of("company"), Some(1));

    let missing = catalog.builder_for("nope").await.unwrap_err();
    assert!(matches!(missing, BytError::NotFound(_)));
}

#[tokio::test]
async fn message_is_memoised_per_url() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let catalog = catalog(&api, &MemoryStore::new());
    let mut builder = catalog.builder_for("bus").await.unwrap();
    builder.update("name", "Chuck Norris");

    let first = catalog.message(&builder).await.unwrap();
    let second = catalog.message(&builder).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.message, "message for /bus/Chuck%20Norris/From");
    assert_eq!(api.message_calls(), 1);
    assert_eq!(catalog.cached_messages(), 1);

    builder.update("from", "Louis");
    catalog.message(&builder).await.unwrap();
    assert_eq!(api.message_calls(), 2);
}

#[tokio::test]
async fn invalid_builder_is_rejected_without_a_request() {
    let api = MockFoaasApi::new(vec![fixtures::operation("Bus", "/bus/:name/:from", &[(
        "Name", "name",
    )])]);
    let catalog = catalog(&api, &MemoryStore::new());
    let builder = catalog.builder_for("Bus").await.unwrap();

    let err = catalog.message(&builder).await.unwrap_err();

    assert!(matches!(err, BytError::InvalidInput(ref msg) if msg.contains("from")));
    assert_eq!(api.message_calls(), 0);
}

#[tokio::test]
async fn memory_pressure_drops_cached_messages() {
    let api = MockFoaasApi::new(fixtures::catalog());
    let catalog = catalog(&api, &MemoryStore::new()).with_message_cache(4, true);
    let builder = catalog.builder_for("bus").await.unwrap();
    catalog.message(&builder).await.unwrap();

    assert!(catalog.handle_memory_pressure());
    assert_eq!(catalog.cached_messages(), 0);
}

#[tokio::test]
async fn message_of_the_day_hits_mod_path() {
    let api = MockFoaasApi::new(Vec::new());
    let catalog = catalog(&api, &MemoryStore::new());

    catalog.message_of_the_day().await.unwrap();

    assert_eq!(api.requested(), ["/mod".to_string()]);
}
