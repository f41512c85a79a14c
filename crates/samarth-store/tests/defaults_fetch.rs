//! Integration tests for `DefaultsFetcher` and `ProductStore::load_working_list`.
//!
//! Uses `wiremock` for the URL source and `tempfile` for file sources and
//! file-backed storage, so no real network or shared disk state is touched.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use samarth_core::app_config::DefaultsSource;
use samarth_store::{DefaultsFetcher, FileStorage, KeyValueStorage, ProductStore, StoreError};

const KEY: &str = "samarth-overseas-products";

fn url_fetcher(server: &MockServer) -> DefaultsFetcher {
    DefaultsFetcher::new(
        DefaultsSource::Url(format!("{}/data/products.json", server.uri())),
        5,
        "samarth-test/0.1",
    )
    .expect("failed to build test DefaultsFetcher")
}

async fn received(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

fn defaults_json() -> serde_json::Value {
    json!([
        {
            "id": "1121-basmati",
            "name": "1121 Basmati Rice",
            "category": "Rice",
            "subcategory": "Basmati",
            "image": "/images/products/1121-basmati.webp",
            "tags": ["long grain", "aged"]
        },
        {
            "name": "Dehydrated Garlic Flakes",
            "category": "Spices",
            "tags": "dehydrated, flakes"
        }
    ])
}

// ---------------------------------------------------------------------------
// URL source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn url_source_is_parsed_and_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(defaults_json()))
        .expect(1)
        .mount(&server)
        .await;

    let products = url_fetcher(&server).try_fetch().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].id, "dehydrated-garlic-flakes");
    assert_eq!(products[1].tag_list(), ["dehydrated", "flakes"]);
}

#[tokio::test]
async fn non_success_status_is_an_error_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let fetcher = url_fetcher(&server);
    let err = fetcher.try_fetch().await.unwrap_err();
    assert!(
        matches!(err, StoreError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
    assert_eq!(received(&server).await, 1, "try_fetch makes a single attempt");

    assert!(fetcher.fetch().await.is_empty());
    assert_eq!(received(&server).await, 2, "fetch makes a single attempt");
}

#[tokio::test]
async fn non_json_body_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let fetcher = url_fetcher(&server);
    assert!(matches!(
        fetcher.try_fetch().await,
        Err(StoreError::Catalog { .. })
    ));
    assert!(fetcher.fetch().await.is_empty());
}

#[tokio::test]
async fn invalid_product_list_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    assert!(url_fetcher(&server).fetch().await.is_empty());
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_source_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("products.json");
    std::fs::write(&file, defaults_json().to_string()).unwrap();

    let fetcher = DefaultsFetcher::new(DefaultsSource::File(file), 5, "samarth-test/0.1").unwrap();
    assert_eq!(fetcher.fetch().await.len(), 2);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = DefaultsFetcher::new(
        DefaultsSource::File(dir.path().join("missing.json")),
        5,
        "samarth-test/0.1",
    )
    .unwrap();
    assert!(matches!(
        fetcher.try_fetch().await,
        Err(StoreError::Io { .. })
    ));
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn working_list_reconciles_persisted_edits_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(defaults_json()))
        .mount(&server)
        .await;

    let state = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(state.path());
    storage
        .set(
            KEY,
            &json!([
                {"id": "1121-basmati", "name": "1121 Basmati (Export Grade)", "image": "/images/old.png"},
                {"id": "makhana", "name": "Makhana"}
            ])
            .to_string(),
        )
        .unwrap();

    let store = ProductStore::new(Arc::new(storage), KEY, url_fetcher(&server));
    let list = store.load_working_list().await;

    let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1121-basmati", "makhana", "dehydrated-garlic-flakes"]);
    assert_eq!(list[0].name, "1121 Basmati (Export Grade)");
    assert_eq!(list[0].category.as_deref(), Some("Rice"));
    assert_eq!(
        list[0].image.as_deref(),
        Some("/images/products/1121-basmati.webp")
    );
}

#[tokio::test]
async fn save_writes_pretty_json_under_the_storage_key() {
    let state = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(state.path().join("nested"));
    let file = storage.path_for(KEY);
    let fetcher = DefaultsFetcher::new(
        DefaultsSource::File(state.path().join("none.json")),
        5,
        "samarth-test/0.1",
    )
    .unwrap();
    let store = ProductStore::new(Arc::new(storage), KEY, fetcher);

    let products = store.load_working_list().await;
    assert!(products.is_empty());

    let item = samarth_core::Product {
        id: "garlic".into(),
        name: "Garlic".into(),
        ..samarth_core::Product::default()
    };
    store.save(std::slice::from_ref(&item)).unwrap();

    let written = std::fs::read_to_string(file).unwrap();
    assert!(written.starts_with("[\n"));
    assert_eq!(store.load_persisted(), Some(vec![item]));
}
