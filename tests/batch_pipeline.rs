//! End-to-end: hosted classifier -> batch -> wardrobe store.

use std::collections::HashSet;
use std::time::Duration;

use mockito::Matcher;
use wardrobe_lib::commands::classifier::store_successes;
use wardrobe_lib::services::db::Database;
use wardrobe_lib::services::wardrobe_service::WardrobeStore;
use wardrobe_lib::{BatchClassifier, ClothingCategory, ImageRef, ProgressSnapshot, RemoteClassifier};

// base64 of "GOOD", "BAD!" and "NICE"
const GOOD: &str = "data:image/jpeg;base64,R09PRA==";
const BAD: &str = "data:image/jpeg;base64,QkFEIQ==";
const NICE: &str = "data:image/jpeg;base64,TklDRQ==";

#[tokio::test]
async fn mixed_batch_stores_only_successes() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("POST", "/classify")
        .match_body(Matcher::Regex("R09PRA==|TklDRQ==".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":{"category":"top","label":"Linen shirt","color":"white"}}"#)
        .expect(2)
        .create_async()
        .await;
    let failing = server
        .mock("POST", "/classify")
        .match_body(Matcher::Regex("QkFEIQ==".to_string()))
        .with_status(500)
        .with_body("model error")
        .expect(1)
        .create_async()
        .await;

    let classifier = RemoteClassifier::new(format!("{}/classify", server.url()), Duration::from_secs(5))
        .expect("client");
    let images = vec![ImageRef::new(GOOD), ImageRef::new(BAD), ImageRef::new(NICE)];
    let mut snapshots: Vec<ProgressSnapshot> = Vec::new();

    let outcome = BatchClassifier::new()
        .classify_batch(images, &classifier, |s| snapshots.push(s))
        .await;

    ok.assert_async().await;
    failing.assert_async().await;

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.succeeded_count, 2);
    assert_eq!(outcome.failed, vec![ImageRef::new(BAD)]);
    let succeeded: HashSet<_> = outcome.succeeded.iter().map(|r| r.source_ref.clone()).collect();
    assert_eq!(succeeded, [ImageRef::new(GOOD), ImageRef::new(NICE)].into_iter().collect());

    assert_eq!(snapshots.len(), 3);
    assert!(snapshots.last().expect("progress").is_complete());

    let store = WardrobeStore::new(Database::in_memory().expect("db"));
    assert_eq!(store_successes(&store, &outcome).expect("store"), 2);
    let tops = store.items_by_category(ClothingCategory::Top).expect("items");
    assert_eq!(tops.len(), 2);
    assert!(tops.iter().all(|i| i.label == "Linen shirt"));
}

#[tokio::test]
async fn unreachable_endpoint_fails_every_image_without_aborting() {
    // Port 9 (discard) is not expected to be listening.
    let classifier = RemoteClassifier::new("http://127.0.0.1:9/classify", Duration::from_secs(2))
        .expect("client");
    let images = vec![ImageRef::new(GOOD), ImageRef::new(NICE)];

    let outcome = BatchClassifier::new()
        .classify_batch(images, &classifier, |_| {})
        .await;

    assert!(outcome.succeeded.is_empty());
    assert_eq!(outcome.failed_count, 2);
    assert_eq!(outcome.succeeded_count + outcome.failed_count, outcome.total);
}
