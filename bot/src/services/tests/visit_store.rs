//! Tests for the VisitStore implementations

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{ApiFailure, VisitRecord};
use crate::services::visit_store::{FirebaseVisitStore, InMemoryVisitStore};
use crate::traits::VisitStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn firebase(server: &MockServer) -> FirebaseVisitStore {
    FirebaseVisitStore::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_seeded_store_history() {
    let store = InMemoryVisitStore::seeded();

    let visits = store.fetch_all_visits().await.unwrap();
    assert_eq!(visits.len(), 5);
    assert_eq!(visits[0], VisitRecord::new("Wendys", "Mike", date(2019, 3, 15)));

    let members = store.fetch_members().await.unwrap();
    assert_eq!(members, vec!["Mike", "Trey", "Anthony"]);

    let last = store.fetch_last_visit().await.unwrap().unwrap();
    assert_eq!(last.location, "Pizza Hut");
    assert_eq!(last.picked_by, "Trey");
}

#[tokio::test]
async fn test_last_visit_is_latest_by_date() {
    let store = InMemoryVisitStore::new(
        vec![
            VisitRecord::new("Taco Bell", "Mike", date(2019, 6, 21)),
            VisitRecord::new("Wendys", "Mike", date(2019, 3, 15)),
        ],
        vec!["Mike".to_string()],
    );

    let last = store.fetch_last_visit().await.unwrap().unwrap();
    assert_eq!(last.location, "Taco Bell");
}

#[tokio::test]
async fn test_empty_store_has_no_last_visit() {
    let store = InMemoryVisitStore::default();
    assert_eq!(store.fetch_last_visit().await.unwrap(), None);
}

#[tokio::test]
async fn test_firebase_reads_visits_and_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Restaurants/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Location": "Wendys", "PickedBy": "Mike", "Date": "2019-03-15T00:00:00"},
            null,
            {"Location": "Burger King", "PickedBy": "Trey", "Date": "2019-04-19"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Members/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Mike", "Trey", "Anthony"])))
        .expect(1)
        .mount(&server)
        .await;

    let store = firebase(&server).await;
    let visits = store.fetch_all_visits().await.unwrap();
    assert_eq!(
        visits,
        vec![
            VisitRecord::new("Wendys", "Mike", date(2019, 3, 15)),
            VisitRecord::new("Burger King", "Trey", date(2019, 4, 19)),
        ]
    );

    let members = store.fetch_members().await.unwrap();
    assert_eq!(members, vec!["Mike", "Trey", "Anthony"]);
}

#[tokio::test]
async fn test_firebase_missing_node_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Restaurants/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let store = firebase(&server).await;
    assert!(store.fetch_all_visits().await.unwrap().is_empty());
    assert_eq!(store.fetch_last_visit().await.unwrap(), None);
}

#[tokio::test]
async fn test_firebase_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Members/.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Restaurants/.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = firebase(&server).await;
    assert_eq!(store.fetch_members().await, Err(ApiFailure::AuthenticationFailed));
    assert_eq!(store.fetch_all_visits().await, Err(ApiFailure::ServiceUnavailable));
}

#[tokio::test]
async fn test_firebase_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Restaurants/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"Location": "Wendys"}])))
        .mount(&server)
        .await;

    let store = firebase(&server).await;
    assert!(matches!(store.fetch_all_visits().await, Err(ApiFailure::InvalidResponse(_))));
}

#[tokio::test]
async fn test_firebase_unreachable() {
    // nothing listens on the discard port
    let store = FirebaseVisitStore::new("http://127.0.0.1:9/", Duration::from_secs(1)).unwrap();
    assert!(matches!(store.fetch_members().await, Err(ApiFailure::NetworkError(_))));
}

#[test]
fn test_firebase_rejects_bad_endpoint() {
    let result = FirebaseVisitStore::new("lunch database", Duration::from_secs(1));
    assert!(matches!(result, Err(ApiFailure::NotConfigured(_))));
}
