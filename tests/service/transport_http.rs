//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use docstore::service::http;
use docstore::{DocumentService, InMemoryDocumentStore};
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let service = Arc::new(DocumentService::new(InMemoryDocumentStore::new()));
    let app = http::router(service, "settings");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn create(client: &reqwest::Client, base: &str, payload: Value) -> Value {
    let resp = client
        .post(format!("{base}/settings"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some());
    assert!(body.get("uptime").is_some());
}

#[tokio::test]
async fn create_and_fetch() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "theme": "dark", "language": "en" })).await;
    assert_eq!(created["theme"], "dark");
    assert!(created["_metadata"]["created_at"].is_string());

    let uid = created["uid"].as_str().unwrap();
    let resp = client
        .get(format!("{base}/settings/{uid}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, created);
}

#[tokio::test]
async fn bad_bodies_return_400() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let empty = client
        .post(format!("{base}/settings"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), 400);
    let body: Value = empty.json().await.unwrap();
    assert!(body.get("error").is_some());

    let malformed = client
        .post(format!("{base}/settings"))
        .header("content-type", "application/json")
        .body("not valid json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 400);

    let missing = client
        .post(format!("{base}/settings"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 400);
}

#[tokio::test]
async fn lookup_errors() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let absent = client
        .get(format!("{base}/settings/00000000-0000-0000-0000-000000000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(absent.status(), 404);
    let body: Value = absent.json().await.unwrap();
    assert!(body.get("error").is_some());

    let malformed = client
        .get(format!("{base}/settings/invalid-uid"))
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 400);

    let replace_absent = client
        .put(format!("{base}/settings/00000000-0000-0000-0000-000000000000"))
        .json(&json!({ "data": "value" }))
        .send()
        .await
        .unwrap();
    assert_eq!(replace_absent.status(), 404);
}

#[tokio::test]
async fn replace_discards_old_fields() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "original": "value" })).await;
    let uid = created["uid"].as_str().unwrap();

    let resp = client
        .put(format!("{base}/settings/{uid}"))
        .json(&json!({ "updated": "new_value", "count": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["updated"], "new_value");
    assert_eq!(body["count"], 42);
    assert!(body.get("original").is_none());
    assert_eq!(
        body["_metadata"]["created_at"],
        created["_metadata"]["created_at"]
    );
    assert_ne!(body["_metadata"]["updated_at"], body["_metadata"]["created_at"]);

    let empty = client
        .put(format!("{base}/settings/{uid}"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), 400);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "to": "delete" })).await;
    let uid = created["uid"].as_str().unwrap();

    for _ in 0..2 {
        let resp = client
            .delete(format!("{base}/settings/{uid}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }

    let gone = client
        .get(format!("{base}/settings/{uid}"))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn pagination_over_http() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for i in 0..15 {
        create(&client, &base, json!({ "index": i })).await;
    }

    let first: Value = client
        .get(format!("{base}/settings?limit=10&offset=0"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["items"].as_array().unwrap().len(), 10);
    assert_eq!(first["pagination"]["limit"], 10);
    assert_eq!(first["pagination"]["currentPage"], 1);

    let second: Value = client
        .get(format!("{base}/settings?limit=10&offset=10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["pagination"]["currentPage"], 2);
    assert_eq!(second["pagination"]["total"], 15);

    let bad = client
        .get(format!("{base}/settings?limit=ten"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);
}

#[tokio::test]
async fn concurrent_creates_over_http() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let client = client.clone();
            let base = base.clone();
            tokio::spawn(async move {
                let resp = client
                    .post(format!("{base}/settings"))
                    .json(&json!({ "index": i }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(resp.status(), 201);
                let body: Value = resp.json().await.unwrap();
                body["uid"].as_str().unwrap().to_string()
            })
        })
        .collect();

    let mut uids = std::collections::HashSet::new();
    for task in tasks {
        uids.insert(task.await.unwrap());
    }
    assert_eq!(uids.len(), 50);

    let listed: Value = client
        .get(format!("{base}/settings?limit=100"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["pagination"]["total"], 50);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);
}
