use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response as HttpResponse},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

type Writes = Arc<Mutex<Vec<(String, String, Value)>>>;

async fn handle_collection(Path(name): Path<String>) -> HttpResponse {
    if name == "campaigns" {
        return Json(json!([
            { "id": "1", "name": "Summer Sale 2024" },
            { "id": "2", "name": "Back to School" }
        ]))
        .into_response();
    }
    if name == "throttled" {
        return (
            HttpStatus::TOO_MANY_REQUESTS,
            Json(json!({ "code": "rate_limited", "message": "slow down" })),
        )
            .into_response();
    }
    (
        HttpStatus::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(ErrorCode::Internal, "index rebuilding")),
    )
        .into_response()
}

async fn handle_record(Path((name, id)): Path<(String, String)>) -> HttpResponse {
    match id.as_str() {
        "known" => return Json(json!({ "collection": name, "name": "Ada" })).into_response(),
        "expired" => return HttpStatus::UNAUTHORIZED.into_response(),
        "private" => return HttpStatus::FORBIDDEN.into_response(),
        _ => {}
    }
    (
        HttpStatus::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such document")),
    )
        .into_response()
}

async fn handle_patch(
    State(writes): State<Writes>,
    Path((name, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> HttpResponse {
    let email_ok = patch["email"].as_str().is_some_and(|email| email.contains('@'));
    if !email_ok {
        return (
            HttpStatus::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(ErrorCode::Validation, "email invalid")),
        )
            .into_response();
    }
    writes.lock().await.push((name, id, patch));
    HttpStatus::NO_CONTENT.into_response()
}

async fn spawn_store_server() -> anyhow::Result<(String, Writes)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let writes: Writes = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/collections/:name", get(handle_collection))
        .route(
            "/api/collections/:name/:id",
            get(handle_record).patch(handle_patch),
        )
        .with_state(writes.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), writes))
}

fn source(base_url: &str) -> HttpDocumentSource {
    HttpDocumentSource::new(base_url, Duration::from_secs(5)).expect("source")
}

#[test]
fn endpoint_appends_collection_segments_to_base_path() {
    let source = source("http://store.local/v1/");
    assert_eq!(
        source.endpoint(&["users", "a b"]).as_str(),
        "http://store.local/v1/collections/users/a%20b"
    );
}

#[test]
fn rejects_unparseable_store_url() {
    assert!(HttpDocumentSource::new("not a url", Duration::from_secs(1)).is_err());
    assert!(HttpDocumentSource::new("mailto:store@example.com", Duration::from_secs(1)).is_err());
}

#[tokio::test]
async fn fetches_collection_in_server_order() {
    let (base_url, _writes) = spawn_store_server().await.expect("spawn server");
    let records = source(&base_url)
        .fetch_collection("campaigns")
        .await
        .expect("collection");
    let names: Vec<_> = records
        .iter()
        .filter_map(|record| record["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Summer Sale 2024", "Back to School"]);
}

#[tokio::test]
async fn server_error_becomes_network_failure() {
    let (base_url, _writes) = spawn_store_server().await.expect("spawn server");
    let err = source(&base_url)
        .fetch_collection("analytics")
        .await
        .expect_err("must fail");
    match err {
        DataError::NetworkFailure(message) => assert!(
            message.contains("index rebuilding"),
            "unexpected message: {message}"
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bare_auth_statuses_become_unauthenticated() {
    let (base_url, _writes) = spawn_store_server().await.expect("spawn server");
    let store = source(&base_url);

    for id in ["expired", "private"] {
        let err = store.fetch_by_id("users", id).await.expect_err("must fail");
        assert_eq!(err, DataError::Unauthenticated, "for {id}");
    }
}

#[tokio::test]
async fn unrecognised_error_code_falls_back_to_network_failure() {
    let (base_url, _writes) = spawn_store_server().await.expect("spawn server");
    let err = source(&base_url)
        .fetch_collection("throttled")
        .await
        .expect_err("must fail");
    match err {
        DataError::NetworkFailure(message) => assert!(
            message.contains("429"),
            "unexpected message: {message}"
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let (base_url, _writes) = spawn_store_server().await.expect("spawn server");
    let store = source(&base_url);

    let record = store.fetch_by_id("users", "known").await.expect("record");
    assert_eq!(record["collection"], "users");

    let err = store
        .fetch_by_id("applications", "app-404")
        .await
        .expect_err("must fail");
    assert_eq!(err, DataError::NotFound("applications/app-404".to_string()));
}

#[tokio::test]
async fn rejected_write_surfaces_message_verbatim() {
    let (base_url, writes) = spawn_store_server().await.expect("spawn server");
    let store = source(&base_url);

    let err = store
        .write_record("users", "u1", json!({ "email": "nope" }))
        .await
        .expect_err("must fail");
    assert_eq!(err, DataError::ValidationFailure("email invalid".to_string()));
    assert!(writes.lock().await.is_empty());

    store
        .write_record("users", "u1", json!({ "email": "ada@example.com" }))
        .await
        .expect("write");
    let writes = writes.lock().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "users");
    assert_eq!(writes[0].1, "u1");
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = source(&format!("http://{addr}"))
        .fetch_by_id("users", "u1")
        .await
        .expect_err("must fail");
    assert!(matches!(err, DataError::NetworkFailure(_)), "{err:?}");
}
