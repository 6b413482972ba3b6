//! Router tests against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use caselog_core::{CaseId, CaseLog, memory::MemoryStore};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

fn router() -> Router { api_router(Arc::new(CaseLog::new(MemoryStore::new()))) }

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create(app: &Router, phone: &str, email: &str) -> Value {
  let (status, case) = send(
    app,
    "POST",
    "/cases",
    Some(json!({ "phone_number": phone, "email": email })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{case}");
  case
}

// ── Cases ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let (status, body) = send(&router(), "GET", "/cases", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_assigns_id_and_counts() {
  let app = router();
  let first = create(&app, "555-0100", "a@x.com").await;
  assert_eq!(first["case_id"].as_str().unwrap().len(), 8);
  assert_eq!(first["email_count"], 1);
  assert_eq!(first["phone_count"], 1);

  let second = create(&app, "", "A@X.COM").await;
  assert_eq!(second["email_count"], 2);
  assert_eq!(second["phone_count"], Value::Null);

  let (_, all) = send(&app, "GET", "/cases", None).await;
  assert_eq!(all[0]["email_count"], 2);
}

#[tokio::test]
async fn placeholder_selection_is_stored_as_absent() {
  let app = router();
  let (status, case) = send(
    &app,
    "POST",
    "/cases",
    Some(json!({
      "email": "a@x.com",
      "main_reaction": "Select an option",
      "main_response": "I will call you back",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(case["main_reaction"], Value::Null);
  assert_eq!(case["main_response"], "I will call you back");
}

#[tokio::test]
async fn overlong_field_is_bad_request() {
  let app = router();
  let (status, body) = send(
    &app,
    "POST",
    "/cases",
    Some(json!({ "email": "x".repeat(101) })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn get_update_and_delete_one() {
  let app = router();
  let a = create(&app, "555", "a@x.com").await;
  let b = create(&app, "555", "b@x.com").await;
  let a_uri = format!("/cases/{}", a["case_id"].as_str().unwrap());
  let b_uri = format!("/cases/{}", b["case_id"].as_str().unwrap());

  let (status, got) = send(&app, "GET", &a_uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(got["phone_count"], 2);

  let (status, updated) = send(
    &app,
    "PUT",
    &a_uri,
    Some(json!({ "phone_number": "777", "email": "b@x.com", "comments": "moved" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["case_id"], a["case_id"]);
  assert_eq!(updated["created_at"], a["created_at"]);
  assert_eq!(updated["email_count"], 2);
  assert_eq!(updated["phone_count"], 1);

  let (_, b_now) = send(&app, "GET", &b_uri, None).await;
  assert_eq!(b_now["phone_count"], 1);
  assert_eq!(b_now["email_count"], 2);

  let (status, _) = send(&app, "DELETE", &a_uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, b_now) = send(&app, "GET", &b_uri, None).await;
  assert_eq!(b_now["email_count"], 1);

  let (status, _) = send(&app, "GET", &a_uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_case_is_404_but_delete_is_tolerant() {
  let app = router();
  let (status, body) = send(&app, "GET", "/cases/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("nope"));

  let (status, _) = send(&app, "PUT", "/cases/nope", Some(json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, "DELETE", "/cases/nope", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn exhausted_id_generation_is_conflict() {
  fn fixed() -> CaseId { CaseId::from("samesame") }
  let log = CaseLog::new(MemoryStore::new()).with_id_generator(fixed);
  let app = api_router(Arc::new(log));

  create(&app, "", "a@x.com").await;
  let (status, body) = send(&app, "POST", "/cases", Some(json!({}))).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(body["error"].as_str().unwrap().contains("samesame"));
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_by_substring_and_glob() {
  let app = router();
  create(&app, "555-0100", "alice@example.com").await;
  create(&app, "555-0199", "bob@example.org").await;

  let (status, found) = send(&app, "GET", "/search?q=ALICE", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(found.as_array().unwrap().len(), 1);

  let (_, found) = send(&app, "GET", "/search?q=*.org", None).await;
  assert_eq!(found.as_array().unwrap().len(), 1);
  assert_eq!(found[0]["email"], "bob@example.org");

  let (_, found) = send(&app, "GET", "/search?q=555-01*", None).await;
  assert_eq!(found.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_search_is_bad_request() {
  let app = router();
  let (status, _) = send(&app, "GET", "/search?q=%20%20", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, _) = send(&app, "GET", "/search", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Counts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn counts_preview_new_and_edited_cases() {
  let app = router();
  let a = create(&app, "555", "a@x.com").await;
  create(&app, "555", "other@x.com").await;

  let (status, counts) = send(&app, "GET", "/counts?phone=555&email=A%40X.com", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(counts, json!({ "email_count": 2, "phone_count": 3 }));

  let uri = format!(
    "/counts?phone=555&email=a%40x.com&case_id={}",
    a["case_id"].as_str().unwrap()
  );
  let (_, counts) = send(&app, "GET", &uri, None).await;
  assert_eq!(counts, json!({ "email_count": 1, "phone_count": 2 }));

  let (_, counts) = send(&app, "GET", "/counts", None).await;
  assert_eq!(counts, json!({ "email_count": null, "phone_count": null }));
}
