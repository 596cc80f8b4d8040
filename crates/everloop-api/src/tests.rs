//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use everloop_core::service::StoryEngine;
use everloop_store_memory::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

fn app() -> Router { api_router(Arc::new(StoryEngine::new(Arc::new(MemoryStore::new())))) }

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn register(app: &Router, username: &str) -> String {
  let (status, writer) = send(
    app,
    "POST",
    "/writers",
    Some(json!({ "username": username, "email": format!("{username}@everloop.world") })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  writer["id"].as_str().unwrap().to_owned()
}

async fn post_story(app: &Router, writer_id: &str, content: &str, refs: Value) -> Value {
  let (status, draft) = send(
    app,
    "POST",
    "/stories",
    Some(json!({
      "title": "Test Story",
      "writer_id": writer_id,
      "content": content,
      "referenced_canon": refs,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{draft}");
  draft
}

// ── Writers ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_fetch_writer() {
  let app = app();
  let id = register(&app, "aria").await;

  let (status, writer) = send(&app, "GET", &format!("/writers/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(writer["username"], "aria");
  assert_eq!(writer["stories_count"], 0);
  assert_eq!(writer["reputation"], 0);

  let (_, all) = send(&app, "GET", "/writers", None).await;
  assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_username_is_400() {
  let app = app();
  register(&app, "aria").await;
  let (status, body) = send(
    &app,
    "POST",
    "/writers",
    Some(json!({ "username": "aria", "email": "other@x" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn missing_writer_is_404() {
  let (status, body) = send(&app(), "GET", "/writers/nobody", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_body_is_400() {
  let (status, body) =
    send(&app(), "POST", "/writers", Some(json!({ "username": "aria" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

// ── Stories ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_story_populates_summary_and_tags() {
  let app = app();
  let writer_id = register(&app, "aria").await;
  let draft = post_story(&app, &writer_id, "A spell cast on a quest.", json!([])).await;

  assert_eq!(draft["story"]["status"], "draft");
  assert_eq!(draft["story"]["canon_level"], "sandbox");
  assert_eq!(draft["story"]["summary"], "A spell cast on a quest.");
  assert_eq!(draft["story"]["tags"], json!(["magic", "adventure"]));
  assert_eq!(draft["consistency"]["consistent"], true);
  assert!(draft["story"]["published_at"].is_null());
}

#[tokio::test]
async fn create_story_for_unknown_writer_is_400() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/stories",
    Some(json!({ "title": "t", "writer_id": "nonexistent", "content": "c" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn update_story_rejects_unknown_fields() {
  let app = app();
  let writer_id = register(&app, "aria").await;
  let id = post_story(&app, &writer_id, "text", json!([])).await["story"]["id"]
    .as_str()
    .unwrap()
    .to_owned();

  let (status, _) = send(
    &app,
    "PUT",
    &format!("/stories/{id}"),
    Some(json!({ "status": "published" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, revision) = send(
    &app,
    "PUT",
    &format!("/stories/{id}"),
    Some(json!({ "content": "new text" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(revision["story"]["summary"], "new text");
  assert_eq!(revision["story"]["status"], "draft");
}

#[tokio::test]
async fn publish_flow() {
  let app = app();
  let writer_id = register(&app, "aria").await;
  let good = post_story(&app, &writer_id, "text", json!([])).await;
  let bad = post_story(&app, &writer_id, "text", json!(["missing-rule"])).await;

  let bad_id = bad["story"]["id"].as_str().unwrap();
  let (status, outcome) =
    send(&app, "POST", &format!("/stories/{bad_id}/publish"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(outcome["published"], false);
  assert_eq!(outcome["message"], "Cannot publish story with canon inconsistencies");

  let good_id = good["story"]["id"].as_str().unwrap();
  let (status, outcome) =
    send(&app, "POST", &format!("/stories/{good_id}/publish"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(outcome["published"], true);
  assert_eq!(outcome["story"]["canon_level"], "community");
  assert!(outcome.get("message").is_none());

  let (status, _) = send(&app, "POST", &format!("/stories/{good_id}/publish"), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, writer) = send(&app, "GET", &format!("/writers/{writer_id}"), None).await;
  assert_eq!(writer["reputation"], 10);
  assert_eq!(writer["stories_count"], 2);
}

#[tokio::test]
async fn list_stories_with_filters() {
  let app = app();
  let w1 = register(&app, "aria").await;
  let w2 = register(&app, "vex").await;
  post_story(&app, &w1, "one", json!([])).await;
  post_story(&app, &w2, "two", json!([])).await;
  post_story(&app, &w1, "three", json!([])).await;

  let (status, stories) =
    send(&app, "GET", &format!("/stories?writer_id={w1}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(stories.as_array().unwrap().len(), 2);

  let (_, drafts) = send(&app, "GET", "/stories?status=draft&limit=2", None).await;
  assert_eq!(drafts.as_array().unwrap().len(), 2);

  let (status, _) = send(&app, "GET", "/stories?status=bogus", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_story_then_404() {
  let app = app();
  let writer_id = register(&app, "aria").await;
  let id = post_story(&app, &writer_id, "x", json!([])).await["story"]["id"]
    .as_str()
    .unwrap()
    .to_owned();

  let (status, _) = send(&app, "DELETE", &format!("/stories/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "GET", &format!("/stories/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = send(&app, "DELETE", &format!("/stories/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Canon & world ────────────────────────────────────────────────────────────

#[tokio::test]
async fn canon_crud_and_world() {
  let app = app();
  let (status, rule) = send(
    &app,
    "POST",
    "/canon",
    Some(json!({
      "title": "Spellcraft",
      "description": "How magic works",
      "category": "magic_system",
      "content": "Every spell binds the caster",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = rule["id"].as_str().unwrap().to_owned();
  assert_eq!(rule["references"], json!([]));

  let (_, magic) = send(&app, "GET", "/canon?category=magic_system", None).await;
  assert_eq!(magic.as_array().unwrap().len(), 1);
  let (_, none) = send(&app, "GET", "/canon?category=geography", None).await;
  assert!(none.as_array().unwrap().is_empty());

  let (status, updated) = send(
    &app,
    "PUT",
    &format!("/canon/{id}"),
    Some(json!({ "title": "Spellbinding" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["title"], "Spellbinding");

  let (_, world) = send(&app, "GET", "/world", None).await;
  assert_eq!(world["id"], "everloop_world");
  assert_eq!(world["name"], "Everloop");
  assert_eq!(world["canon_rules"][0]["title"], "Spellbinding");

  let (status, _) = send(&app, "DELETE", &format!("/canon/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "GET", &format!("/canon/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn canon_rule_with_taken_id_is_400() {
  let app = app();
  let rule = json!({
    "id": "r1",
    "title": "Spellcraft",
    "description": "How magic works",
    "category": "magic_system",
    "content": "Every spell binds the caster",
  });

  let (status, _) = send(&app, "POST", "/canon", Some(rule.clone())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) = send(&app, "POST", "/canon", Some(rule)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("already exists"));

  let (_, all) = send(&app, "GET", "/canon", None).await;
  assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn world_settings_can_be_replaced() {
  let app = app();
  let (status, settings) = send(
    &app,
    "PUT",
    "/world",
    Some(json!({ "name": "Everloop Prime", "themes": ["time", "memory"] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(settings["name"], "Everloop Prime");
  assert_eq!(settings["id"], "everloop_world");

  let (_, world) = send(&app, "GET", "/world", None).await;
  assert_eq!(world["name"], "Everloop Prime");
  assert_eq!(world["themes"], json!(["time", "memory"]));
  assert_eq!(world["canon_rules"], json!([]));
}

#[tokio::test]
async fn assist_returns_suggestion_and_world() {
  let app = app();
  let (status, help) =
    send(&app, "POST", "/assist", Some(json!({ "content": "The hero began" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert!(help["suggestion"].as_str().unwrap().starts_with("Continue developing"));
  assert_eq!(help["world_context"]["name"], "Everloop");
}
