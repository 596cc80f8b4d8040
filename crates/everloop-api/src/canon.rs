//! Handlers for `/canon` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/canon` | Optional `?category=magic_system` |
//! | `POST`   | `/canon` | Body: [`NewCanonRule`]; returns 201 + stored rule |
//! | `GET`    | `/canon/:id` | 404 if not found |
//! | `PUT`    | `/canon/:id` | Body: [`CanonRulePatch`] |
//! | `DELETE` | `/canon/:id` | 204; referencing stories become inconsistent |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use everloop_core::{
  canon::{CanonRule, CanonRulePatch, NewCanonRule},
  id::CanonRuleId,
  store::StoryStore,
};
use serde::Deserialize;

use crate::{Engine, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<String>,
}

/// `GET /canon[?category=<category>]`
pub async fn list<S: StoryStore>(
  State(engine): State<Engine<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<CanonRule>>, ApiError> {
  let Query(params) = params?;
  let rules = engine
    .canon
    .list_canon_rules(params.category.as_deref())
    .await?;
  Ok(Json(rules))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /canon`
pub async fn create<S: StoryStore>(
  State(engine): State<Engine<S>>,
  body: Result<Json<NewCanonRule>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let rule = engine.canon.create_canon_rule(body).await?;
  Ok((StatusCode::CREATED, Json(rule)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /canon/:id`
pub async fn get_one<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<CanonRuleId>,
) -> Result<Json<CanonRule>, ApiError> {
  Ok(Json(engine.canon.get_canon_rule(&id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /canon/:id`
pub async fn update<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<CanonRuleId>,
  body: Result<Json<CanonRulePatch>, JsonRejection>,
) -> Result<Json<CanonRule>, ApiError> {
  let Json(patch) = body?;
  Ok(Json(engine.canon.update_canon_rule(&id, patch).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /canon/:id`
pub async fn delete<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<CanonRuleId>,
) -> Result<StatusCode, ApiError> {
  engine.canon.delete_canon_rule(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
