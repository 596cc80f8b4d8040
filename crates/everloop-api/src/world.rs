//! Handlers for the world snapshot and the writing assistant.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/world` | Settings plus every current canon rule |
//! | `PUT`  | `/world` | Body: [`WorldSettings`]; omitted fields reset to the defaults |
//! | `POST` | `/assist` | Body: `{"content":"...","context":{...}}`; `context` optional |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use everloop_core::{
  service::WritingAssistance,
  store::StoryStore,
  world::{WorldLore, WorldSettings},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Engine, error::ApiError};

// ─── World ────────────────────────────────────────────────────────────────────

/// `GET /world`
pub async fn get<S: StoryStore>(
  State(engine): State<Engine<S>>,
) -> Result<Json<WorldLore>, ApiError> {
  Ok(Json(engine.world().await?))
}

/// `PUT /world`
pub async fn update<S: StoryStore>(
  State(engine): State<Engine<S>>,
  body: Result<Json<WorldSettings>, JsonRejection>,
) -> Result<Json<WorldSettings>, ApiError> {
  let Json(settings) = body?;
  Ok(Json(engine.update_world_settings(settings).await?))
}

// ─── Assist ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssistBody {
  pub content: String,
  #[serde(default)]
  pub context: Map<String, Value>,
}

/// `POST /assist`
pub async fn assist<S: StoryStore>(
  State(engine): State<Engine<S>>,
  body: Result<Json<AssistBody>, JsonRejection>,
) -> Result<Json<WritingAssistance>, ApiError> {
  let Json(body) = body?;
  let help = engine
    .stories
    .get_writing_assistance(&body.content, &body.context)
    .await?;
  Ok(Json(help))
}
