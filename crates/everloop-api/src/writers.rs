//! Handlers for `/writers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/writers` | All writers, in registration order |
//! | `POST` | `/writers` | Body: `{"username":"...","email":"..."}`; 400 on duplicate username |
//! | `GET`  | `/writers/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use everloop_core::{id::WriterId, store::StoryStore, writer::Writer};
use serde::Deserialize;

use crate::{Engine, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /writers`
pub async fn list<S: StoryStore>(
  State(engine): State<Engine<S>>,
) -> Result<Json<Vec<Writer>>, ApiError> {
  Ok(Json(engine.writers.list_writers().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub username: String,
  pub email:    String,
}

/// `POST /writers`
pub async fn create<S: StoryStore>(
  State(engine): State<Engine<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let writer = engine
    .writers
    .register_writer(&body.username, &body.email)
    .await?;
  Ok((StatusCode::CREATED, Json(writer)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /writers/:id`
pub async fn get_one<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<WriterId>,
) -> Result<Json<Writer>, ApiError> {
  Ok(Json(engine.writers.get_writer(&id).await?))
}
