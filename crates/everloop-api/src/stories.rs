//! Handlers for `/stories` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/stories` | Optional `writer_id`, `status`, `limit` (100), `offset` (0) |
//! | `POST`   | `/stories` | Body: [`CreateStory`]; returns 201 + draft result |
//! | `GET`    | `/stories/:id` | 404 if not found |
//! | `PUT`    | `/stories/:id` | Body: [`StoryPatch`]; unknown fields are a 400 |
//! | `DELETE` | `/stories/:id` | 204 |
//! | `POST`   | `/stories/:id/publish` | 200 whether or not the story was published |

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
  id::{StoryId, WriterId},
  service::{CreateStory, PublishOutcome, StoryRevision},
  store::{DEFAULT_LIMIT, StoryQuery, StoryStore},
  story::{Story, StoryPatch, StoryStatus},
};
use serde::Deserialize;

use crate::{Engine, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub writer_id: Option<WriterId>,
  pub status:    Option<StoryStatus>,
  #[serde(default = "default_limit")]
  pub limit:     usize,
  #[serde(default)]
  pub offset:    usize,
}

fn default_limit() -> usize { DEFAULT_LIMIT }

impl From<ListParams> for StoryQuery {
  fn from(p: ListParams) -> Self {
    StoryQuery {
      writer_id: p.writer_id,
      status:    p.status,
      limit:     p.limit,
      offset:    p.offset,
    }
  }
}

/// `GET /stories[?writer_id=...][&status=...][&limit=...][&offset=...]`
pub async fn list<S: StoryStore>(
  State(engine): State<Engine<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Story>>, ApiError> {
  let Query(params) = params?;
  let stories = engine.stories.list_stories(&params.into()).await?;
  Ok(Json(stories))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /stories`
pub async fn create<S: StoryStore>(
  State(engine): State<Engine<S>>,
  body: Result<Json<CreateStory>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let draft = engine.stories.create_story(body).await?;
  Ok((StatusCode::CREATED, Json(draft)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /stories/:id`
pub async fn get_one<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<StoryId>,
) -> Result<Json<Story>, ApiError> {
  Ok(Json(engine.stories.get_story(&id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /stories/:id`
pub async fn update<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<StoryId>,
  body: Result<Json<StoryPatch>, JsonRejection>,
) -> Result<Json<StoryRevision>, ApiError> {
  let Json(patch) = body?;
  Ok(Json(engine.stories.update_story(&id, patch).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /stories/:id`
pub async fn delete<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<StoryId>,
) -> Result<StatusCode, ApiError> {
  engine.stories.delete_story(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Publish ──────────────────────────────────────────────────────────────────

/// `POST /stories/:id/publish`
///
/// A refusal on consistency grounds is still a 200; check `published`.
pub async fn publish<S: StoryStore>(
  State(engine): State<Engine<S>>,
  Path(id): Path<StoryId>,
) -> Result<Json<PublishOutcome>, ApiError> {
  Ok(Json(engine.stories.publish_story(&id).await?))
}
