//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Missing resources become 404, store failures 500, everything else is the
/// caller's fault.
impl From<everloop_core::Error> for ApiError {
  fn from(e: everloop_core::Error) -> Self {
    match e {
      e if e.is_not_found() => ApiError::NotFound(e.to_string()),
      everloop_core::Error::Store(inner) => ApiError::Store(inner),
      e => ApiError::BadRequest(e.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

#[cfg(test)]
mod tests {
  use everloop_core::{Error, id::StoryId, story::StoryStatus};

  use super::*;

  fn status_of(e: Error) -> StatusCode { ApiError::from(e).into_response().status() }

  #[test]
  fn core_errors_map_to_status_codes() {
    assert_eq!(status_of(Error::StoryNotFound(StoryId::from("s"))), StatusCode::NOT_FOUND);
    assert_eq!(status_of(Error::UnknownWriter("w".into())), StatusCode::BAD_REQUEST);
    assert_eq!(
      status_of(Error::DuplicateUsername("aria".into())),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      status_of(Error::DuplicateCanonRule("r1".into())),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      status_of(Error::InvalidTransition(StoryStatus::Published)),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      status_of(Error::store(std::io::Error::other("disk"))),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
