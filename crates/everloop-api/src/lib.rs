//! JSON REST API for the Everloop story engine.
//!
//! Exposes an axum [`Router`] backed by a [`StoryEngine`] over any
//! [`everloop_core::store::StoryStore`]. Health checks, tracing and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", everloop_api::api_router(engine.clone()))
//! ```

pub mod canon;
pub mod error;
pub mod stories;
pub mod world;
pub mod writers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use everloop_core::{service::StoryEngine, store::StoryStore};

pub use error::ApiError;

/// Shared state threaded through every handler.
pub type Engine<S> = Arc<StoryEngine<S>>;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Engine<S>) -> Router<()>
where
  S: StoryStore + 'static,
{
  Router::new()
    // Writers
    .route("/writers", get(writers::list::<S>).post(writers::create::<S>))
    .route("/writers/{id}", get(writers::get_one::<S>))
    // Stories
    .route("/stories", get(stories::list::<S>).post(stories::create::<S>))
    .route(
      "/stories/{id}",
      get(stories::get_one::<S>)
        .put(stories::update::<S>)
        .delete(stories::delete::<S>),
    )
    .route("/stories/{id}/publish", post(stories::publish::<S>))
    // Canon
    .route("/canon", get(canon::list::<S>).post(canon::create::<S>))
    .route(
      "/canon/{id}",
      get(canon::get_one::<S>)
        .put(canon::update::<S>)
        .delete(canon::delete::<S>),
    )
    // World
    .route("/world", get(world::get::<S>).put(world::update::<S>))
    .route("/assist", post(world::assist::<S>))
    .with_state(engine)
}

#[cfg(test)]
mod tests;
