//! HTTP front end for the Everloop story engine.
//!
//! Wraps the JSON API from `everloop-api` under `/api`, adds a `/health`
//! check and request tracing.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use everloop_core::{
  seed, service::StoryEngine, store::StoryStore, world::WorldSettings,
};
use everloop_store_memory::MemoryStore;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `everloop.toml` and
/// `EVERLOOP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// Create the founding canon and example writers at startup.
  #[serde(default = "default_seed_world")]
  pub seed_world: bool,
  /// World metadata, from a `[world]` table. Missing keys keep the
  /// Everloop defaults.
  #[serde(default)]
  pub world:      WorldSettings,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_seed_world() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      seed_world: default_seed_world(),
      world:      WorldSettings::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// A fresh in-memory engine describing the configured world.
  pub fn engine(&self) -> Arc<StoryEngine<MemoryStore>> {
    let store = MemoryStore::with_world(self.world.clone());
    Arc::new(StoryEngine::new(Arc::new(store)))
  }
}

// ─── Health ───────────────────────────────────────────────────────────────────

pub const SERVICE_NAME: &str = "Everloop Story Engine";

#[derive(Debug, Serialize)]
struct Health {
  status:  &'static str,
  service: &'static str,
}

async fn health() -> Json<Health> {
  Json(Health { status: "healthy", service: SERVICE_NAME })
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `engine`.
pub fn app<S>(engine: Arc<StoryEngine<S>>) -> Router
where
  S: StoryStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", everloop_api::api_router(engine))
    .layer(TraceLayer::new_for_http())
}

/// Populate an empty engine with the founding canon and example writers.
pub async fn seed_world<S: StoryStore>(
  engine: &StoryEngine<S>,
) -> everloop_core::Result<()> {
  seed::initialize_world(&engine.canon).await?;
  let writers = seed::create_example_writers(&engine.writers).await?;
  tracing::info!(writers = writers.len(), "seeded world");
  Ok(())
}

// ─── Integration tests ────────────────────────────────────────────────────────
