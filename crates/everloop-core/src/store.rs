//! The `StoryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `everloop-store-memory`). The services in [`crate::service`] and the HTTP
//! layer depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  canon::{CanonRule, NewCanonRule},
  id::{CanonRuleId, StoryId, WriterId},
  story::{NewStory, Story, StoryStatus},
  world::{WorldLore, WorldSettings},
  writer::{NewWriter, Writer},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Default page size for [`StoryQuery`].
pub const DEFAULT_LIMIT: usize = 100;

/// Parameters for [`crate::service::StoryService::list_stories`].
///
/// All filters combine; results are newest first.
#[derive(Debug, Clone)]
pub struct StoryQuery {
  pub writer_id: Option<WriterId>,
  pub status:    Option<StoryStatus>,
  pub limit:     usize,
  pub offset:    usize,
}

impl Default for StoryQuery {
  fn default() -> Self {
    Self { writer_id: None, status: None, limit: DEFAULT_LIMIT, offset: 0 }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Everloop store backend: one keyed collection per
/// record type plus the world settings.
///
/// `create_*` methods assign an id when the input carries none and stamp the
/// creation time. `update_*` methods replace the stored record wholesale and
/// restamp `updated_at` where the record has one.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writers ───────────────────────────────────────────────────────────

  /// Fails if the id or the username is already taken.
  fn create_writer(
    &self,
    input: NewWriter,
  ) -> impl Future<Output = Result<Writer, Self::Error>> + Send + '_;

  /// Retrieve a writer by id. Returns `None` if not found.
  fn get_writer<'a>(
    &'a self,
    id: &'a WriterId,
  ) -> impl Future<Output = Result<Option<Writer>, Self::Error>> + Send + 'a;

  fn get_writer_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Writer>, Self::Error>> + Send + 'a;

  fn update_writer(
    &self,
    writer: Writer,
  ) -> impl Future<Output = Result<Writer, Self::Error>> + Send + '_;

  /// All writers in registration order.
  fn list_writers(
    &self,
  ) -> impl Future<Output = Result<Vec<Writer>, Self::Error>> + Send + '_;

  // ── Stories ───────────────────────────────────────────────────────────

  fn create_story(
    &self,
    input: NewStory,
  ) -> impl Future<Output = Result<Story, Self::Error>> + Send + '_;

  fn get_story<'a>(
    &'a self,
    id: &'a StoryId,
  ) -> impl Future<Output = Result<Option<Story>, Self::Error>> + Send + 'a;

  fn update_story(
    &self,
    story: Story,
  ) -> impl Future<Output = Result<Story, Self::Error>> + Send + '_;

  /// Remove a story. Returns `false` if there was nothing to remove.
  fn delete_story<'a>(
    &'a self,
    id: &'a StoryId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn list_stories_by_writer<'a>(
    &'a self,
    writer_id: &'a WriterId,
  ) -> impl Future<Output = Result<Vec<Story>, Self::Error>> + Send + 'a;

  fn list_stories_by_status(
    &self,
    status: StoryStatus,
  ) -> impl Future<Output = Result<Vec<Story>, Self::Error>> + Send + '_;

  /// One page of stories, newest `created_at` first.
  fn list_stories(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Story>, Self::Error>> + Send + '_;

  // ── Canon ─────────────────────────────────────────────────────────────

  fn create_canon_rule(
    &self,
    input: NewCanonRule,
  ) -> impl Future<Output = Result<CanonRule, Self::Error>> + Send + '_;

  fn get_canon_rule<'a>(
    &'a self,
    id: &'a CanonRuleId,
  ) -> impl Future<Output = Result<Option<CanonRule>, Self::Error>> + Send + 'a;

  fn update_canon_rule(
    &self,
    rule: CanonRule,
  ) -> impl Future<Output = Result<CanonRule, Self::Error>> + Send + '_;

  fn delete_canon_rule<'a>(
    &'a self,
    id: &'a CanonRuleId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn list_canon_rules_by_category<'a>(
    &'a self,
    category: &'a str,
  ) -> impl Future<Output = Result<Vec<CanonRule>, Self::Error>> + Send + 'a;

  /// All canon rules in creation order.
  fn list_canon_rules(
    &self,
  ) -> impl Future<Output = Result<Vec<CanonRule>, Self::Error>> + Send + '_;

  // ── World ─────────────────────────────────────────────────────────────

  fn world_settings(
    &self,
  ) -> impl Future<Output = Result<WorldSettings, Self::Error>> + Send + '_;

  fn update_world_settings(
    &self,
    settings: WorldSettings,
  ) -> impl Future<Output = Result<WorldSettings, Self::Error>> + Send + '_;

  /// Materialise a [`WorldLore`] from the current settings and canon rules.
  /// Never cached.
  fn world(
    &self,
  ) -> impl Future<Output = Result<WorldLore, Self::Error>> + Send + '_;
}
