//! Services: the operations the HTTP API and CLI expose.
//!
//! Each service holds a shared handle to a [`StoryStore`] and enforces the
//! invariants the store itself does not: username uniqueness, writer
//! existence on story creation, and the consistency gate on publication.
//! None of them is transactional; a call that writes twice may leave the
//! first write in place if the second fails.

mod canon;
mod story;
mod writer;

use std::sync::Arc;

pub use canon::CanonService;
pub use story::{
  CreateStory, PublishOutcome, StoryDraft, StoryRevision, StoryService,
  WritingAssistance,
};
pub use writer::WriterService;

use crate::{
  Error, Result,
  store::StoryStore,
  world::{WorldLore, WorldSettings},
};

/// All three services over one store.
pub struct StoryEngine<S> {
  pub writers: WriterService<S>,
  pub stories: StoryService<S>,
  pub canon:   CanonService<S>,
  store:       Arc<S>,
}

impl<S: StoryStore> StoryEngine<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      writers: WriterService::new(store.clone()),
      stories: StoryService::new(store.clone()),
      canon: CanonService::new(store.clone()),
      store,
    }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// The world as it stands right now.
  pub async fn world(&self) -> Result<WorldLore> {
    self.store.world().await.map_err(Error::store)
  }

  /// Replace the world's descriptive metadata. Canon is untouched.
  pub async fn update_world_settings(
    &self,
    settings: WorldSettings,
  ) -> Result<WorldSettings> {
    let settings = self
      .store
      .update_world_settings(settings)
      .await
      .map_err(Error::store)?;
    tracing::info!(name = %settings.name, "updated world settings");
    Ok(settings)
  }
}
