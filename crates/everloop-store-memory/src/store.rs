//! [`MemoryStore`]: the in-memory implementation of [`StoryStore`].

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use everloop_core::{
  canon::{CanonRule, NewCanonRule},
  id::{CanonRuleId, StoryId, WriterId},
  store::StoryStore,
  story::{CanonLevel, NewStory, Story, StoryStatus},
  world::{WorldLore, WorldSettings},
  writer::{NewWriter, Writer},
};

use crate::{
  Error, Result,
  table::{Record, Table},
};

// ─── Records ─────────────────────────────────────────────────────────────────

impl Record for Writer {
  type Id = WriterId;
  const KIND: &'static str = "writer";
  fn id(&self) -> &WriterId { &self.id }
}

impl Record for Story {
  type Id = StoryId;
  const KIND: &'static str = "story";
  fn id(&self) -> &StoryId { &self.id }
}

impl Record for CanonRule {
  type Id = CanonRuleId;
  const KIND: &'static str = "canon rule";
  fn id(&self) -> &CanonRuleId { &self.id }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
  writers: RwLock<Table<Writer>>,
  stories: RwLock<Table<Story>>,
  canon:   RwLock<Table<CanonRule>>,
  world:   RwLock<WorldSettings>,
}

/// An Everloop store held entirely in process memory.
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

impl MemoryStore {
  /// An empty store with default world settings.
  pub fn new() -> Self { Self::default() }

  /// An empty store describing a different world.
  pub fn with_world(settings: WorldSettings) -> Self {
    Self {
      inner: Arc::new(Inner { world: RwLock::new(settings), ..Default::default() }),
    }
  }
}

// ─── StoryStore impl ─────────────────────────────────────────────────────────

impl StoryStore for MemoryStore {
  type Error = Error;

  // ── Writers ───────────────────────────────────────────────────────────────

  async fn create_writer(&self, input: NewWriter) -> Result<Writer> {
    let writer = Writer {
      id:            input.id.unwrap_or_else(WriterId::generate),
      username:      input.username,
      email:         input.email,
      created_at:    Utc::now(),
      stories_count: 0,
      reputation:    0,
    };
    let mut writers = self.inner.writers.write().await;
    if writers.find(|w| w.username == writer.username).is_some() {
      return Err(Error::UsernameTaken(writer.username));
    }
    writers.insert(writer)
  }

  async fn get_writer<'a>(&'a self, id: &'a WriterId) -> Result<Option<Writer>> {
    Ok(self.inner.writers.read().await.get(id))
  }

  async fn get_writer_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> Result<Option<Writer>> {
    Ok(self.inner.writers.read().await.find(|w| w.username == username))
  }

  async fn update_writer(&self, writer: Writer) -> Result<Writer> {
    self.inner.writers.write().await.replace(writer)
  }

  async fn list_writers(&self) -> Result<Vec<Writer>> {
    Ok(self.inner.writers.read().await.all())
  }

  // ── Stories ───────────────────────────────────────────────────────────────

  async fn create_story(&self, input: NewStory) -> Result<Story> {
    let now = Utc::now();
    let story = Story {
      id:               input.id.unwrap_or_else(StoryId::generate),
      title:            input.title,
      writer_id:        input.writer_id,
      content:          input.content,
      summary:          input.summary,
      status:           StoryStatus::Draft,
      canon_level:      CanonLevel::Sandbox,
      tags:             input.tags,
      referenced_canon: input.referenced_canon,
      created_at:       now,
      updated_at:       now,
      published_at:     None,
    };
    self.inner.stories.write().await.insert(story)
  }

  async fn get_story<'a>(&'a self, id: &'a StoryId) -> Result<Option<Story>> {
    Ok(self.inner.stories.read().await.get(id))
  }

  async fn update_story(&self, mut story: Story) -> Result<Story> {
    story.updated_at = Utc::now();
    self.inner.stories.write().await.replace(story)
  }

  async fn delete_story<'a>(&'a self, id: &'a StoryId) -> Result<bool> {
    Ok(self.inner.stories.write().await.remove(id))
  }

  async fn list_stories_by_writer<'a>(
    &'a self,
    writer_id: &'a WriterId,
  ) -> Result<Vec<Story>> {
    Ok(self.inner.stories.read().await.filter(|s| &s.writer_id == writer_id))
  }

  async fn list_stories_by_status(&self, status: StoryStatus) -> Result<Vec<Story>> {
    Ok(self.inner.stories.read().await.filter(|s| s.status == status))
  }

  async fn list_stories(&self, limit: usize, offset: usize) -> Result<Vec<Story>> {
    let mut stories = self.inner.stories.read().await.all();
    // Newest insertion first, then a stable sort so equal timestamps keep it.
    stories.reverse();
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(stories.into_iter().skip(offset).take(limit).collect())
  }

  // ── Canon ─────────────────────────────────────────────────────────────────

  async fn create_canon_rule(&self, input: NewCanonRule) -> Result<CanonRule> {
    let now = Utc::now();
    let rule = CanonRule {
      id:          input.id.unwrap_or_else(CanonRuleId::generate),
      title:       input.title,
      description: input.description,
      category:    input.category,
      content:     input.content,
      references:  input.references,
      created_at:  now,
      updated_at:  now,
    };
    self.inner.canon.write().await.insert(rule)
  }

  async fn get_canon_rule<'a>(
    &'a self,
    id: &'a CanonRuleId,
  ) -> Result<Option<CanonRule>> {
    Ok(self.inner.canon.read().await.get(id))
  }

  async fn update_canon_rule(&self, mut rule: CanonRule) -> Result<CanonRule> {
    rule.updated_at = Utc::now();
    self.inner.canon.write().await.replace(rule)
  }

  async fn delete_canon_rule<'a>(&'a self, id: &'a CanonRuleId) -> Result<bool> {
    Ok(self.inner.canon.write().await.remove(id))
  }

  async fn list_canon_rules_by_category<'a>(
    &'a self,
    category: &'a str,
  ) -> Result<Vec<CanonRule>> {
    Ok(self.inner.canon.read().await.filter(|r| r.category == category))
  }

  async fn list_canon_rules(&self) -> Result<Vec<CanonRule>> {
    Ok(self.inner.canon.read().await.all())
  }

  // ── World ─────────────────────────────────────────────────────────────────

  async fn world_settings(&self) -> Result<WorldSettings> {
    Ok(self.inner.world.read().await.clone())
  }

  async fn update_world_settings(
    &self,
    settings: WorldSettings,
  ) -> Result<WorldSettings> {
    *self.inner.world.write().await = settings.clone();
    Ok(settings)
  }

  async fn world(&self) -> Result<WorldLore> {
    let settings = self.world_settings().await?;
    let canon_rules = self.list_canon_rules().await?;
    Ok(WorldLore::new(settings, canon_rules))
  }
}

#[cfg(test)]
impl MemoryStore {
  /// Bypass `create_story` to control `created_at` in ordering tests.
  pub(crate) async fn insert_story_raw(&self, story: Story) -> Result<Story> {
    self.inner.stories.write().await.insert(story)
  }
}
