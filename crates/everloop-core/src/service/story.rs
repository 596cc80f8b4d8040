use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  assistant::{ConsistencyReport, WritingAssistant},
  id::{CanonRuleId, StoryId, WriterId},
  store::{StoryQuery, StoryStore},
  story::{NewStory, Story, StoryPatch, StoryStatus},
  world::WorldLore,
  writer::PUBLISH_REPUTATION,
};

const INCONSISTENT_MESSAGE: &str =
  "Cannot publish story with canon inconsistencies";

// ─── Inputs and outcomes ─────────────────────────────────────────────────────

/// Input to [`StoryService::create_story`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
  pub title:            String,
  pub writer_id:        WriterId,
  pub content:          String,
  /// Suggested from the content when empty.
  #[serde(default)]
  pub tags:             Vec<String>,
  #[serde(default)]
  pub referenced_canon: Vec<CanonRuleId>,
}

/// A freshly created story with the assistant's first read of it.
#[derive(Debug, Clone, Serialize)]
pub struct StoryDraft {
  pub story:          Story,
  pub consistency:    ConsistencyReport,
  pub suggested_tags: Vec<String>,
}

/// A story after an update, re-checked against canon.
#[derive(Debug, Clone, Serialize)]
pub struct StoryRevision {
  pub story:       Story,
  pub consistency: ConsistencyReport,
}

/// Result of a publication attempt. A refusal is not an error: `published`
/// is `false` and `message` says why.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
  pub published:   bool,
  pub story:       Story,
  pub consistency: ConsistencyReport,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:     Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingAssistance {
  pub suggestion:    String,
  pub world_context: WorldLore,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Story lifecycle: creation, revision, publication.
pub struct StoryService<S> {
  store: Arc<S>,
}

impl<S> Clone for StoryService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: StoryStore> StoryService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// An assistant over the canon as it is right now.
  async fn assistant(&self) -> Result<WritingAssistant> {
    let world = self.store.world().await.map_err(Error::store)?;
    Ok(WritingAssistant::new(world))
  }

  async fn load(&self, id: &StoryId) -> Result<Story> {
    self
      .store
      .get_story(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::StoryNotFound(id.clone()))
  }

  /// Create a draft. The writer must exist; their story count is bumped.
  pub async fn create_story(&self, input: CreateStory) -> Result<StoryDraft> {
    let mut writer = self
      .store
      .get_writer(&input.writer_id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::UnknownWriter(input.writer_id.clone()))?;

    let assistant = self.assistant().await?;

    let mut new = NewStory {
      id:               None,
      summary:          assistant.generate_summary(&input.content),
      title:            input.title,
      writer_id:        input.writer_id,
      content:          input.content,
      tags:             input.tags,
      referenced_canon: input.referenced_canon,
    };
    if new.tags.is_empty() {
      new.tags = assistant.suggest_tags(&new);
    }

    let story = self.store.create_story(new).await.map_err(Error::store)?;

    writer.stories_count += 1;
    self.store.update_writer(writer).await.map_err(Error::store)?;

    let consistency = assistant.check_canon_consistency(&story);
    let suggested_tags = assistant.suggest_tags(&story);
    tracing::info!(
      story_id = %story.id,
      writer_id = %story.writer_id,
      consistent = consistency.consistent,
      "created story"
    );

    Ok(StoryDraft { story, consistency, suggested_tags })
  }

  pub async fn get_story(&self, id: &StoryId) -> Result<Story> { self.load(id).await }

  /// Apply `patch`, regenerate the summary if the content changed, and
  /// re-check consistency. An inconsistent result does not block the update.
  pub async fn update_story(
    &self,
    id: &StoryId,
    patch: StoryPatch,
  ) -> Result<StoryRevision> {
    let mut story = self.load(id).await?;
    let assistant = self.assistant().await?;

    let content_changed = patch.touches_content();
    patch.apply(&mut story);
    if content_changed {
      story.summary = assistant.generate_summary(&story.content);
    }

    let story = self.store.update_story(story).await.map_err(Error::store)?;
    let consistency = assistant.check_canon_consistency(&story);
    tracing::debug!(story_id = %story.id, consistent = consistency.consistent, "updated story");

    Ok(StoryRevision { story, consistency })
  }

  /// Publish a draft (or in-review) story if every canon reference resolves.
  ///
  /// On success the story becomes `published`, a sandbox story is promoted to
  /// `community`, and the writer earns [`PUBLISH_REPUTATION`].
  pub async fn publish_story(&self, id: &StoryId) -> Result<PublishOutcome> {
    let mut story = self.load(id).await?;
    if !story.status.is_publishable() {
      return Err(Error::InvalidTransition(story.status));
    }

    let consistency = self.assistant().await?.check_canon_consistency(&story);
    if !consistency.consistent {
      tracing::warn!(
        story_id = %story.id,
        issues = consistency.issues.len(),
        "refused to publish inconsistent story"
      );
      return Ok(PublishOutcome {
        published: false,
        story,
        consistency,
        message: Some(INCONSISTENT_MESSAGE.to_owned()),
      });
    }

    story.status = StoryStatus::Published;
    story.published_at = Some(Utc::now());
    story.canon_level = story.canon_level.promoted();
    let story = self.store.update_story(story).await.map_err(Error::store)?;

    if let Some(mut writer) = self
      .store
      .get_writer(&story.writer_id)
      .await
      .map_err(Error::store)?
    {
      writer.reputation += PUBLISH_REPUTATION;
      self.store.update_writer(writer).await.map_err(Error::store)?;
    }

    tracing::info!(story_id = %story.id, canon_level = %story.canon_level, "published story");
    Ok(PublishOutcome { published: true, story, consistency, message: None })
  }

  pub async fn delete_story(&self, id: &StoryId) -> Result<()> {
    let removed = self.store.delete_story(id).await.map_err(Error::store)?;
    if !removed {
      return Err(Error::StoryNotFound(id.clone()));
    }
    tracing::info!(story_id = %id, "deleted story");
    Ok(())
  }

  /// Stories matching `query`, newest first.
  pub async fn list_stories(&self, query: &StoryQuery) -> Result<Vec<Story>> {
    let mut stories = match (&query.writer_id, query.status) {
      (None, None) => {
        return self
          .store
          .list_stories(query.limit, query.offset)
          .await
          .map_err(Error::store);
      }
      (Some(writer_id), _) => self
        .store
        .list_stories_by_writer(writer_id)
        .await
        .map_err(Error::store)?,
      (None, Some(status)) => self
        .store
        .list_stories_by_status(status)
        .await
        .map_err(Error::store)?,
    };

    if let Some(status) = query.status {
      stories.retain(|s| s.status == status);
    }

    // Filtered listings come back in insertion order; flip before the stable
    // sort so equal timestamps also end up newest first.
    stories.reverse();
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(stories.into_iter().skip(query.offset).take(query.limit).collect())
  }

  /// A continuation hint plus the world it was drawn from.
  pub async fn get_writing_assistance(
    &self,
    partial: &str,
    context: &serde_json::Map<String, serde_json::Value>,
  ) -> Result<WritingAssistance> {
    let assistant = self.assistant().await?;
    let suggestion = assistant.suggest_continuation(partial, context).to_owned();
    Ok(WritingAssistance { suggestion, world_context: assistant.into_world() })
  }
}
