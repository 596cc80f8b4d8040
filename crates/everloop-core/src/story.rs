//! Stories and their publication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::id::{CanonRuleId, StoryId, WriterId};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Where a story sits in its lifecycle.
///
/// `draft → in_review → published → archived`. Only publication is driven by
/// the engine today; see [`crate::service::StoryService::publish_story`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoryStatus {
  #[default]
  Draft,
  InReview,
  Published,
  Archived,
}

impl StoryStatus {
  /// Whether `publish` may move a story out of this state.
  pub fn is_publishable(self) -> bool {
    matches!(self, Self::Draft | Self::InReview)
  }
}

/// How official a story is.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CanonLevel {
  /// Official, foundational lore.
  Core,
  /// Official but supplementary.
  Expanded,
  /// Community-contributed and verified by publication.
  Community,
  /// Experimental; every new story starts here.
  #[default]
  Sandbox,
}

impl CanonLevel {
  /// The level a story reaches on publication. Only sandbox stories move;
  /// nothing is ever demoted.
  pub fn promoted(self) -> Self {
    match self {
      Self::Sandbox => Self::Community,
      other => other,
    }
  }
}

// ─── Story ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
  pub id:               StoryId,
  pub title:            String,
  pub writer_id:        WriterId,
  pub content:          String,
  pub summary:          String,
  pub status:           StoryStatus,
  pub canon_level:      CanonLevel,
  pub tags:             Vec<String>,
  /// Canon rules the story claims to build on.
  pub referenced_canon: Vec<CanonRuleId>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
  pub published_at:     Option<DateTime<Utc>>,
}

/// Input to [`crate::store::StoryStore::create_story`].
///
/// New stories always start as [`StoryStatus::Draft`] at
/// [`CanonLevel::Sandbox`]; timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewStory {
  pub id:               Option<StoryId>,
  pub title:            String,
  pub writer_id:        WriterId,
  pub content:          String,
  pub summary:          String,
  pub tags:             Vec<String>,
  pub referenced_canon: Vec<CanonRuleId>,
}

/// The fields of a story a caller may change through an update. Status and
/// canon level only move through publication.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryPatch {
  pub title:            Option<String>,
  pub content:          Option<String>,
  pub tags:             Option<Vec<String>>,
  pub referenced_canon: Option<Vec<CanonRuleId>>,
}

impl StoryPatch {
  pub fn touches_content(&self) -> bool { self.content.is_some() }

  pub fn apply(self, story: &mut Story) {
    if let Some(title) = self.title {
      story.title = title;
    }
    if let Some(content) = self.content {
      story.content = content;
    }
    if let Some(tags) = self.tags {
      story.tags = tags;
    }
    if let Some(referenced_canon) = self.referenced_canon {
      story.referenced_canon = referenced_canon;
    }
  }
}

// ─── Manuscript ──────────────────────────────────────────────────────────────

/// The text and canon references the writing assistant inspects. Implemented
/// by both stored and not-yet-stored stories.
pub trait Manuscript {
  fn content(&self) -> &str;
  fn referenced_canon(&self) -> &[CanonRuleId];
}

impl Manuscript for Story {
  fn content(&self) -> &str { &self.content }
  fn referenced_canon(&self) -> &[CanonRuleId] { &self.referenced_canon }
}

impl Manuscript for NewStory {
  fn content(&self) -> &str { &self.content }
  fn referenced_canon(&self) -> &[CanonRuleId] { &self.referenced_canon }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn status_text_matches_wire_form() {
    assert_eq!(StoryStatus::InReview.to_string(), "in_review");
    assert_eq!(
      serde_json::to_string(&StoryStatus::InReview).unwrap(),
      r#""in_review""#
    );
    assert_eq!(StoryStatus::from_str("published").unwrap(), StoryStatus::Published);
    assert!(StoryStatus::from_str("lost").is_err());
  }

  #[test]
  fn only_sandbox_is_promoted() {
    assert_eq!(CanonLevel::Sandbox.promoted(), CanonLevel::Community);
    assert_eq!(CanonLevel::Core.promoted(), CanonLevel::Core);
    assert_eq!(CanonLevel::Expanded.promoted(), CanonLevel::Expanded);
    assert_eq!(CanonLevel::Community.promoted(), CanonLevel::Community);
  }

  #[test]
  fn patch_rejects_fields_outside_the_allow_list() {
    let err = serde_json::from_str::<StoryPatch>(r#"{"status":"published"}"#);
    assert!(err.is_err());

    let patch: StoryPatch =
      serde_json::from_str(r#"{"title":"New","tags":["a"]}"#).unwrap();
    assert!(!patch.touches_content());
    assert_eq!(patch.title.as_deref(), Some("New"));
  }
}
