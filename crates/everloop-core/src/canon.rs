//! Canon rules: the centrally curated facts of the universe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CanonRuleId;

/// The category whose rules are scanned for keyword overlap during a
/// consistency check.
pub const MAGIC_SYSTEM: &str = "magic_system";

/// A canonical fact. Rules are edited in place and may be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonRule {
  pub id:          CanonRuleId,
  pub title:       String,
  pub description: String,
  /// Free-form, e.g. `magic_system`, `geography`, `history`, `culture`.
  pub category:    String,
  pub content:     String,
  /// Other rules this one builds on.
  pub references:  Vec<CanonRuleId>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::StoryStore::create_canon_rule`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCanonRule {
  #[serde(default)]
  pub id:          Option<CanonRuleId>,
  pub title:       String,
  pub description: String,
  pub category:    String,
  pub content:     String,
  #[serde(default)]
  pub references:  Vec<CanonRuleId>,
}

/// A partial edit of a [`CanonRule`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonRulePatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub content:     Option<String>,
  pub references:  Option<Vec<CanonRuleId>>,
}

impl CanonRulePatch {
  pub fn apply(self, rule: &mut CanonRule) {
    if let Some(title) = self.title {
      rule.title = title;
    }
    if let Some(description) = self.description {
      rule.description = description;
    }
    if let Some(category) = self.category {
      rule.category = category;
    }
    if let Some(content) = self.content {
      rule.content = content;
    }
    if let Some(references) = self.references {
      rule.references = references;
    }
  }
}
