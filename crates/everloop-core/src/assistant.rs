//! The writing assistant: keyword heuristics over a world snapshot.
//!
//! Nothing here understands language. Consistency checking is a set lookup
//! plus substring search, tag suggestion is a fixed keyword table, and the
//! continuation "suggestion" is a constant. The tables below are the
//! behaviour; changing them changes which tags stories get.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  canon::{CanonRule, MAGIC_SYSTEM},
  id::CanonRuleId,
  story::Manuscript,
  world::WorldLore,
};

/// Summaries longer than this many characters are truncated.
pub const SUMMARY_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// How many leading words of a magic-system rule are matched against story
/// content.
const RULE_KEYWORD_COUNT: usize = 5;

/// Tag → keywords. Order is significant: suggested tags follow it.
const TAG_KEYWORDS: &[(&str, &[&str])] = &[
  ("time_loop", &["loop", "repeat", "again", "cycle"]),
  ("magic", &["spell", "magic", "enchant", "sorcery"]),
  ("adventure", &["quest", "journey", "explore", "travel"]),
  ("mystery", &["mystery", "secret", "hidden", "unknown"]),
  ("conflict", &["battle", "fight", "war", "conflict"]),
];

const CONTINUATION: &str = "Continue developing your story while keeping in \
  mind the Everloop universe's core themes of time loops and reality bending. \
  Consider how your character's actions might create ripples across \
  different timelines.";

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Outcome of [`WritingAssistant::check_canon_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
  /// `true` iff `issues` is empty. Suggestions never affect it.
  pub consistent:  bool,
  pub issues:      Vec<String>,
  pub suggestions: Vec<String>,
}

/// Outcome of [`WritingAssistant::validate_world_rules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleValidation {
  pub valid:      bool,
  pub violations: Vec<String>,
  pub warnings:   Vec<String>,
}

// ─── Assistant ───────────────────────────────────────────────────────────────

/// Text helpers bound to one [`WorldLore`] snapshot. Build a new one when the
/// canon may have changed.
#[derive(Debug, Clone)]
pub struct WritingAssistant {
  world: WorldLore,
  /// Canon rule id → index into `world.canon_rules`.
  index: HashMap<CanonRuleId, usize>,
}

impl WritingAssistant {
  pub fn new(world: WorldLore) -> Self {
    let index = world
      .canon_rules
      .iter()
      .enumerate()
      .map(|(i, rule)| (rule.id.clone(), i))
      .collect();
    Self { world, index }
  }

  pub fn world(&self) -> &WorldLore { &self.world }

  pub fn into_world(self) -> WorldLore { self.world }

  fn rule(&self, id: &CanonRuleId) -> Option<&CanonRule> {
    self.index.get(id).map(|&i| &self.world.canon_rules[i])
  }

  /// Flag references to canon that does not exist, and suggest magic-system
  /// rules the text seems to touch but does not reference.
  pub fn check_canon_consistency(
    &self,
    story: &impl Manuscript,
  ) -> ConsistencyReport {
    let referenced = story.referenced_canon();

    let issues: Vec<String> = referenced
      .iter()
      .filter(|id| !self.index.contains_key(*id))
      .map(|id| format!("Referenced canon rule '{id}' does not exist"))
      .collect();

    let content = story.content().to_lowercase();
    let suggestions = self
      .world
      .canon_rules
      .iter()
      .filter(|rule| rule.category == MAGIC_SYSTEM)
      .filter(|rule| !referenced.contains(&rule.id))
      .filter(|rule| {
        rule
          .content
          .to_lowercase()
          .split_whitespace()
          .take(RULE_KEYWORD_COUNT)
          .any(|word| content.contains(word))
      })
      .map(|rule| {
        format!(
          "Story might relate to canon rule '{}'. Consider adding it to \
           referenced canon.",
          rule.title
        )
      })
      .collect();

    ConsistencyReport { consistent: issues.is_empty(), issues, suggestions }
  }

  /// A continuation hint for a story in progress. The inputs are accepted
  /// for API stability and currently ignored.
  pub fn suggest_continuation(
    &self,
    _partial: &str,
    _context: &serde_json::Map<String, serde_json::Value>,
  ) -> &'static str {
    CONTINUATION
  }

  /// The first [`SUMMARY_MAX_CHARS`] characters of `content`, with `...`
  /// appended when anything was cut.
  pub fn generate_summary(&self, content: &str) -> String {
    match content.char_indices().nth(SUMMARY_MAX_CHARS) {
      None => content.to_owned(),
      Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
    }
  }

  /// Keyword-table tags first, then the categories of referenced canon rules,
  /// each tag at most once.
  pub fn suggest_tags(&self, story: &impl Manuscript) -> Vec<String> {
    let content = story.content().to_lowercase();

    let mut tags: Vec<String> = TAG_KEYWORDS
      .iter()
      .filter(|(_, keywords)| keywords.iter().any(|k| content.contains(k)))
      .map(|(tag, _)| (*tag).to_owned())
      .collect();

    for rule in story.referenced_canon().iter().filter_map(|id| self.rule(id)) {
      if !tags.contains(&rule.category) {
        tags.push(rule.category.clone());
      }
    }

    tags
  }

  /// Check content against the world's rules. Always valid for now.
  pub fn validate_world_rules(&self, _content: &str) -> RuleValidation {
    RuleValidation { valid: true, violations: Vec::new(), warnings: Vec::new() }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::{
    id::{StoryId, WriterId},
    story::{CanonLevel, Story, StoryStatus},
    world::WorldSettings,
  };

  fn rule(id: &str, title: &str, category: &str, content: &str) -> CanonRule {
    CanonRule {
      id:          id.into(),
      title:       title.into(),
      description: String::new(),
      category:    category.into(),
      content:     content.into(),
      references:  Vec::new(),
      created_at:  Utc::now(),
      updated_at:  Utc::now(),
    }
  }

  fn story(content: &str, referenced: &[&str]) -> Story {
    Story {
      id:               StoryId::from("s1"),
      title:            "Test".into(),
      writer_id:        WriterId::from("w1"),
      content:          content.into(),
      summary:          String::new(),
      status:           StoryStatus::Draft,
      canon_level:      CanonLevel::Sandbox,
      tags:             Vec::new(),
      referenced_canon: referenced.iter().map(|&r| r.into()).collect(),
      created_at:       Utc::now(),
      updated_at:       Utc::now(),
      published_at:     None,
    }
  }

  fn assistant(rules: Vec<CanonRule>) -> WritingAssistant {
    WritingAssistant::new(WorldLore::new(WorldSettings::default(), rules))
  }

  // ── Consistency ───────────────────────────────────────────────────────────

  #[test]
  fn unrelated_story_is_consistent() {
    let a = assistant(vec![rule("r1", "Test Rule", MAGIC_SYSTEM, "magic spell enchant")]);
    let report = a.check_canon_consistency(&story("A simple story without issues", &[]));
    assert!(report.consistent);
    assert!(report.issues.is_empty());
    assert!(report.suggestions.is_empty());
  }

  #[test]
  fn missing_reference_is_an_issue() {
    let a = assistant(Vec::new());
    let report =
      a.check_canon_consistency(&story("Test content", &["nonexistent-rule"]));
    assert!(!report.consistent);
    assert_eq!(
      report.issues,
      vec!["Referenced canon rule 'nonexistent-rule' does not exist"]
    );
  }

  #[test]
  fn magic_keyword_overlap_is_only_a_suggestion() {
    let a = assistant(vec![rule(
      "r1",
      "Spellcraft",
      MAGIC_SYSTEM,
      "Every SPELL costs a memory of the caster",
    )]);
    let report =
      a.check_canon_consistency(&story("She wove a spell over the city.", &[]));
    assert!(report.consistent);
    assert_eq!(report.suggestions.len(), 1);
    assert!(report.suggestions[0].contains("'Spellcraft'"));
  }

  #[test]
  fn referenced_rule_is_not_suggested() {
    let a = assistant(vec![rule("r1", "Spellcraft", MAGIC_SYSTEM, "spell")]);
    let report = a.check_canon_consistency(&story("a spell", &["r1"]));
    assert!(report.consistent);
    assert!(report.suggestions.is_empty());
  }

  #[test]
  fn only_first_five_rule_words_count() {
    let a = assistant(vec![rule(
      "r1",
      "Late Keyword",
      MAGIC_SYSTEM,
      "one two three four five spell",
    )]);
    let report = a.check_canon_consistency(&story("a spell", &[]));
    assert!(report.suggestions.is_empty());
  }

  #[test]
  fn other_categories_are_not_scanned() {
    let a = assistant(vec![rule("r1", "Realms", "geography", "spell")]);
    let report = a.check_canon_consistency(&story("a spell", &[]));
    assert!(report.suggestions.is_empty());
  }

  // ── Summary ───────────────────────────────────────────────────────────────

  #[test]
  fn short_summary_is_unchanged() {
    let a = assistant(Vec::new());
    assert_eq!(a.generate_summary("This is a short story."), "This is a short story.");
    let exact = "x".repeat(SUMMARY_MAX_CHARS);
    assert_eq!(a.generate_summary(&exact), exact);
  }

  #[test]
  fn long_summary_is_truncated_with_ellipsis() {
    let a = assistant(Vec::new());
    let summary = a.generate_summary(&"A".repeat(300));
    assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + ELLIPSIS.len());
    assert!(summary.ends_with("..."));
  }

  #[test]
  fn summary_counts_characters_not_bytes() {
    let a = assistant(Vec::new());
    let summary = a.generate_summary(&"é".repeat(250));
    assert_eq!(summary.chars().count(), 203);
    assert!(summary.starts_with("éé"));
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  #[test]
  fn tags_follow_table_order() {
    let a = assistant(Vec::new());
    let tags = a.suggest_tags(&story(
      "The wizard cast a powerful SPELL that created a magical loop in time, \
       starting a new quest for the brave adventurer.",
      &[],
    ));
    assert_eq!(tags, vec!["time_loop", "magic", "adventure"]);
  }

  #[test]
  fn canon_categories_follow_keyword_tags_without_duplicates() {
    let a = assistant(vec![
      rule("r1", "Realms", "geography", "three realms"),
      rule("r2", "Spells", "magic", "spells"),
      rule("r3", "Code", "culture", "the code"),
    ]);
    let tags =
      a.suggest_tags(&story("a hidden spell", &["r3", "missing", "r2", "r1", "r3"]));
    assert_eq!(tags, vec!["magic", "mystery", "culture", "geography"]);
  }

  #[test]
  fn no_keywords_no_tags() {
    let a = assistant(Vec::new());
    assert!(a.suggest_tags(&story("Plain prose.", &[])).is_empty());
  }

  // ── Stubs ─────────────────────────────────────────────────────────────────

  #[test]
  fn continuation_is_fixed_text() {
    let a = assistant(Vec::new());
    let s = a.suggest_continuation("The hero walked into the forest", &Default::default());
    assert!(s.starts_with("Continue developing your story"));
    assert!(s.ends_with("different timelines."));
  }

  #[test]
  fn world_rules_always_valid() {
    let a = assistant(vec![rule("r1", "Any", MAGIC_SYSTEM, "anything")]);
    let v = a.validate_world_rules("Test content");
    assert!(v.valid);
    assert!(v.violations.is_empty());
    assert!(v.warnings.is_empty());
  }
}
