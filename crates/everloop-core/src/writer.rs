//! Writer: an author contributing stories to the shared universe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::WriterId;

/// A registered writer. Counters are mutated by story events, never by the
/// writer directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Writer {
  pub id:            WriterId,
  /// Unique within a store.
  pub username:      String,
  pub email:         String,
  pub created_at:    DateTime<Utc>,
  /// Incremented once per created story.
  pub stories_count: u32,
  /// Incremented by [`PUBLISH_REPUTATION`] per published story.
  pub reputation:    i64,
}

/// Reputation awarded to a writer each time one of their stories is
/// published.
pub const PUBLISH_REPUTATION: i64 = 10;

/// Input to [`crate::store::StoryStore::create_writer`].
/// `created_at` and the counters are always set by the store.
#[derive(Debug, Clone)]
pub struct NewWriter {
  /// Caller-chosen id; the store generates one when `None`.
  pub id:       Option<WriterId>,
  pub username: String,
  pub email:    String,
}

impl NewWriter {
  pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
    Self { id: None, username: username.into(), email: email.into() }
  }

  pub fn with_id(mut self, id: impl Into<WriterId>) -> Self {
    self.id = Some(id.into());
    self
  }
}
