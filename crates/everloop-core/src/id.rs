//! Opaque string identifiers for the three stored record types.
//!
//! Identifiers are caller-suppliable (`"w1"` is a valid writer id); the store
//! only generates one when the caller leaves it empty.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      /// A fresh hyphenated v4 UUID.
      pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self { Self(s) }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self { Self(s.to_owned()) }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str { &self.0 }
    }
  };
}

string_id! {
  /// Identifies a [`Writer`](crate::writer::Writer).
  WriterId
}

string_id! {
  /// Identifies a [`Story`](crate::story::Story).
  StoryId
}

string_id! {
  /// Identifies a [`CanonRule`](crate::canon::CanonRule).
  CanonRuleId
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generated_ids_are_distinct_uuids() {
    let a = StoryId::generate();
    let b = StoryId::generate();
    assert_ne!(a, b);
    assert!(Uuid::parse_str(a.as_str()).is_ok());
  }

  #[test]
  fn serialises_as_bare_string() {
    let id = WriterId::from("w1");
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""w1""#);
    let back: WriterId = serde_json::from_str(r#""w1""#).unwrap();
    assert_eq!(back, id);
  }
}
