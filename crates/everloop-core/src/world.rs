//! The world: universe metadata plus the live canon.
//!
//! [`WorldLore`] is never stored. Stores hold only [`WorldSettings`] and build
//! the lore on every read from whatever canon rules exist at that moment.

use serde::{Deserialize, Serialize};

use crate::canon::CanonRule;

/// Descriptive metadata for the universe. Missing fields take the Everloop
/// defaults when deserialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub setting:     String,
  pub themes:      Vec<String>,
}

impl Default for WorldSettings {
  fn default() -> Self {
    Self {
      id:          "everloop_world".to_owned(),
      name:        "Everloop".to_owned(),
      description: "A fantasy universe where time loops and reality bends."
        .to_owned(),
      setting:     String::new(),
      themes:      Vec::new(),
    }
  }
}

/// A snapshot of the world: metadata plus every canon rule, in creation
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldLore {
  #[serde(flatten)]
  pub settings:    WorldSettings,
  pub canon_rules: Vec<CanonRule>,
}

impl WorldLore {
  pub fn new(settings: WorldSettings, canon_rules: Vec<CanonRule>) -> Self {
    Self { settings, canon_rules }
  }
}
