//! Error types for `everloop-core`.

use thiserror::Error;

use crate::{
  id::{CanonRuleId, StoryId, WriterId},
  story::StoryStatus,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("Writer {0} not found")]
  WriterNotFound(WriterId),

  /// A story referenced a writer that does not exist. Distinct from
  /// [`Error::WriterNotFound`] because it is a problem with the input, not a
  /// missing resource.
  #[error("Writer {0} not found")]
  UnknownWriter(WriterId),

  #[error("Story {0} not found")]
  StoryNotFound(StoryId),

  #[error("Canon rule {0} not found")]
  CanonRuleNotFound(CanonRuleId),

  #[error("Username {0} already exists")]
  DuplicateUsername(String),

  #[error("Canon rule {0} already exists")]
  DuplicateCanonRule(CanonRuleId),

  #[error("cannot publish a story that is {0}")]
  InvalidTransition(StoryStatus),

  #[error("{0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error. Used as `.map_err(Error::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// `true` for the variants that mean "the addressed resource is absent".
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::WriterNotFound(_) | Self::StoryNotFound(_) | Self::CanonRuleNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
