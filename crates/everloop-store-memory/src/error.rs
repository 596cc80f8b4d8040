//! Error type for `everloop-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A create call supplied an id that is already stored.
  #[error("{kind} {id} already exists")]
  AlreadyExists { kind: &'static str, id: String },

  /// A writer with this username is already stored.
  #[error("username {0} already exists")]
  UsernameTaken(String),

  /// An update named a record that is not stored.
  #[error("{kind} {id} not found")]
  NotFound { kind: &'static str, id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
