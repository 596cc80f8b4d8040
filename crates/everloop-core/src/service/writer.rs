use std::sync::Arc;

use crate::{
  Error, Result,
  id::WriterId,
  store::StoryStore,
  writer::{NewWriter, Writer},
};

/// Registration and lookup of writers.
pub struct WriterService<S> {
  store: Arc<S>,
}

impl<S> Clone for WriterService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: StoryStore> WriterService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Register a new writer. Fails with [`Error::DuplicateUsername`] if the
  /// username is taken in this store.
  pub async fn register_writer(
    &self,
    username: &str,
    email: &str,
  ) -> Result<Writer> {
    if username.trim().is_empty() {
      return Err(Error::Validation("username must not be empty".to_owned()));
    }

    self.ensure_username_free(username).await?;

    let writer = match self.store.create_writer(NewWriter::new(username, email)).await {
      Ok(writer) => writer,
      Err(e) => {
        // The store rejects a taken username under its own lock; report a
        // concurrent registration the same way as an earlier one.
        self.ensure_username_free(username).await?;
        return Err(Error::store(e));
      }
    };
    tracing::info!(writer_id = %writer.id, username, "registered writer");
    Ok(writer)
  }

  async fn ensure_username_free(&self, username: &str) -> Result<()> {
    let existing = self
      .store
      .get_writer_by_username(username)
      .await
      .map_err(Error::store)?;
    match existing {
      Some(_) => Err(Error::DuplicateUsername(username.to_owned())),
      None => Ok(()),
    }
  }

  pub async fn get_writer(&self, id: &WriterId) -> Result<Writer> {
    self
      .store
      .get_writer(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::WriterNotFound(id.clone()))
  }

  pub async fn list_writers(&self) -> Result<Vec<Writer>> {
    self.store.list_writers().await.map_err(Error::store)
  }
}
