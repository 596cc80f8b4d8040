use std::sync::Arc;

use crate::{
  Error, Result,
  canon::{CanonRule, CanonRulePatch, NewCanonRule},
  id::CanonRuleId,
  store::StoryStore,
};

/// Curation of canon rules.
pub struct CanonService<S> {
  store: Arc<S>,
}

impl<S> Clone for CanonService<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: StoryStore> CanonService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Create a rule. A caller-supplied id that is already taken fails with
  /// [`Error::DuplicateCanonRule`].
  pub async fn create_canon_rule(&self, input: NewCanonRule) -> Result<CanonRule> {
    let requested = input.id.clone();
    if let Some(id) = &requested {
      self.ensure_id_free(id).await?;
    }

    let rule = match self.store.create_canon_rule(input).await {
      Ok(rule) => rule,
      Err(e) => {
        // Lost a race for the same id.
        if let Some(id) = &requested {
          self.ensure_id_free(id).await?;
        }
        return Err(Error::store(e));
      }
    };
    tracing::info!(rule_id = %rule.id, category = %rule.category, "created canon rule");
    Ok(rule)
  }

  async fn ensure_id_free(&self, id: &CanonRuleId) -> Result<()> {
    let existing = self.store.get_canon_rule(id).await.map_err(Error::store)?;
    match existing {
      Some(_) => Err(Error::DuplicateCanonRule(id.clone())),
      None => Ok(()),
    }
  }

  pub async fn get_canon_rule(&self, id: &CanonRuleId) -> Result<CanonRule> {
    self
      .store
      .get_canon_rule(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::CanonRuleNotFound(id.clone()))
  }

  /// All rules, or only those in `category`.
  pub async fn list_canon_rules(
    &self,
    category: Option<&str>,
  ) -> Result<Vec<CanonRule>> {
    let rules = match category {
      Some(category) => self.store.list_canon_rules_by_category(category).await,
      None => self.store.list_canon_rules().await,
    };
    rules.map_err(Error::store)
  }

  pub async fn update_canon_rule(
    &self,
    id: &CanonRuleId,
    patch: CanonRulePatch,
  ) -> Result<CanonRule> {
    let mut rule = self.get_canon_rule(id).await?;
    patch.apply(&mut rule);
    self.store.update_canon_rule(rule).await.map_err(Error::store)
  }

  /// Remove a rule. Stories that reference it become inconsistent.
  pub async fn delete_canon_rule(&self, id: &CanonRuleId) -> Result<()> {
    let removed = self
      .store
      .delete_canon_rule(id)
      .await
      .map_err(Error::store)?;
    if !removed {
      return Err(Error::CanonRuleNotFound(id.clone()));
    }
    tracing::info!(rule_id = %id, "deleted canon rule");
    Ok(())
  }
}
