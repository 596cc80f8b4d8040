//! A keyed collection that remembers insertion order.

use std::{collections::HashMap, hash::Hash};

use crate::{Error, Result};

/// A stored record type.
pub(crate) trait Record: Clone {
  type Id: Clone + Eq + Hash + ToString;

  /// Used in error messages.
  const KIND: &'static str;

  fn id(&self) -> &Self::Id;
}

struct Row<T> {
  /// Monotonic insertion sequence; survives updates.
  seq:    u64,
  record: T,
}

/// Id → record, listable in insertion order.
pub(crate) struct Table<T: Record> {
  rows:     HashMap<T::Id, Row<T>>,
  next_seq: u64,
}

impl<T: Record> Default for Table<T> {
  fn default() -> Self { Self { rows: HashMap::new(), next_seq: 0 } }
}

impl<T: Record> Table<T> {
  pub fn get(&self, id: &T::Id) -> Option<T> {
    self.rows.get(id).map(|row| row.record.clone())
  }

  pub fn insert(&mut self, record: T) -> Result<T> {
    let id = record.id().clone();
    if self.rows.contains_key(&id) {
      return Err(Error::AlreadyExists { kind: T::KIND, id: id.to_string() });
    }
    let seq = self.next_seq;
    self.next_seq += 1;
    self.rows.insert(id, Row { seq, record: record.clone() });
    Ok(record)
  }

  pub fn replace(&mut self, record: T) -> Result<T> {
    match self.rows.get_mut(record.id()) {
      Some(row) => {
        row.record = record.clone();
        Ok(record)
      }
      None => Err(Error::NotFound {
        kind: T::KIND,
        id:   record.id().to_string(),
      }),
    }
  }

  pub fn remove(&mut self, id: &T::Id) -> bool { self.rows.remove(id).is_some() }

  /// Records satisfying `pred`, oldest insertion first.
  pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
    let mut rows: Vec<&Row<T>> =
      self.rows.values().filter(|row| pred(&row.record)).collect();
    rows.sort_by_key(|row| row.seq);
    rows.into_iter().map(|row| row.record.clone()).collect()
  }

  pub fn all(&self) -> Vec<T> { self.filter(|_| true) }

  pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
    self.filter(pred).into_iter().next()
  }
}
