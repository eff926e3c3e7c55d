//! Load/save contract for the persisted [`UserData`] snapshot.
//!
//! Storage failures never reach the caller: a missing, unreadable, or
//! corrupt record loads as [`UserData::default`], and a failed write or
//! removal is logged and reported as `false`.

use std::sync::Arc;

use learnflow_core::{record::UserData, store::SnapshotStore};

/// A handle on one storage key in a [`SnapshotStore`].
pub struct Snapshots<S> {
  store: Arc<S>,
  key:   String,
}

impl<S> Clone for Snapshots<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), key: self.key.clone() }
  }
}

impl<S: SnapshotStore> Snapshots<S> {
  pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
    Self { store, key: key.into() }
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn store(&self) -> &S { &self.store }

  /// Read the snapshot, falling back to the empty record on any failure.
  pub async fn load(&self) -> UserData {
    let raw = match self.store.read(&self.key).await {
      Ok(Some(raw)) => raw,
      Ok(None) => return UserData::default(),
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "snapshot read failed; using empty record");
        return UserData::default();
      }
    };

    UserData::decode(&raw).unwrap_or_else(|e| {
      tracing::warn!(key = %self.key, error = %e, "snapshot is corrupt; using empty record");
      UserData::default()
    })
  }

  /// Write `data` as the whole snapshot. Returns `false` if it was not
  /// persisted.
  pub async fn save(&self, data: &UserData) -> bool {
    let raw = match data.encode() {
      Ok(raw) => raw,
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "snapshot encode failed");
        return false;
      }
    };

    match self.store.write(&self.key, raw).await {
      Ok(()) => true,
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "snapshot write failed");
        false
      }
    }
  }

  /// Remove the snapshot entirely.
  pub async fn clear(&self) -> bool {
    match self.store.remove(&self.key).await {
      Ok(()) => true,
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "snapshot removal failed");
        false
      }
    }
  }
}
