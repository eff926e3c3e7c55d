//! The `SnapshotStore` trait.
//!
//! A minimal key-value contract over text values. The identity and ledger
//! layers (`learnflow-ledger`) keep one [`UserData`](crate::record::UserData)
//! document per storage key and depend on this abstraction, not on any
//! concrete backend (e.g. `learnflow-store-sqlite`).

use std::future::Future;

/// Abstraction over a persisted key-value store for snapshot documents.
///
/// Writes replace the whole value for a key; there is no partial update and
/// no merge. Concurrent writers are last-writer-wins.
pub trait SnapshotStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`. Returns `None` if absent.
  fn read<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any existing value.
  fn write<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the value under `key`. Removing an absent key is not an error.
  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
