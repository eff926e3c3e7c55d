//! [`Session`]: one identity provider and one ledger over a shared
//! snapshot.
//!
//! Every identity change is followed by [`Ledger::attach`] (or
//! [`Ledger::attach_record`] after signup), so the ledger always reflects the
//! identity currently signed in.

use std::sync::Arc;

use learnflow_core::{
  catalog::Catalog, identity::Identity, record::UserData, store::SnapshotStore,
};

use crate::{
  identity::{IdentityProvider, LogoutPolicy},
  ledger::Ledger,
  snapshots::Snapshots,
};

pub struct Session<S> {
  snapshots: Snapshots<S>,
  identity:  IdentityProvider<S>,
  ledger:    Ledger<S>,
}

impl<S: SnapshotStore> Session<S> {
  /// Build a session over `store` and restore whatever identity is persisted
  /// under `storage_key`.
  pub async fn open(
    store: Arc<S>,
    storage_key: impl Into<String>,
    catalog: Arc<Catalog>,
    logout_policy: LogoutPolicy,
  ) -> Self {
    let snapshots = Snapshots::new(store, storage_key);
    let mut session = Self {
      identity:  IdentityProvider::new(snapshots.clone(), logout_policy),
      ledger:    Ledger::new(catalog, snapshots.clone()),
      snapshots,
    };

    let restored = session.identity.restore().await.cloned();
    session.ledger.attach(restored).await;
    session
  }

  /// The backing store.
  pub fn store(&self) -> &S { self.snapshots.store() }

  pub fn storage_key(&self) -> &str { self.snapshots.key() }

  pub fn current_user(&self) -> Option<&Identity> { self.identity.current() }

  pub fn ledger(&self) -> &Ledger<S> { &self.ledger }

  pub fn ledger_mut(&mut self) -> &mut Ledger<S> { &mut self.ledger }

  pub async fn login(&mut self, email: &str, password: &str) -> Identity {
    let identity = self.identity.establish_identity(email, password).await;
    self.ledger.attach(Some(identity.clone())).await;
    identity
  }

  pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Identity {
    let identity = self.identity.create_identity(name, email, password).await;
    self.ledger.attach_record(identity.clone(), UserData::fresh(identity.clone()));
    identity
  }

  pub async fn logout(&mut self) {
    self.identity.clear_identity().await;
    self.ledger.attach(None).await;
  }

  pub async fn update_profile(&mut self, name: &str, email: &str) -> bool {
    if !self.identity.update_identity(name, email).await {
      return false;
    }
    if let Some(current) = self.identity.current().cloned() {
      self.ledger.refresh_identity(current);
    }
    true
  }
}
