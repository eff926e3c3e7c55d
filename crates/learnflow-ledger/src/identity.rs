//! The identity provider: establishes, updates, and clears the signed-in
//! user.
//!
//! There is no password verification. Login fabricates a demo identity and
//! signup mints a fresh one; credentials are accepted and ignored.

use learnflow_core::{identity::Identity, record::UserData, store::SnapshotStore};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::snapshots::Snapshots;

/// Id given to the identity fabricated by [`IdentityProvider::establish_identity`].
pub const DEMO_USER_ID: &str = "user_123";
/// Display name given to the fabricated demo identity.
pub const DEMO_USER_NAME: &str = "Demo User";

/// What logout removes from the persisted record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogoutPolicy {
  /// Clear only the identity; enrollments and progress stay stored under
  /// the key and reappear on the next login.
  #[default]
  RetainProgress,
  /// Remove the whole record under the key.
  ClearAll,
}

/// Holds the signed-in identity, backed by the persisted snapshot.
pub struct IdentityProvider<S> {
  snapshots:     Snapshots<S>,
  logout_policy: LogoutPolicy,
  current:       Option<Identity>,
}

impl<S: SnapshotStore> IdentityProvider<S> {
  pub fn new(snapshots: Snapshots<S>, logout_policy: LogoutPolicy) -> Self {
    Self { snapshots, logout_policy, current: None }
  }

  pub fn current(&self) -> Option<&Identity> { self.current.as_ref() }

  pub fn logout_policy(&self) -> LogoutPolicy { self.logout_policy }

  /// Load whatever identity is persisted under the key.
  pub async fn restore(&mut self) -> Option<&Identity> {
    self.current = self.snapshots.load().await.user;
    self.current.as_ref()
  }

  /// Log in. Always succeeds: the demo identity is stored with `email`,
  /// replacing any stored identity but keeping stored enrollments and
  /// progress.
  pub async fn establish_identity(&mut self, email: &str, _credential: &str) -> Identity {
    let identity = Identity {
      id:    DEMO_USER_ID.to_owned(),
      email: email.to_owned(),
      name:  Some(DEMO_USER_NAME.to_owned()),
    };

    let mut data = self.snapshots.load().await;
    data.user = Some(identity.clone());
    self.snapshots.save(&data).await;

    tracing::debug!(id = %identity.id, "identity established");
    self.current = Some(identity.clone());
    identity
  }

  /// Sign up. Mints a new identity with a unique id and replaces everything
  /// stored under the key with an empty record for it.
  pub async fn create_identity(
    &mut self,
    name: &str,
    email: &str,
    _credential: &str,
  ) -> Identity {
    let identity = Identity {
      id:    format!("user_{}", Uuid::new_v4().simple()),
      email: email.to_owned(),
      name:  Some(name.to_owned()),
    };

    self.snapshots.save(&UserData::fresh(identity.clone())).await;

    tracing::debug!(id = %identity.id, "identity created");
    self.current = Some(identity.clone());
    identity
  }

  /// Log out according to the configured [`LogoutPolicy`].
  pub async fn clear_identity(&mut self) {
    match self.logout_policy {
      LogoutPolicy::ClearAll => {
        self.snapshots.clear().await;
      }
      LogoutPolicy::RetainProgress => {
        let mut data = self.snapshots.load().await;
        if data.user.take().is_some() {
          self.snapshots.save(&data).await;
        }
      }
    }

    if let Some(old) = self.current.take() {
      tracing::debug!(id = %old.id, policy = %self.logout_policy, "identity cleared");
    }
  }

  /// Replace the name and email of the signed-in identity. Returns `false`
  /// when nobody is signed in.
  pub async fn update_identity(&mut self, name: &str, email: &str) -> bool {
    let Some(current) = self.current.as_mut() else {
      return false;
    };
    current.name = Some(name.to_owned());
    current.email = email.to_owned();
    let updated = current.clone();

    let mut data = self.snapshots.load().await;
    data.user = Some(updated);
    self.snapshots.save(&data).await;

    tracing::debug!(id = %current.id, "identity updated");
    true
  }
}
