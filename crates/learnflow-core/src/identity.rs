//! The signed-in user's profile record.

use serde::{Deserialize, Serialize};

/// The currently signed-in user.
///
/// Only one identity is resident at a time; the persisted record holds it
/// alongside that user's enrollments and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  /// Opaque, stable identifier.
  pub id:    String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
}

impl Identity {
  /// The name to show for this identity, falling back to the email address.
  pub fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.email)
  }
}
