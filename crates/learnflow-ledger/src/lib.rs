//! Identity and enrollment/progress bookkeeping for LearnFlow.
//!
//! [`IdentityProvider`] owns the signed-in [`Identity`]; [`Ledger`] owns the
//! enrollments and per-course progress for that identity. Both persist the
//! same [`UserData`] snapshot through a [`Snapshots`] handle over any
//! [`SnapshotStore`]. [`Session`] wires the two together and is the surface
//! front ends call.
//!
//! Failures are recovered here: storage problems are logged and swallowed,
//! idempotent no-ops report `false`, and only [`Ledger::submit_quiz`] returns
//! a typed error.
//!
//! [`Identity`]: learnflow_core::identity::Identity
//! [`UserData`]: learnflow_core::record::UserData
//! [`SnapshotStore`]: learnflow_core::store::SnapshotStore

pub mod error;
pub mod identity;
pub mod ledger;
pub mod session;
pub mod snapshots;

pub use error::LedgerError;
pub use identity::{IdentityProvider, LogoutPolicy};
pub use ledger::Ledger;
pub use session::Session;
pub use snapshots::Snapshots;
