//! The persisted user-data record.
//!
//! Everything about the signed-in user lives in one JSON document stored
//! under a single storage key:
//!
//! ```json
//! { "user": { "id": "...", "email": "...", "name": "..." },
//!   "enrolledCourses": ["course-id"],
//!   "courseProgress": {
//!     "course-id": {
//!       "completedLessons": ["lesson-id"],
//!       "quizScores": { "quiz-id": { "score": 1, "totalQuestions": 2, "answers": {} } },
//!       "overallProgress": 25 } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Result, identity::Identity, progress::CourseProgress};

/// The storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "learnFlowUserData";

/// A full snapshot of persisted user state. Always written as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
  #[serde(default)]
  pub user:             Option<Identity>,
  #[serde(default)]
  pub enrolled_courses: Vec<String>,
  #[serde(default)]
  pub course_progress:  BTreeMap<String, CourseProgress>,
}

impl UserData {
  /// A record for a freshly signed-up identity: no enrollments, no progress.
  pub fn fresh(user: Identity) -> Self {
    Self { user: Some(user), ..Self::default() }
  }

  pub fn decode(raw: &str) -> Result<Self> { Ok(serde_json::from_str(raw)?) }

  pub fn encode(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }
}
