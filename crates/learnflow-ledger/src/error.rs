//! Error type returned at the ledger boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
  #[error("no identity is established")]
  Unauthenticated,

  #[error("course not found: {0}")]
  CourseNotFound(String),

  #[error("quiz {quiz_id} not found in course {course_id}")]
  QuizNotFound { course_id: String, quiz_id: String },

  #[error("not enrolled in course {0}")]
  NotEnrolled(String),
}
