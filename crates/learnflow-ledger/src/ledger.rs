//! The enrollment & progress ledger.
//!
//! The ledger keeps, for the attached identity, the ordered list of enrolled
//! course ids and one [`CourseProgress`] per enrolled course. Every mutation
//! goes through [`CourseProgress`]'s mutators (which recompute the derived
//! percentage) and then writes the whole snapshot back.

use std::{collections::BTreeMap, sync::Arc};

use learnflow_core::{
  catalog::{Catalog, Course},
  identity::Identity,
  progress::{Answers, CourseProgress, LessonStatus, QuizResult, QuizScore},
  record::UserData,
  store::SnapshotStore,
};

use crate::{error::LedgerError, snapshots::Snapshots};

pub struct Ledger<S> {
  catalog:   Arc<Catalog>,
  snapshots: Snapshots<S>,
  identity:  Option<Identity>,
  enrolled:  Vec<String>,
  progress:  BTreeMap<String, CourseProgress>,
}

impl<S: SnapshotStore> Ledger<S> {
  /// A detached ledger; call [`Ledger::attach`] once an identity is known.
  pub fn new(catalog: Arc<Catalog>, snapshots: Snapshots<S>) -> Self {
    Self {
      catalog,
      snapshots,
      identity: None,
      enrolled: Vec::new(),
      progress: BTreeMap::new(),
    }
  }

  /// Point the ledger at `identity` and reload its enrollments and progress
  /// from the snapshot. With `None` the in-memory state is emptied.
  pub async fn attach(&mut self, identity: Option<Identity>) {
    match identity {
      Some(identity) => {
        let data = self.snapshots.load().await;
        self.attach_record(identity, data);
      }
      None => {
        self.identity = None;
        self.enrolled.clear();
        self.progress.clear();
      }
    }
  }

  /// Point the ledger at `identity` using `data` as its enrollments and
  /// progress, without reading storage. The `user` field of `data` is
  /// ignored.
  ///
  /// Loaded percentages are recomputed against the current catalog.
  pub fn attach_record(&mut self, identity: Identity, data: UserData) {
    self.identity = Some(identity);
    self.enrolled.clear();
    for course_id in data.enrolled_courses {
      if !self.enrolled.contains(&course_id) {
        self.enrolled.push(course_id);
      }
    }
    self.progress = data.course_progress;

    for (course_id, progress) in &mut self.progress {
      if let Some(course) = self.catalog.course(course_id) {
        progress.recalculate(course);
      }
    }
  }

  /// Swap in updated profile fields for the attached identity without
  /// reloading. Ignored if `identity` is not the attached one.
  pub fn refresh_identity(&mut self, identity: Identity) {
    if self.identity.as_ref().is_some_and(|i| i.id == identity.id) {
      self.identity = Some(identity);
    }
  }

  pub fn identity(&self) -> Option<&Identity> { self.identity.as_ref() }

  // ── Catalog queries ───────────────────────────────────────────────────────

  pub fn courses(&self) -> &[Course] { self.catalog.courses() }

  pub fn get_course_by_id(&self, course_id: &str) -> Option<&Course> {
    self.catalog.course(course_id)
  }

  /// Catalog entries the identity is enrolled in, in catalog order.
  pub fn enrolled_courses(&self) -> Vec<&Course> {
    self
      .catalog
      .courses()
      .iter()
      .filter(|c| self.is_enrolled(&c.id))
      .collect()
  }

  // ── Enrollment ────────────────────────────────────────────────────────────

  pub fn is_enrolled(&self, course_id: &str) -> bool {
    self.enrolled.iter().any(|id| id == course_id)
  }

  /// Enroll in `course_id` with zeroed progress. Returns `false` without an
  /// identity, for an unknown course, or when already enrolled.
  pub async fn enroll(&mut self, course_id: &str) -> bool {
    if self.identity.is_none() || self.is_enrolled(course_id) {
      return false;
    }
    if self.catalog.course(course_id).is_none() {
      tracing::debug!(course_id, "enroll: course not in catalog");
      return false;
    }

    self.enrolled.push(course_id.to_owned());
    self.progress.insert(course_id.to_owned(), CourseProgress::default());
    self.persist().await;

    tracing::debug!(course_id, "enrolled");
    true
  }

  // ── Lessons ───────────────────────────────────────────────────────────────

  /// Mark a lesson complete. Returns `true` only if the ledger changed.
  ///
  /// A no-op without an identity, when not enrolled, when the lesson is not
  /// part of the course, or when it is already complete.
  pub async fn complete_lesson(&mut self, course_id: &str, lesson_id: &str) -> bool {
    if self.identity.is_none() || !self.is_enrolled(course_id) {
      return false;
    }
    let catalog = Arc::clone(&self.catalog);
    let Some(course) = catalog.course(course_id) else {
      return false;
    };
    if course.lesson(lesson_id).is_none() {
      tracing::debug!(course_id, lesson_id, "complete_lesson: lesson not in course");
      return false;
    }
    let Some(progress) = self.progress.get_mut(course_id) else {
      return false;
    };
    if !progress.complete_lesson(course, lesson_id) {
      return false;
    }

    let overall = progress.overall_progress();
    self.persist().await;

    tracing::debug!(course_id, lesson_id, overall, "lesson completed");
    true
  }

  pub fn get_lesson_status(&self, course_id: &str, lesson_id: &str) -> LessonStatus {
    self
      .progress
      .get(course_id)
      .map_or(LessonStatus::Pending, |p| p.lesson_status(lesson_id))
  }

  // ── Quizzes ───────────────────────────────────────────────────────────────

  /// Score and store a quiz submission, replacing any earlier result.
  pub async fn submit_quiz(
    &mut self,
    course_id: &str,
    quiz_id: &str,
    answers: Answers,
  ) -> Result<QuizScore, LedgerError> {
    if self.identity.is_none() {
      return Err(LedgerError::Unauthenticated);
    }
    let catalog = Arc::clone(&self.catalog);
    let course = catalog
      .course(course_id)
      .ok_or_else(|| LedgerError::CourseNotFound(course_id.to_owned()))?;
    let quiz = course.quiz(quiz_id).ok_or_else(|| LedgerError::QuizNotFound {
      course_id: course_id.to_owned(),
      quiz_id:   quiz_id.to_owned(),
    })?;
    let progress = self
      .progress
      .get_mut(course_id)
      .ok_or_else(|| LedgerError::NotEnrolled(course_id.to_owned()))?;

    let result = QuizResult {
      score: quiz.score(&answers),
      total_questions: quiz.question_count(),
      answers,
    };
    let score = result.as_score();
    progress.record_quiz(course, quiz_id, result);

    let overall = progress.overall_progress();
    self.persist().await;

    tracing::debug!(
      course_id,
      quiz_id,
      score = score.score,
      total = score.total_questions,
      overall,
      "quiz submitted"
    );
    Ok(score)
  }

  pub fn get_quiz_result(&self, course_id: &str, quiz_id: &str) -> Option<&QuizResult> {
    self.progress.get(course_id)?.quiz_result(quiz_id)
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  /// Overall percentage for `course_id`, or 0 without a progress record.
  pub fn get_course_progress(&self, course_id: &str) -> u8 {
    self
      .progress
      .get(course_id)
      .map_or(0, CourseProgress::overall_progress)
  }

  pub fn course_progress(&self, course_id: &str) -> Option<&CourseProgress> {
    self.progress.get(course_id)
  }

  // ── Persistence ───────────────────────────────────────────────────────────

  fn snapshot(&self) -> UserData {
    UserData {
      user:             self.identity.clone(),
      enrolled_courses: self.enrolled.clone(),
      course_progress:  self.progress.clone(),
    }
  }

  async fn persist(&self) {
    if !self.snapshots.save(&self.snapshot()).await {
      tracing::warn!("ledger change kept in memory only");
    }
  }
}
