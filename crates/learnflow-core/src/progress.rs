//! Per-course progress records and the progress formula.
//!
//! A [`CourseProgress`] owns the raw facts (completed lessons, last quiz
//! results) and a derived `overall_progress` percentage. The percentage has
//! no setter: every mutator recomputes it through [`overall_progress`], so it
//! cannot drift from the formula.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::catalog::Course;

/// Submitted answers: question id -> chosen option id.
pub type Answers = BTreeMap<String, String>;

/// Share of the overall percentage carried by lessons, and by quizzes.
const HALF: u64 = 50;

// ─── Quiz results ────────────────────────────────────────────────────────────

/// The score tuple returned from a quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
  pub score:           u32,
  pub total_questions: u32,
}

/// The stored result of the most recent submission of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
  pub score:           u32,
  pub total_questions: u32,
  #[serde(default)]
  pub answers:         Answers,
}

impl QuizResult {
  pub fn as_score(&self) -> QuizScore {
    QuizScore { score: self.score, total_questions: self.total_questions }
  }
}

// ─── Lesson status ───────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LessonStatus {
  Completed,
  Pending,
}

// ─── Course progress ─────────────────────────────────────────────────────────

/// Progress of the signed-in identity through one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
  #[serde(default)]
  completed_lessons: BTreeSet<String>,
  #[serde(default)]
  quiz_scores:       BTreeMap<String, QuizResult>,
  #[serde(default)]
  overall_progress:  u8,
}

impl CourseProgress {
  pub fn completed_lessons(&self) -> &BTreeSet<String> { &self.completed_lessons }

  pub fn quiz_scores(&self) -> &BTreeMap<String, QuizResult> { &self.quiz_scores }

  pub fn quiz_result(&self, quiz_id: &str) -> Option<&QuizResult> {
    self.quiz_scores.get(quiz_id)
  }

  pub fn overall_progress(&self) -> u8 { self.overall_progress }

  pub fn lesson_status(&self, lesson_id: &str) -> LessonStatus {
    if self.completed_lessons.contains(lesson_id) {
      LessonStatus::Completed
    } else {
      LessonStatus::Pending
    }
  }

  /// Mark `lesson_id` complete. Returns `false` (and changes nothing) when the
  /// lesson was already complete.
  pub fn complete_lesson(&mut self, course: &Course, lesson_id: &str) -> bool {
    if !self.completed_lessons.insert(lesson_id.to_owned()) {
      return false;
    }
    self.recalculate(course);
    true
  }

  /// Store `result` as the result for `quiz_id`, replacing any earlier one.
  pub fn record_quiz(&mut self, course: &Course, quiz_id: &str, result: QuizResult) {
    self.quiz_scores.insert(quiz_id.to_owned(), result);
    self.recalculate(course);
  }

  /// Re-derive `overall_progress` from the raw facts.
  pub fn recalculate(&mut self, course: &Course) {
    self.overall_progress = overall_progress(course, self);
  }
}

// ─── Formula ─────────────────────────────────────────────────────────────────

/// Blend lesson completion and quiz performance into a 0..=100 percentage.
///
/// Lessons and quizzes each carry half the weight. Quizzes never attempted
/// still count their questions in the denominator. A course with no lessons
/// (or no quiz questions) contributes nothing for that half. The sum is
/// rounded to the nearest integer, halves rounding up.
///
/// Only lessons and quizzes present in `course` are counted, and stored
/// scores are clamped to their quiz's question count.
pub fn overall_progress(course: &Course, progress: &CourseProgress) -> u8 {
  let lessons_total = course.lessons.len() as u64;
  let lessons_done = course
    .lessons
    .iter()
    .filter(|l| progress.completed_lessons.contains(&l.id))
    .count() as u64;

  let (achieved, possible) =
    course.quizzes.iter().fold((0u64, 0u64), |(achieved, possible), quiz| {
      let questions = u64::from(quiz.question_count());
      let score = progress
        .quiz_scores
        .get(&quiz.id)
        .map_or(0, |r| u64::from(r.score).min(questions));
      (achieved + score, possible + questions)
    });

  // Exact rational arithmetic: num / den is the unrounded percentage.
  let (num, den) = match (lessons_total, possible) {
    (0, 0) => return 0,
    (l, 0) => (HALF * lessons_done, l),
    (0, p) => (HALF * achieved, p),
    (l, p) => (HALF * (lessons_done * p + achieved * l), l * p),
  };

  ((2 * num + den) / (2 * den)).min(100) as u8
}
