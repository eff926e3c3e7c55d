//! Catalog types: the static, read-only set of courses.
//!
//! The catalog is supplied once at startup (from a JSON file or the bundled
//! default) and is never mutated afterwards. Field names follow the JSON
//! layout used by the catalog files (`camelCase`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, progress::Answers};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

// ─── Lessons ─────────────────────────────────────────────────────────────────

/// A single video lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub id:       String,
  pub title:    String,
  /// Reference to the hosted video (a YouTube id in the bundled catalog).
  pub video_id: String,
  /// Human-readable running time, e.g. `"10:32"`.
  pub duration: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content:  Option<String>,
}

// ─── Quizzes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
  pub id:   String,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id:                String,
  #[serde(default)]
  pub question_text:     String,
  pub options:           Vec<QuizOption>,
  pub correct_option_id: String,
}

impl QuizQuestion {
  /// Whether `chosen` is the correct option for this question.
  pub fn is_correct(&self, chosen: Option<&str>) -> bool {
    chosen == Some(self.correct_option_id.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
  pub id:        String,
  #[serde(default)]
  pub title:     String,
  /// The lesson this quiz accompanies, if any.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lesson_id: Option<String>,
  pub questions: Vec<QuizQuestion>,
}

impl Quiz {
  pub fn question_count(&self) -> u32 { self.questions.len() as u32 }

  /// Score a submission: one point per question whose chosen option equals
  /// the correct option. Unanswered questions score nothing; answers for
  /// unknown question ids are ignored.
  pub fn score(&self, answers: &Answers) -> u32 {
    self
      .questions
      .iter()
      .filter(|q| q.is_correct(answers.get(&q.id).map(String::as_str)))
      .count() as u32
  }
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  pub id:          String,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub instructor:  String,
  #[serde(default)]
  pub image_url:   String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub lessons:     Vec<Lesson>,
  #[serde(default)]
  pub quizzes:     Vec<Quiz>,
}

impl Course {
  pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
    self.lessons.iter().find(|l| l.id == lesson_id)
  }

  pub fn quiz(&self, quiz_id: &str) -> Option<&Quiz> {
    self.quizzes.iter().find(|q| q.id == quiz_id)
  }

  /// Sum of question counts across every quiz in the course.
  pub fn total_questions(&self) -> u32 {
    self.quizzes.iter().map(Quiz::question_count).sum()
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// An ordered, read-only list of courses with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
  courses: Vec<Course>,
}

impl Catalog {
  /// Build a catalog, rejecting duplicate course ids.
  pub fn new(courses: Vec<Course>) -> Result<Self> {
    let mut seen = HashSet::new();
    for course in &courses {
      if !seen.insert(course.id.as_str()) {
        return Err(Error::DuplicateCourse(course.id.clone()));
      }
    }
    Ok(Self { courses })
  }

  /// Parse a catalog from a JSON array of courses.
  pub fn from_json(raw: &str) -> Result<Self> {
    let courses: Vec<Course> = serde_json::from_str(raw)?;
    Self::new(courses)
  }

  /// The demo catalog shipped with the crate.
  pub fn bundled() -> Result<Self> { Self::from_json(BUNDLED_CATALOG) }

  pub fn courses(&self) -> &[Course] { &self.courses }

  pub fn course(&self, course_id: &str) -> Option<&Course> {
    self.courses.iter().find(|c| c.id == course_id)
  }

  pub fn len(&self) -> usize { self.courses.len() }

  pub fn is_empty(&self) -> bool { self.courses.is_empty() }
}
