//! Unit tests for the catalog model, quiz scoring, and the progress formula.

use std::str::FromStr as _;

use crate::{
  Error,
  catalog::{Catalog, Course, Lesson, Quiz, QuizOption, QuizQuestion},
  identity::Identity,
  progress::{Answers, CourseProgress, LessonStatus, QuizResult, overall_progress},
  record::UserData,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn lesson(id: &str) -> Lesson {
  Lesson {
    id:       id.into(),
    title:    format!("Lesson {id}"),
    video_id: "vid".into(),
    duration: "10:00".into(),
    content:  None,
  }
}

fn question(id: &str, correct: &str) -> QuizQuestion {
  QuizQuestion {
    id:                id.into(),
    question_text:     format!("Question {id}?"),
    options:           vec![
      QuizOption { id: "a".into(), text: "A".into() },
      QuizOption { id: "b".into(), text: "B".into() },
    ],
    correct_option_id: correct.into(),
  }
}

fn quiz(id: &str, questions: Vec<QuizQuestion>) -> Quiz {
  Quiz { id: id.into(), title: format!("Quiz {id}"), lesson_id: None, questions }
}

fn course(id: &str, lessons: Vec<Lesson>, quizzes: Vec<Quiz>) -> Course {
  Course {
    id: id.into(),
    title: format!("Course {id}"),
    description: String::new(),
    instructor: String::new(),
    image_url: String::new(),
    category: String::new(),
    lessons,
    quizzes,
  }
}

fn answers(pairs: &[(&str, &str)]) -> Answers {
  pairs.iter().map(|(q, a)| ((*q).to_owned(), (*a).to_owned())).collect()
}

fn result_for(quiz: &Quiz, submitted: Answers) -> QuizResult {
  QuizResult {
    score:           quiz.score(&submitted),
    total_questions: quiz.question_count(),
    answers:         submitted,
  }
}

/// Two lessons, one quiz of two questions.
fn small_course() -> Course {
  course(
    "c1",
    vec![lesson("l1"), lesson("l2")],
    vec![quiz("q1", vec![question("qq1", "a"), question("qq2", "b")])],
  )
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

#[test]
fn quiz_score_counts_exact_matches() {
  let q = quiz("q1", vec![question("qq1", "a"), question("qq2", "b")]);
  assert_eq!(q.score(&answers(&[("qq1", "a"), ("qq2", "b")])), 2);
  assert_eq!(q.score(&answers(&[("qq1", "a"), ("qq2", "a")])), 1);
  assert_eq!(q.score(&answers(&[("qq1", "b"), ("qq2", "a")])), 0);
}

#[test]
fn quiz_score_treats_missing_answers_as_wrong() {
  let q = quiz("q1", vec![question("qq1", "a"), question("qq2", "b")]);
  assert_eq!(q.score(&answers(&[("qq2", "b")])), 1);
  assert_eq!(q.score(&Answers::new()), 0);
}

#[test]
fn quiz_score_ignores_unknown_questions() {
  let q = quiz("q1", vec![question("qq1", "a")]);
  assert_eq!(q.score(&answers(&[("qq1", "a"), ("nope", "a")])), 1);
}

// ─── Progress formula ────────────────────────────────────────────────────────

#[test]
fn half_the_lessons_and_half_the_quiz_is_fifty() {
  let c = small_course();
  let mut p = CourseProgress::default();

  assert!(p.complete_lesson(&c, "l1"));
  assert_eq!(p.overall_progress(), 25);

  let q = c.quiz("q1").unwrap().clone();
  p.record_quiz(&c, "q1", result_for(&q, answers(&[("qq1", "a"), ("qq2", "a")])));
  assert_eq!(p.overall_progress(), 50);
}

#[test]
fn everything_done_is_one_hundred() {
  let c = course(
    "c",
    vec![lesson("l1"), lesson("l2"), lesson("l3")],
    vec![
      quiz("q1", vec![question("a1", "a"), question("a2", "b")]),
      quiz("q2", vec![question("b1", "b"), question("b2", "a"), question("b3", "a")]),
    ],
  );
  let mut p = CourseProgress::default();
  for l in ["l1", "l2", "l3"] {
    p.complete_lesson(&c, l);
  }
  let q1 = c.quiz("q1").unwrap().clone();
  let q2 = c.quiz("q2").unwrap().clone();
  p.record_quiz(&c, "q1", result_for(&q1, answers(&[("a1", "a"), ("a2", "b")])));
  p.record_quiz(
    &c,
    "q2",
    result_for(&q2, answers(&[("b1", "b"), ("b2", "a"), ("b3", "a")])),
  );
  assert_eq!(p.overall_progress(), 100);
}

#[test]
fn empty_course_is_zero() {
  let c = course("empty", vec![], vec![]);
  let mut p = CourseProgress::default();
  p.recalculate(&c);
  assert_eq!(p.overall_progress(), 0);
  assert_eq!(overall_progress(&c, &p), 0);
}

#[test]
fn unattempted_quiz_counts_in_denominator() {
  let c = course("c", vec![], vec![quiz("q1", vec![question("qq1", "a"), question("qq2", "a")])]);
  assert_eq!(overall_progress(&c, &CourseProgress::default()), 0);

  let c = course(
    "c",
    vec![lesson("l1")],
    vec![quiz("q1", vec![question("qq1", "a"), question("qq2", "a")])],
  );
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l1");
  assert_eq!(p.overall_progress(), 50);
}

#[test]
fn lessons_only_course_scales_to_fifty() {
  let c = course("c", vec![lesson("l1"), lesson("l2")], vec![]);
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l1");
  p.complete_lesson(&c, "l2");
  assert_eq!(p.overall_progress(), 50);
}

#[test]
fn halves_round_up() {
  // One of four lessons: 12.5 -> 13.
  let c = course("c", vec![lesson("l1"), lesson("l2"), lesson("l3"), lesson("l4")], vec![]);
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l1");
  assert_eq!(p.overall_progress(), 13);
}

#[test]
fn thirds_round_to_nearest() {
  // One of three lessons: 16.67 -> 17; two of three: 33.33 -> 33.
  let c = course("c", vec![lesson("l1"), lesson("l2"), lesson("l3")], vec![]);
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l1");
  assert_eq!(p.overall_progress(), 17);
  p.complete_lesson(&c, "l2");
  assert_eq!(p.overall_progress(), 33);
}

#[test]
fn completing_a_lesson_twice_changes_nothing() {
  let c = small_course();
  let mut p = CourseProgress::default();
  assert!(p.complete_lesson(&c, "l1"));
  let before = p.clone();
  assert!(!p.complete_lesson(&c, "l1"));
  assert_eq!(p, before);
}

#[test]
fn resubmitting_a_worse_score_lowers_progress() {
  let c = small_course();
  let q = c.quiz("q1").unwrap().clone();
  let mut p = CourseProgress::default();

  p.record_quiz(&c, "q1", result_for(&q, answers(&[("qq1", "a"), ("qq2", "b")])));
  assert_eq!(p.overall_progress(), 50);

  p.record_quiz(&c, "q1", result_for(&q, answers(&[("qq1", "b")])));
  assert_eq!(p.overall_progress(), 0);
  assert_eq!(p.quiz_result("q1").unwrap().score, 0);
}

#[test]
fn stale_facts_do_not_escape_the_range() {
  // A snapshot written against a different catalog: unknown lessons and an
  // inflated score must not push progress past 100.
  let c = small_course();
  let raw = r#"{
    "completedLessons": ["l1", "l2", "gone-1", "gone-2"],
    "quizScores": { "q1": { "score": 9, "totalQuestions": 9, "answers": {} } },
    "overallProgress": 250
  }"#;
  let p: CourseProgress = serde_json::from_str(raw).unwrap();
  assert_eq!(overall_progress(&c, &p), 100);
}

#[test]
fn lesson_status_reflects_membership() {
  let c = small_course();
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l2");
  assert_eq!(p.lesson_status("l2"), LessonStatus::Completed);
  assert_eq!(p.lesson_status("l1"), LessonStatus::Pending);
}

#[test]
fn lesson_status_text_form() {
  assert_eq!(LessonStatus::Completed.to_string(), "completed");
  assert_eq!(LessonStatus::from_str("pending").unwrap(), LessonStatus::Pending);
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[test]
fn bundled_catalog_loads() {
  let catalog = Catalog::bundled().unwrap();
  assert_eq!(catalog.len(), 3);

  let next = catalog.course("nextjs-fundamentals").unwrap();
  assert_eq!(next.lessons.len(), 3);
  assert_eq!(next.total_questions(), 2);
  assert_eq!(next.quiz("q1").unwrap().lesson_id.as_deref(), Some("l1"));
  assert!(catalog.course("missing").is_none());
}

#[test]
fn catalog_rejects_duplicate_ids() {
  let err = Catalog::new(vec![small_course(), small_course()]).unwrap_err();
  assert!(matches!(err, Error::DuplicateCourse(id) if id == "c1"));
}

#[test]
fn catalog_accepts_minimal_courses() {
  let raw = r#"[{ "id": "bare", "title": "Bare" }]"#;
  let catalog = Catalog::from_json(raw).unwrap();
  let bare = catalog.course("bare").unwrap();
  assert!(bare.lessons.is_empty());
  assert!(bare.quizzes.is_empty());
}

#[test]
fn catalog_rejects_malformed_json() {
  assert!(matches!(Catalog::from_json("{"), Err(Error::Serialization(_))));
}

// ─── Persisted record ────────────────────────────────────────────────────────

#[test]
fn record_uses_camel_case_layout() {
  let c = small_course();
  let mut p = CourseProgress::default();
  p.complete_lesson(&c, "l1");

  let mut data = UserData::fresh(Identity {
    id:    "user_1".into(),
    email: "a@example.com".into(),
    name:  Some("A".into()),
  });
  data.enrolled_courses.push("c1".into());
  data.course_progress.insert("c1".into(), p);

  let value: serde_json::Value = serde_json::from_str(&data.encode().unwrap()).unwrap();
  assert_eq!(value["user"]["id"], "user_1");
  assert_eq!(value["enrolledCourses"][0], "c1");
  assert_eq!(value["courseProgress"]["c1"]["completedLessons"][0], "l1");
  assert_eq!(value["courseProgress"]["c1"]["overallProgress"], 25);
}

#[test]
fn record_tolerates_missing_fields() {
  let data = UserData::decode("{}").unwrap();
  assert_eq!(data, UserData::default());

  let data = UserData::decode(r#"{ "user": null, "courseProgress": { "c1": {} } }"#).unwrap();
  assert!(data.user.is_none());
  assert_eq!(data.course_progress["c1"].overall_progress(), 0);
}

#[test]
fn identity_display_name_falls_back_to_email() {
  let mut id = Identity { id: "u".into(), email: "e@example.com".into(), name: None };
  assert_eq!(id.display_name(), "e@example.com");
  id.name = Some("Eve".into());
  assert_eq!(id.display_name(), "Eve");
}
