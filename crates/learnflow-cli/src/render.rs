//! Plain-text rendering of catalog and ledger state.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use learnflow_core::{catalog::Course, identity::Identity, store::SnapshotStore};
use learnflow_ledger::Ledger;

const BAR_WIDTH: usize = 20;

/// `[#####---------------]  25%`
pub fn progress_bar(percent: u8) -> String {
  let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
  format!(
    "[{}{}] {percent:>3}%",
    "#".repeat(filled),
    "-".repeat(BAR_WIDTH - filled)
  )
}

pub fn identity(identity: &Identity) -> String {
  format!("{} <{}> ({})", identity.display_name(), identity.email, identity.id)
}

/// Footer naming when the snapshot was last written.
pub fn saved_at(at: Option<DateTime<Utc>>) -> String {
  match at {
    Some(at) => format!("last saved {}\n", at.format("%Y-%m-%d %H:%M:%S UTC")),
    None => "not saved yet\n".to_owned(),
  }
}

/// One line per catalog course, marking enrollments.
pub fn course_list<S: SnapshotStore>(ledger: &Ledger<S>) -> String {
  let mut out = String::new();
  for course in ledger.courses() {
    let marker = if ledger.is_enrolled(&course.id) { "*" } else { " " };
    let _ = write!(out, "{marker} {:<28} {}", course.id, course.title);
    if ledger.is_enrolled(&course.id) {
      let _ = write!(out, "  {}", progress_bar(ledger.get_course_progress(&course.id)));
    }
    out.push('\n');
  }
  out
}

/// Course header, lessons with their status, and quizzes with last results.
pub fn course_detail<S: SnapshotStore>(ledger: &Ledger<S>, course: &Course) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{} ({})", course.title, course.id);
  if !course.instructor.is_empty() {
    let _ = writeln!(out, "  by {} · {}", course.instructor, course.category);
  }
  if !course.description.is_empty() {
    let _ = writeln!(out, "  {}", course.description);
  }

  if ledger.is_enrolled(&course.id) {
    let _ = writeln!(out, "  {}", progress_bar(ledger.get_course_progress(&course.id)));
  } else {
    let _ = writeln!(out, "  not enrolled");
  }

  let _ = writeln!(out, "\nLessons:");
  for lesson in &course.lessons {
    let status = ledger.get_lesson_status(&course.id, &lesson.id);
    let _ = writeln!(
      out,
      "  {:<6} {:<32} {:>6}  {status}",
      lesson.id, lesson.title, lesson.duration
    );
  }

  let _ = writeln!(out, "\nQuizzes:");
  for quiz in &course.quizzes {
    let result = match ledger.get_quiz_result(&course.id, &quiz.id) {
      Some(r) => format!("{}/{}", r.score, r.total_questions),
      None => "not attempted".to_owned(),
    };
    let _ = writeln!(
      out,
      "  {:<6} {:<32} {} questions  {result}",
      quiz.id,
      quiz.title,
      quiz.question_count()
    );
  }
  out
}
