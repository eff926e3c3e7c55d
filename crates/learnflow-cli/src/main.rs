//! `learnflow`: command-line front end for the LearnFlow ledger.
//!
//! Every invocation opens the configured SQLite store, restores the persisted
//! identity, runs one command, and exits.
//!
//! # Usage
//!
//! ```text
//! learnflow signup --name Ada --email ada@example.com
//! learnflow enroll nextjs-fundamentals
//! learnflow complete nextjs-fundamentals l1
//! learnflow quiz nextjs-fundamentals q1 -a qq1=a -a qq2=b
//! learnflow progress
//! ```

mod render;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use learnflow_core::progress::Answers;
use learnflow_ledger::Session;
use learnflow_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "learnflow", version, about = "Courses, lessons, quizzes, and progress")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "learnflow.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Sign in (no password check; any credentials are accepted).
  Login {
    #[arg(long)]
    email:    String,
    #[arg(long, default_value = "")]
    password: String,
  },
  /// Create a new identity, replacing all stored state.
  Signup {
    #[arg(long)]
    name:     String,
    #[arg(long)]
    email:    String,
    #[arg(long, default_value = "")]
    password: String,
  },
  /// Sign out.
  Logout,
  /// Show the signed-in identity.
  Whoami,
  /// Change the signed-in identity's name and email.
  Profile {
    #[arg(long)]
    name:  String,
    #[arg(long)]
    email: String,
  },
  /// List the catalog; enrolled courses are marked with `*`.
  Courses,
  /// Show one course with lesson and quiz status.
  Course { course_id: String },
  /// Enroll in a course.
  Enroll { course_id: String },
  /// Mark a lesson complete.
  Complete { course_id: String, lesson_id: String },
  /// Submit quiz answers as `QUESTION=OPTION` pairs.
  Quiz {
    course_id: String,
    quiz_id:   String,
    #[arg(short = 'a', long = "answer", value_parser = parse_answer)]
    answers:   Vec<(String, String)>,
  },
  /// Show progress for one course, or every enrolled course.
  Progress { course_id: Option<String> },
}

/// Parse `qq1=a` into `("qq1", "a")`.
fn parse_answer(raw: &str) -> Result<(String, String), String> {
  match raw.split_once('=') {
    Some((q, a)) if !q.is_empty() && !a.is_empty() => Ok((q.to_owned(), a.to_owned())),
    _ => Err(format!("expected QUESTION=OPTION, got {raw:?}")),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;
  let catalog = Arc::new(cfg.catalog()?);

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  tracing::debug!(store = ?cfg.store_path, key = %cfg.storage_key, "store opened");

  let mut session =
    Session::open(Arc::new(store), cfg.storage_key.clone(), catalog, cfg.logout_policy).await;

  let output = run(cli.command, &mut session).await?;
  print!("{output}");
  Ok(())
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run(command: Command, session: &mut Session<SqliteStore>) -> anyhow::Result<String> {
  let out = match command {
    Command::Login { email, password } => {
      let identity = session.login(&email, &password).await;
      format!("signed in as {}\n", render::identity(&identity))
    }
    Command::Signup { name, email, password } => {
      let identity = session.signup(&name, &email, &password).await;
      format!("created {}\n", render::identity(&identity))
    }
    Command::Logout => {
      session.logout().await;
      "signed out\n".to_owned()
    }
    Command::Whoami => match session.current_user() {
      Some(identity) => {
        let saved_at = session
          .store()
          .updated_at(session.storage_key())
          .await
          .context("reading snapshot timestamp")?;
        format!("{}\n{}", render::identity(identity), render::saved_at(saved_at))
      }
      None => "not signed in\n".to_owned(),
    },
    Command::Profile { name, email } => {
      if !session.update_profile(&name, &email).await {
        bail!("not signed in");
      }
      "profile updated\n".to_owned()
    }
    Command::Courses => render::course_list(session.ledger()),
    Command::Course { course_id } => {
      let ledger = session.ledger();
      let course = ledger
        .get_course_by_id(&course_id)
        .with_context(|| format!("no course {course_id:?}"))?;
      render::course_detail(ledger, course)
    }
    Command::Enroll { course_id } => {
      require_identity(session)?;
      if session.ledger().get_course_by_id(&course_id).is_none() {
        bail!("no course {course_id:?}");
      }
      if !session.ledger_mut().enroll(&course_id).await {
        bail!("already enrolled in {course_id}");
      }
      format!("enrolled in {course_id}\n")
    }
    Command::Complete { course_id, lesson_id } => {
      require_identity(session)?;
      let ledger = session.ledger_mut();
      if !ledger.is_enrolled(&course_id) {
        bail!("not enrolled in {course_id}");
      }
      if ledger.complete_lesson(&course_id, &lesson_id).await {
        format!(
          "completed {lesson_id}  {}\n",
          render::progress_bar(ledger.get_course_progress(&course_id))
        )
      } else {
        format!("nothing to do for {lesson_id} (unknown or already complete)\n")
      }
    }
    Command::Quiz { course_id, quiz_id, answers } => {
      let answers: Answers = answers.into_iter().collect();
      let ledger = session.ledger_mut();
      let score = ledger.submit_quiz(&course_id, &quiz_id, answers).await?;
      format!(
        "scored {}/{}  {}\n",
        score.score,
        score.total_questions,
        render::progress_bar(ledger.get_course_progress(&course_id))
      )
    }
    Command::Progress { course_id } => {
      require_identity(session)?;
      let ledger = session.ledger();
      let line = |id: &str| {
        format!("{id:<28} {}\n", render::progress_bar(ledger.get_course_progress(id)))
      };
      match course_id {
        Some(id) => line(&id),
        None => ledger.enrolled_courses().into_iter().map(|c| line(&c.id)).collect(),
      }
    }
  };
  Ok(out)
}

fn require_identity(session: &Session<SqliteStore>) -> anyhow::Result<()> {
  if session.current_user().is_none() {
    bail!("not signed in (run `learnflow login` or `learnflow signup`)");
  }
  Ok(())
}
