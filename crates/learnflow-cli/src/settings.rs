//! Runtime configuration, layered from an optional TOML file and
//! `LEARNFLOW_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use learnflow_core::{catalog::Catalog, record::DEFAULT_STORAGE_KEY};
use learnflow_ledger::LogoutPolicy;
use serde::Deserialize;

/// Settings for one `learnflow` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// SQLite file holding the snapshot. `~/` is expanded.
  pub store_path:    PathBuf,
  /// Key the snapshot is stored under.
  pub storage_key:   String,
  /// JSON catalog to load instead of the bundled one.
  pub catalog_path:  Option<PathBuf>,
  pub logout_policy: LogoutPolicy,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path:    PathBuf::from("learnflow.sqlite3"),
      storage_key:   DEFAULT_STORAGE_KEY.to_owned(),
      catalog_path:  None,
      logout_policy: LogoutPolicy::default(),
    }
  }
}

impl AppConfig {
  /// Read `path` (if it exists) and overlay the `LEARNFLOW_*` environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with(path, Some(config::Environment::with_prefix("LEARNFLOW")))
  }

  /// Read `path` (if it exists) and overlay `env`, if given.
  pub fn load_with(path: &Path, env: Option<config::Environment>) -> anyhow::Result<Self> {
    let mut builder =
      config::Config::builder().add_source(config::File::from(path).required(false));
    if let Some(env) = env {
      builder = builder.add_source(env);
    }
    let settings = builder
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;

    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.catalog_path = cfg.catalog_path.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  /// The configured catalog, or the bundled demo catalog.
  pub fn catalog(&self) -> anyhow::Result<Catalog> {
    match &self.catalog_path {
      Some(path) => {
        let raw = std::fs::read_to_string(path)
          .with_context(|| format!("reading catalog {}", path.display()))?;
        Catalog::from_json(&raw).with_context(|| format!("parsing catalog {}", path.display()))
      }
      None => Catalog::bundled().context("parsing bundled catalog"),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
