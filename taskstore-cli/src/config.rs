//! Configuration loading for taskctl
//!
//! Sources, highest priority first:
//! 1. `--database-url` / `DATABASE_URL` (after `.env` files are loaded)
//! 2. `[database]` table of the TOML config (`--config` or ~/.taskctl/config.toml)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use taskstore::ConnectionConfig;
use tracing::debug;

/// Outcome of reading one `.env` file
pub type EnvFileResult = (PathBuf, dotenvy::Result<()>);

/// Load `.env` from the current directory, then ~/.taskctl/.env.
///
/// Runs before the subscriber exists, so nothing is logged here; the caller
/// reports the returned outcomes once tracing is up. dotenvy never
/// overwrites variables that are already set, so the first file to define
/// a key wins and the real environment beats both.
pub fn load_dotenv() -> Vec<EnvFileResult> {
    let mut candidates = vec![PathBuf::from(".env")];
    candidates.extend(config_dir().map(|dir| dir.join(".env")));
    load_env_files(&candidates)
}

/// Load each existing file in order; missing files are skipped.
fn load_env_files(candidates: &[PathBuf]) -> Vec<EnvFileResult> {
    candidates
        .iter()
        .filter(|path| path.is_file())
        .map(|path| (path.clone(), dotenvy::from_path(path)))
        .collect()
}

/// ~/.taskctl
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taskctl"))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskctlConfig {
    #[serde(default)]
    pub database: Option<ConnectionConfig>,
}

impl TaskctlConfig {
    /// Load from `path`, or from the default location if `path` is None.
    ///
    /// An explicit path must exist; a missing default file is an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                bail!("Config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Where to connect
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// URL or key/value descriptor
    Descriptor(String),
    Config(ConnectionConfig),
}

pub fn resolve_target(database_url: Option<String>, config: TaskctlConfig) -> Result<Target> {
    if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
        return Ok(Target::Descriptor(url));
    }
    match config.database {
        Some(db) => Ok(Target::Config(db)),
        None => bail!(
            "No database configured. Set --database-url / DATABASE_URL, \
             or add a [database] table to ~/.taskctl/config.toml"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_beats_config_file() {
        let config = TaskctlConfig {
            database: Some(ConnectionConfig::default()),
        };
        let target = resolve_target(Some("dbname=tasks".into()), config).unwrap();
        assert_eq!(target, Target::Descriptor("dbname=tasks".into()));
    }

    #[test]
    fn falls_back_to_config_file() {
        let config = TaskctlConfig {
            database: Some(ConnectionConfig::default()),
        };
        let target = resolve_target(Some("  ".into()), config).unwrap();
        assert_eq!(target, Target::Config(ConnectionConfig::default()));
    }

    #[test]
    fn nothing_configured_is_an_error() {
        let err = resolve_target(None, TaskctlConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No database configured"));
    }

    #[test]
    fn loads_database_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nhost = \"pg.local\"\ndbname = \"tasks\"\nsslmode = \"disable\"\nmax_connections = 2"
        )
        .unwrap();

        let config = TaskctlConfig::load(Some(file.path())).unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.host, "pg.local");
        assert_eq!(db.dbname, "tasks");
        assert_eq!(db.max_connections, 2);
        assert_eq!(db.port, 5432);
    }

    #[test]
    fn env_files_load_in_order_and_skip_missing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.env");
        let second = dir.path().join("second.env");
        std::fs::write(&first, "TASKCTL_ENV_ORDER_CHECK=first\n").unwrap();
        std::fs::write(&second, "TASKCTL_ENV_ORDER_CHECK=second\n").unwrap();

        let missing = dir.path().join("absent.env");
        let loaded = load_env_files(&[first.clone(), missing, second.clone()]);

        let paths: Vec<_> = loaded.iter().map(|(path, _)| path.clone()).collect();
        assert_eq!(paths, vec![first, second]);
        assert!(loaded.iter().all(|(_, result)| result.is_ok()));
        assert_eq!(std::env::var("TASKCTL_ENV_ORDER_CHECK").unwrap(), "first");
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join(".env");
        std::fs::write(&bad, "TASKCTL_ENV_BAD_CHECK='unterminated\n").unwrap();

        let loaded = load_env_files(&[bad]);
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].1.is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(TaskctlConfig::load(Some(&missing)).is_err());
    }
}
