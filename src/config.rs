use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the database file.
pub const DB_PATH_VAR: &str = "KBASE_DB_PATH";

/// Environment variable holding the default log filter.
pub const LOG_VAR: &str = "KBASE_LOG";

/// Filter used when neither `RUST_LOG` nor `KBASE_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "kbase=info";

/// Runtime configuration for the `kbase` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the SQLite database file.
    pub db_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive applied when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KBASE_DB_PATH`: database file (default `{data_dir}/kbase/knowledge.db`)
    /// - `KBASE_LOG`: log filter (default `kbase=info`)
    pub fn from_env() -> Result<Self> {
        let db_path = match std::env::var_os(DB_PATH_VAR) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let log_filter = std::env::var(LOG_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }

    /// Ensures the parent directory of the database file exists.
    pub fn ensure_database_directory(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
        Ok(())
    }
}

/// Gets the cross-platform database path.
///
/// Returns `{data_dir}/kbase/knowledge.db` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("kbase").join("knowledge.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn from_env_reads_overrides() {
        unsafe {
            std::env::set_var(DB_PATH_VAR, "/tmp/kb-test/questions.db");
            std::env::set_var(LOG_VAR, "kbase=debug");
        }

        let config = Config::from_env().unwrap();

        unsafe {
            std::env::remove_var(DB_PATH_VAR);
            std::env::remove_var(LOG_VAR);
        }

        assert_eq!(config.db_path, PathBuf::from("/tmp/kb-test/questions.db"));
        assert_eq!(config.log_filter, "kbase=debug");
    }

    #[test]
    #[serial]
    fn from_env_falls_back_to_defaults() {
        unsafe {
            std::env::remove_var(DB_PATH_VAR);
            std::env::set_var(LOG_VAR, "  ");
        }

        let config = Config::from_env();

        unsafe { std::env::remove_var(LOG_VAR) };

        // No data dir on some CI sandboxes; only check when one resolves.
        if let Ok(config) = config {
            assert!(config.db_path.ends_with("kbase/knowledge.db"));
            assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        }
    }

    #[test]
    fn ensure_database_directory_creates_parents() {
        let dir = tempdir().unwrap();
        let config = Config {
            db_path: dir.path().join("nested").join("deeper").join("kb.db"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        };

        config.ensure_database_directory().unwrap();

        assert!(dir.path().join("nested").join("deeper").is_dir());
    }
}
