use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_KEY;

/// Name of the project-local data directory.
pub const DATA_DIR: &str = ".notepin";

/// Overrides the data directory when set.
pub const DIR_ENV: &str = "NOTEPIN_DIR";

/// Overrides the storage key when set.
pub const KEY_ENV: &str = "NOTEPIN_KEY";

/// Where notes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the storage files
    pub data_dir: PathBuf,
    /// Key the note collection is stored under
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            storage_key: DEFAULT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Config rooted at `root` (data directory is `root/.notepin`).
    pub fn at(root: &Path) -> Self {
        Self {
            data_dir: root.join(DATA_DIR),
            ..Self::default()
        }
    }

    /// Resolve the config for the current process.
    ///
    /// `NOTEPIN_DIR` wins when set; otherwise the nearest ancestor of the
    /// working directory holding `.notepin/` or `.git/` is the project root.
    pub fn discover() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve(
            &cwd,
            env::var_os(DIR_ENV).map(PathBuf::from),
            env::var(KEY_ENV).ok(),
        )
    }

    fn resolve(cwd: &Path, dir_override: Option<PathBuf>, key_override: Option<String>) -> Self {
        let mut config = match dir_override.filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => Self {
                data_dir: dir,
                ..Self::default()
            },
            None => Self::at(&find_project_root(cwd)),
        };

        if let Some(key) = key_override.filter(|k| !k.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
        }

        config
    }
}

/// Find the project root by looking for .notepin/ or .git/
fn find_project_root(cwd: &Path) -> PathBuf {
    let mut current = cwd;
    loop {
        if current.join(DATA_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd.to_path_buf(),
        }
    }
}
