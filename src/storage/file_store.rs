use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{NoteError, Result};

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create the data directory. Fails if it already exists.
    pub fn init(dir: &Path) -> Result<Self> {
        if dir.exists() {
            return Err(NoteError::AlreadyInitialized);
        }

        fs::create_dir_all(dir)?;
        tracing::debug!(dir = %dir.display(), "created data directory");

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Open an existing data directory.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(NoteError::NotInitialized);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(&['/', '\\', '\0'][..]);
        if !valid {
            return Err(NoteError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        // rename over the target so readers never see a half-written file
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage file");
        Ok(())
    }
}
