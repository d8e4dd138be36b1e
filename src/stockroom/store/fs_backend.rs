use super::backend::StorageBackend;
use crate::error::{Result, StockroomError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(StockroomError::Io)?;
        }
        Ok(parent)
    }

    fn tmp_path(&self, dir: &Path) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("records");
        dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn read_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Err(StockroomError::StoreUnavailable {
                path: self.path.clone(),
            });
        }
        let content = fs::read_to_string(&self.path).map_err(StockroomError::Io)?;
        serde_json::from_str(&content).map_err(|source| StockroomError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    fn write_records<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let dir = self.ensure_parent()?;
        let content =
            serde_json::to_string_pretty(records).map_err(StockroomError::Serialization)?;

        // Atomic write
        let tmp_file = self.tmp_path(&dir);
        fs::write(&tmp_file, content).map_err(StockroomError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(StockroomError::Io(e));
        }

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
