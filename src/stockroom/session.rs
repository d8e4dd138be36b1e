//! The logged-in session.
//!
//! A successful login writes `session.json` into the data directory; logout
//! removes it. Every invocation that needs a role reads it back.

use crate::error::{Result, StockroomError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            logged_in_at: Utc::now(),
        }
    }

    /// Read the current session, if any.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Option<Self>> {
        let path = data_dir.as_ref().join(SESSION_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(StockroomError::Io)?;
        let session = serde_json::from_str(&content).map_err(StockroomError::Serialization)?;
        Ok(Some(session))
    }

    /// Like [`load`](Self::load) but a missing session is an error.
    pub fn require<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::load(data_dir)?.ok_or(StockroomError::NotLoggedIn)
    }

    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let dir = data_dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(StockroomError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(StockroomError::Serialization)?;
        fs::write(dir.join(SESSION_FILENAME), content).map_err(StockroomError::Io)?;
        Ok(())
    }

    /// Remove the session. Returns whether one existed.
    pub fn clear<P: AsRef<Path>>(data_dir: P) -> Result<bool> {
        let path = data_dir.as_ref().join(SESSION_FILENAME);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).map_err(StockroomError::Io)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_clear() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Session::load(dir.path()).unwrap(), None);

        let session = Session::new("ann", "admin");
        session.save(dir.path()).unwrap();
        assert_eq!(Session::load(dir.path()).unwrap(), Some(session));

        assert!(Session::clear(dir.path()).unwrap());
        assert!(!Session::clear(dir.path()).unwrap());
    }

    #[test]
    fn require_without_session_is_not_logged_in() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Session::require(dir.path()),
            Err(StockroomError::NotLoggedIn)
        ));
    }
}
