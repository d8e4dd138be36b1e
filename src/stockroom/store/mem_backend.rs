use super::backend::StorageBackend;
use crate::error::{Result, StockroomError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Keeps the serialized JSON rather than typed values so that tests go
/// through the same serde path as the file backend. Uses `RefCell` since
/// stockroom is single-threaded and the trait takes `&self`.
pub struct MemBackend {
    name: String,
    raw: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self::with_raw("[]")
    }
}

impl MemBackend {
    /// An initialized, empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend where nothing was ever stored (like a missing file).
    pub fn missing() -> Self {
        Self {
            name: "records".to_string(),
            raw: RefCell::new(None),
            simulate_write_error: Cell::new(false),
            writes: Cell::new(0),
        }
    }

    /// A backend pre-loaded with raw JSON, valid or not.
    pub fn with_raw(json: &str) -> Self {
        Self {
            raw: RefCell::new(Some(json.to_string())),
            ..Self::missing()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// The JSON last written (or seeded).
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    /// Replace the stored JSON, as another process writing the file would.
    pub fn overwrite(&self, json: &str) {
        *self.raw.borrow_mut() = Some(json.to_string());
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let raw = self.raw.borrow();
        let json = raw.as_deref().ok_or_else(|| StockroomError::StoreUnavailable {
            path: self.location(),
        })?;
        serde_json::from_str(json).map_err(|source| StockroomError::CorruptStore {
            path: self.location(),
            source,
        })
    }

    fn write_records<T: Serialize>(&self, records: &[T]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StockroomError::Store("Simulated write error".to_string()));
        }
        let json = serde_json::to_string_pretty(records)?;
        *self.raw.borrow_mut() = Some(json);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.raw.borrow().is_some()
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(format!("memory://{}.json", self.name))
    }
}
