use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O of a single record array.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (lookup, merge, search).
pub trait StorageBackend {
    /// Read the full array.
    /// Returns `StoreUnavailable` when nothing has been stored yet and
    /// `CorruptStore` when the content is not a valid array of `T`.
    fn read_records<T: DeserializeOwned>(&self) -> Result<Vec<T>>;

    /// Replace the full array.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_records<T: Serialize>(&self, records: &[T]) -> Result<()>;

    /// Whether anything has been stored yet.
    fn exists(&self) -> bool;

    /// Where the array lives. For FsBackend the real path, for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
