//! # Storage Layer
//!
//! Every entity type (products, users, roles) lives in its own flat JSON file:
//! a top-level array of objects. A [`RecordStore`] loads the whole array into
//! memory when it is opened, serves reads from memory, and rewrites the whole
//! file after every mutation.
//!
//! ## Pieces
//!
//! - [`Record`]: what a stored entity must provide (key, searchable fields,
//!   shallow-merge patch). Implemented in [`crate::model`].
//! - [`backend::StorageBackend`]: raw read/write of one record array.
//!   - [`fs_backend::FsBackend`]: one JSON file on disk (production)
//!   - [`mem_backend::MemBackend`]: a JSON string in memory (testing)
//! - [`record_store::RecordStore`]: the in-memory collection plus the
//!   add / update / delete / find / search operations.
//!
//! ## Storage Format
//!
//! ```text
//! <data-dir>/
//! ├── products.json   # [{"product_id": ..., "name": ..., ...}, ...]
//! ├── users.json
//! └── roles.json
//! ```
//!
//! ## Known Limitations
//!
//! There is no locking. Two processes writing the same file will race and the
//! last writer wins; the loser's change is silently dropped. Each write goes
//! to a temporary file that is then renamed over the target, so a crash never
//! leaves a half-written array behind, but it does not make concurrent use safe.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use record_store::RecordStore;

/// A flat entity stored as one object in a JSON array.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned {
    /// Searchable fields of this entity.
    type Field: Copy + Debug;

    /// Partial update applied by [`RecordStore::update`].
    type Patch;

    /// Human-readable entity name, used in errors and logs.
    const ENTITY: &'static str;

    /// The identifying key used by find, update and delete.
    fn key(&self) -> &str;

    /// The name shown to people (product name, username, role name).
    fn label(&self) -> &str;

    /// Text of one field, used for substring search.
    fn field_text(&self, field: Self::Field) -> String;

    /// Shallow-merge the fields present in `patch` into this record.
    fn apply(&mut self, patch: &Self::Patch);
}

pub type ProductStore<B> = RecordStore<crate::model::Product, B>;
pub type UserStore<B> = RecordStore<crate::model::User, B>;
pub type RoleStore<B> = RecordStore<crate::model::Role, B>;
