use super::backend::StorageBackend;
use super::Record;
use crate::error::{Result, StockroomError};
use tracing::{debug, info, warn};

/// An ordered, in-memory collection of one record type, mirrored to a backend.
///
/// The whole array is loaded on [`open`](Self::open) and rewritten after every
/// successful mutation. If a write fails the in-memory change is rolled back,
/// so memory never runs ahead of what was persisted.
pub struct RecordStore<T: Record, B: StorageBackend> {
    backend: B,
    records: Vec<T>,
}

impl<T: Record, B: StorageBackend> RecordStore<T, B> {
    /// Open a store, loading its full contents from the backend.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self {
            backend,
            records: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Discard the in-memory sequence and read it again from the backend.
    pub fn load(&mut self) -> Result<()> {
        self.records = self.backend.read_records()?;
        debug!(
            entity = T::ENTITY,
            count = self.records.len(),
            location = %self.backend.location().display(),
            "loaded records"
        );
        Ok(())
    }

    /// Overwrite the backend with the in-memory sequence.
    pub fn save(&self) -> Result<()> {
        self.backend.write_records(&self.records)?;
        debug!(
            entity = T::ENTITY,
            count = self.records.len(),
            "saved records"
        );
        Ok(())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a record and persist. Duplicate keys are allowed; lookups
    /// resolve to the earliest record with a given key.
    pub fn add(&mut self, record: T) -> Result<()> {
        if self.find_by_key(record.key()).is_some() {
            warn!(
                entity = T::ENTITY,
                key = record.key(),
                "adding record with a key that already exists"
            );
        }
        let key = record.key().to_string();
        self.records.push(record);
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        info!(entity = T::ENTITY, key = %key, "record added");
        Ok(())
    }

    /// First record whose key matches.
    pub fn find_by_key(&self, key: &str) -> Option<&T> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Shallow-merge `patch` into the first record with `key` and persist.
    pub fn update(&mut self, key: &str, patch: &T::Patch) -> Result<&T> {
        let idx = self
            .records
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| not_found::<T>(key))?;

        let previous = self.records[idx].clone();
        self.records[idx].apply(patch);
        if let Err(e) = self.save() {
            self.records[idx] = previous;
            return Err(e);
        }
        info!(entity = T::ENTITY, key = %key, "record updated");
        Ok(&self.records[idx])
    }

    /// Remove every record with `key` and persist. Returns how many were removed.
    pub fn delete(&mut self, key: &str) -> Result<usize> {
        let before = self.records.len();
        let kept: Vec<T> = self
            .records
            .iter()
            .filter(|r| r.key() != key)
            .cloned()
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Err(not_found::<T>(key));
        }

        let previous = std::mem::replace(&mut self.records, kept);
        if let Err(e) = self.save() {
            self.records = previous;
            return Err(e);
        }
        info!(entity = T::ENTITY, key = %key, removed, "record deleted");
        Ok(removed)
    }

    /// Case-insensitive substring match on one field, in stored order.
    pub fn search(&self, query: &str, field: T::Field) -> Vec<&T> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.field_text(field).to_lowercase().contains(&needle))
            .collect()
    }
}

fn not_found<T: Record>(key: &str) -> StockroomError {
    StockroomError::NotFound {
        entity: T::ENTITY,
        key: key.to_string(),
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Product, Role, User};
    use crate::store::{MemBackend, ProductStore, RecordStore, RoleStore, UserStore};

    pub fn product(id: &str, name: &str, category: &str, price: f64, stock: u64) -> Product {
        Product {
            product_id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock_quantity: stock,
        }
    }

    pub fn user(id: &str, username: &str, password: &str, role: &str) -> User {
        User {
            user_id: id.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    pub fn role(id: &str, name: &str, level: &str) -> Role {
        Role {
            role_id: id.to_string(),
            name: name.to_string(),
            permission_level: level.to_string(),
        }
    }

    pub fn product_store(products: Vec<Product>) -> ProductStore<MemBackend> {
        seeded(products, "products")
    }

    pub fn user_store(users: Vec<User>) -> UserStore<MemBackend> {
        seeded(users, "users")
    }

    pub fn role_store(roles: Vec<Role>) -> RoleStore<MemBackend> {
        seeded(roles, "roles")
    }

    fn seeded<T: crate::store::Record>(records: Vec<T>, name: &str) -> RecordStore<T, MemBackend> {
        let json = serde_json::to_string(&records).expect("fixture records serialize");
        RecordStore::open(MemBackend::with_raw(&json).named(name)).expect("fixture store opens")
    }

    /// The sample catalogue used across command tests.
    pub fn sample_products() -> Vec<Product> {
        vec![
            product("P1", "Widget", "Tools", 9.99, 5),
            product("P2", "Gadget", "Electronics", 24.5, 0),
            product("P3", "Wrench", "tools", 12.0, 5),
        ]
    }
}
