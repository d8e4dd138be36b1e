use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockroomError};
use crate::store::{Record, RecordStore, StorageBackend};

/// Clone the matches of an optional search, or everything when there is none.
pub fn select<T: Record, B: StorageBackend>(
    store: &RecordStore<T, B>,
    search: Option<(&str, T::Field)>,
) -> Vec<T> {
    match search {
        Some((query, field)) => store.search(query, field).into_iter().cloned().collect(),
        None => store.records().to_vec(),
    }
}

/// The label of the record with `key`, or `NotFound`.
pub fn label_of<T: Record, B: StorageBackend>(
    store: &RecordStore<T, B>,
    key: &str,
) -> Result<String> {
    store
        .find_by_key(key)
        .map(|r| r.label().to_string())
        .ok_or_else(|| StockroomError::NotFound {
            entity: T::ENTITY,
            key: key.to_string(),
        })
}

/// Delete after confirmation. Unconfirmed, nothing changes and the result
/// carries the confirmation question instead.
pub fn delete_confirmed<T: Record, B: StorageBackend>(
    store: &mut RecordStore<T, B>,
    key: &str,
    confirmed: bool,
) -> Result<CmdResult> {
    let label = label_of(store, key)?;
    let mut result = CmdResult::default();

    if !confirmed {
        result.add_message(CmdMessage::warning(format!(
            "Are you sure you want to delete '{}'? Re-run with --yes to confirm.",
            label
        )));
        return Ok(result);
    }

    store.delete(key)?;
    result.add_message(CmdMessage::success(format!(
        "{} '{}' deleted successfully!",
        T::ENTITY,
        label
    )));
    Ok(result)
}

/// "No products found." for an empty listing.
pub fn empty_listing_message(plural: &str) -> CmdMessage {
    CmdMessage::info(format!("No {} found.", plural))
}
