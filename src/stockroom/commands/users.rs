use crate::commands::helpers::{delete_confirmed, empty_listing_message, label_of, select};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{User, UserField, UserPatch};
use crate::store::{StorageBackend, UserStore};
use crate::validation::{validate_fields, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(String),
    Username(String),
    Role(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub username: String,
    pub password: String,
    /// Falls back to the configured default role.
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.role.is_none()
    }
}

pub fn list<B: StorageBackend>(
    store: &UserStore<B>,
    filter: Option<&UserFilter>,
) -> Result<CmdResult> {
    let search = filter.map(|f| match f {
        UserFilter::Id(q) => (q.as_str(), UserField::Id),
        UserFilter::Username(q) => (q.as_str(), UserField::Username),
        UserFilter::Role(q) => (q.as_str(), UserField::Role),
    });
    let users = select(store, search);

    let mut result = CmdResult::default();
    if users.is_empty() {
        result.add_message(empty_listing_message("users"));
    }
    Ok(result.with_users(users))
}

pub fn add<B: StorageBackend>(
    store: &mut UserStore<B>,
    new: NewUser,
    default_role: &str,
) -> Result<CmdResult> {
    let role = new.role.unwrap_or_else(|| default_role.to_string());
    validate_fields(&[
        ("user_id", FieldValue::from(&new.user_id)),
        ("username", FieldValue::from(&new.username)),
        ("password", FieldValue::from(&new.password)),
        ("role", FieldValue::from(&role)),
    ])?;

    let user = User {
        user_id: new.user_id,
        username: new.username,
        password: new.password,
        role,
    };
    store.add(user.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "User '{}' added successfully!",
        user.username
    )));
    Ok(result.with_users(vec![user]))
}

pub fn update<B: StorageBackend>(
    store: &mut UserStore<B>,
    user_id: &str,
    changes: UserChanges,
) -> Result<CmdResult> {
    label_of(store, user_id)?;

    let mut result = CmdResult::default();
    if changes.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let fields: Vec<(&str, FieldValue<'_>)> = [
        ("username", &changes.username),
        ("password", &changes.password),
        ("role", &changes.role),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| (name, FieldValue::from(v))))
    .collect();
    validate_fields(&fields)?;

    let patch = UserPatch {
        username: changes.username,
        password: changes.password,
        role: changes.role,
    };
    let updated = store.update(user_id, &patch)?.clone();

    result.add_message(CmdMessage::success(format!(
        "User '{}' updated successfully!",
        updated.username
    )));
    Ok(result.with_users(vec![updated]))
}

pub fn delete<B: StorageBackend>(
    store: &mut UserStore<B>,
    user_id: &str,
    confirmed: bool,
) -> Result<CmdResult> {
    delete_confirmed(store, user_id, confirmed)
}
