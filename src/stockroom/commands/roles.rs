use crate::commands::helpers::{delete_confirmed, empty_listing_message, label_of, select};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Role, RoleField, RolePatch};
use crate::store::{RoleStore, StorageBackend};
use crate::validation::{validate_fields, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleFilter {
    Id(String),
    Name(String),
    PermissionLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub role_id: String,
    pub name: String,
    pub permission_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub permission_level: Option<String>,
}

pub fn list<B: StorageBackend>(
    store: &RoleStore<B>,
    filter: Option<&RoleFilter>,
) -> Result<CmdResult> {
    let search = filter.map(|f| match f {
        RoleFilter::Id(q) => (q.as_str(), RoleField::Id),
        RoleFilter::Name(q) => (q.as_str(), RoleField::Name),
        RoleFilter::PermissionLevel(q) => (q.as_str(), RoleField::PermissionLevel),
    });
    let roles = select(store, search);

    let mut result = CmdResult::default();
    if roles.is_empty() {
        result.add_message(empty_listing_message("roles"));
    }
    Ok(result.with_roles(roles))
}

pub fn add<B: StorageBackend>(store: &mut RoleStore<B>, new: NewRole) -> Result<CmdResult> {
    validate_fields(&[
        ("role_id", FieldValue::from(&new.role_id)),
        ("name", FieldValue::from(&new.name)),
        ("permission_level", FieldValue::from(&new.permission_level)),
    ])?;

    let role = Role {
        role_id: new.role_id,
        name: new.name,
        permission_level: new.permission_level,
    };
    store.add(role.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Role '{}' added successfully!",
        role.name
    )));
    Ok(result.with_roles(vec![role]))
}

/// Roles are addressed by `role_id`, never by name.
pub fn update<B: StorageBackend>(
    store: &mut RoleStore<B>,
    role_id: &str,
    changes: RoleChanges,
) -> Result<CmdResult> {
    label_of(store, role_id)?;

    let mut result = CmdResult::default();
    if changes.name.is_none() && changes.permission_level.is_none() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let mut fields: Vec<(&str, FieldValue<'_>)> = Vec::new();
    if let Some(name) = &changes.name {
        fields.push(("name", name.into()));
    }
    if let Some(level) = &changes.permission_level {
        fields.push(("permission_level", level.into()));
    }
    validate_fields(&fields)?;

    let patch = RolePatch {
        name: changes.name,
        permission_level: changes.permission_level,
    };
    let updated = store.update(role_id, &patch)?.clone();

    result.add_message(CmdMessage::success(format!(
        "Role '{}' updated successfully!",
        updated.name
    )));
    Ok(result.with_roles(vec![updated]))
}

pub fn delete<B: StorageBackend>(
    store: &mut RoleStore<B>,
    role_id: &str,
    confirmed: bool,
) -> Result<CmdResult> {
    delete_confirmed(store, role_id, confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockroomError;
    use crate::store::record_store::fixtures::{role, role_store};

    fn roles() -> Vec<Role> {
        vec![
            role("R1", "admin", "full"),
            role("R2", "user", "read"),
            role("R3", "auditor", "read-only"),
        ]
    }

    #[test]
    fn filters_by_permission_level() {
        let store = role_store(roles());
        let result = list(&store, Some(&RoleFilter::PermissionLevel("READ".into()))).unwrap();
        let ids: Vec<_> = result.roles.iter().map(|r| r.role_id.as_str()).collect();
        assert_eq!(ids, vec!["R2", "R3"]);
    }

    #[test]
    fn add_requires_permission_level() {
        let mut store = role_store(vec![]);
        let new = NewRole {
            role_id: "R9".into(),
            name: "temp".into(),
            permission_level: String::new(),
        };
        let err = add(&mut store, new).unwrap_err();
        assert_eq!(err.to_string(), "Permission level is required.");
    }

    #[test]
    fn rename_by_role_id() {
        let mut store = role_store(roles());
        let changes = RoleChanges {
            name: Some("inspector".into()),
            ..Default::default()
        };
        let result = update(&mut store, "R3", changes).unwrap();
        assert_eq!(result.roles[0].name, "inspector");
        assert_eq!(result.roles[0].permission_level, "read-only");
    }

    #[test]
    fn update_by_name_is_not_found() {
        let mut store = role_store(roles());
        let changes = RoleChanges {
            permission_level: Some("none".into()),
            ..Default::default()
        };
        assert!(matches!(
            update(&mut store, "auditor", changes),
            Err(StockroomError::NotFound { entity: "Role", .. })
        ));
    }

    #[test]
    fn delete_asks_before_removing() {
        let mut store = role_store(roles());
        let asked = delete(&mut store, "R3", false).unwrap();
        assert!(asked.messages[0].content.contains("'auditor'"));
        assert_eq!(store.len(), 3);

        delete(&mut store, "R3", true).unwrap();
        assert_eq!(store.len(), 2);
    }
}
