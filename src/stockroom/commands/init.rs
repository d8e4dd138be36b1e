use crate::commands::{CmdMessage, CmdResult, DataPaths};
use crate::config::StockroomConfig;
use crate::error::{Result, StockroomError};
use crate::model::{Product, Role, User, ADMIN_ROLE, DEFAULT_ROLE};
use crate::store::{FsBackend, StorageBackend};
use std::fs;
use std::path::Path;
use tracing::info;

/// Create the data directory and any missing store files.
///
/// Existing files are never touched. A fresh user file is seeded with an
/// `admin`/`admin` account so that someone can log in at all; a fresh role
/// file gets the `admin` and `user` roles.
pub fn run(paths: &DataPaths) -> Result<CmdResult> {
    let dir = paths.dir();
    fs::create_dir_all(dir).map_err(StockroomError::Io)?;
    let config = StockroomConfig::load(dir)?;
    let mut result = CmdResult::default();

    if create_if_missing::<Product>(&paths.products_file(&config), Vec::new())? {
        result.add_message(CmdMessage::info(format!("Created {}", config.products_file)));
    }

    let seed_user = User {
        user_id: "U1".to_string(),
        username: ADMIN_ROLE.to_string(),
        password: ADMIN_ROLE.to_string(),
        role: ADMIN_ROLE.to_string(),
    };
    if create_if_missing(&paths.users_file(&config), vec![seed_user])? {
        result.add_message(CmdMessage::info(format!("Created {}", config.users_file)));
        result.add_message(CmdMessage::warning(
            "Seeded account admin/admin. Change its password with `stockroom user update U1 --password <new>`.",
        ));
    }

    let seed_roles = vec![
        Role {
            role_id: "R1".to_string(),
            name: ADMIN_ROLE.to_string(),
            permission_level: "full".to_string(),
        },
        Role {
            role_id: "R2".to_string(),
            name: DEFAULT_ROLE.to_string(),
            permission_level: "read".to_string(),
        },
    ];
    if create_if_missing(&paths.roles_file(&config), seed_roles)? {
        result.add_message(CmdMessage::info(format!("Created {}", config.roles_file)));
    }

    result.add_message(CmdMessage::success(format!(
        "Initialized stockroom data at {}",
        dir.display()
    )));
    Ok(result)
}

fn create_if_missing<T: serde::Serialize>(path: &Path, seed: Vec<T>) -> Result<bool> {
    let backend = FsBackend::new(path);
    if backend.exists() {
        return Ok(false);
    }
    backend.write_records(&seed)?;
    info!(path = %path.display(), records = seed.len(), "created store file");
    Ok(true)
}
