//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every stockroom operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the three record stores and the data paths
//! - **Gates** operations on the caller's session role
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic of its own and never prints.
//!
//! ## Access Rules
//!
//! | Operation                         | Required role |
//! |-----------------------------------|---------------|
//! | list products                     | any           |
//! | add / update / delete products    | `admin`       |
//! | anything on users or roles        | `admin`       |
//!
//! ## Generic Over StorageBackend
//!
//! `InventoryApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `InventoryApi<FsBackend>` via [`InventoryApi::open`]
//! - Testing: `InventoryApi<MemBackend>`
//!
//! Operations that need no open store (`init`, `config`, `logout`, `whoami`)
//! are free functions in this module.

use crate::auth::require_admin;
use crate::commands::{self, CmdResult, DataPaths};
use crate::config::StockroomConfig;
use crate::error::Result;
use crate::store::{FsBackend, ProductStore, RecordStore, RoleStore, StorageBackend, UserStore};

pub struct InventoryApi<B: StorageBackend> {
    products: ProductStore<B>,
    users: UserStore<B>,
    roles: RoleStore<B>,
    paths: DataPaths,
    config: StockroomConfig,
}

impl InventoryApi<FsBackend> {
    /// Open the JSON stores under `paths`, as named by the saved config.
    pub fn open(paths: DataPaths) -> Result<Self> {
        let config = StockroomConfig::load(paths.dir())?;
        let products = RecordStore::open(FsBackend::new(paths.products_file(&config)))?;
        let users = RecordStore::open(FsBackend::new(paths.users_file(&config)))?;
        let roles = RecordStore::open(FsBackend::new(paths.roles_file(&config)))?;
        Ok(Self::new(products, users, roles, paths, config))
    }
}

impl<B: StorageBackend> InventoryApi<B> {
    pub fn new(
        products: ProductStore<B>,
        users: UserStore<B>,
        roles: RoleStore<B>,
        paths: DataPaths,
        config: StockroomConfig,
    ) -> Self {
        Self {
            products,
            users,
            roles,
            paths,
            config,
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<CmdResult> {
        commands::login::login(&mut self.users, &self.paths, username, password)
    }

    pub fn list_products(
        &self,
        _role: &str,
        filter: Option<&ProductFilter>,
    ) -> Result<CmdResult> {
        commands::products::list(&self.products, filter)
    }

    pub fn add_product(&mut self, role: &str, new: NewProduct) -> Result<CmdResult> {
        require_admin(role, "Adding products")?;
        commands::products::add(&mut self.products, new)
    }

    pub fn update_product(
        &mut self,
        role: &str,
        product_id: &str,
        changes: ProductChanges,
    ) -> Result<CmdResult> {
        require_admin(role, "Updating products")?;
        commands::products::update(&mut self.products, product_id, changes)
    }

    pub fn delete_product(
        &mut self,
        role: &str,
        product_id: &str,
        confirmed: bool,
    ) -> Result<CmdResult> {
        require_admin(role, "Deleting products")?;
        commands::products::delete(&mut self.products, product_id, confirmed)
    }

    pub fn list_users(&self, role: &str, filter: Option<&UserFilter>) -> Result<CmdResult> {
        require_admin(role, "Managing users")?;
        commands::users::list(&self.users, filter)
    }

    pub fn add_user(&mut self, role: &str, new: NewUser) -> Result<CmdResult> {
        require_admin(role, "Managing users")?;
        commands::users::add(&mut self.users, new, &self.config.default_role)
    }

    pub fn update_user(
        &mut self,
        role: &str,
        user_id: &str,
        changes: UserChanges,
    ) -> Result<CmdResult> {
        require_admin(role, "Managing users")?;
        commands::users::update(&mut self.users, user_id, changes)
    }

    pub fn delete_user(&mut self, role: &str, user_id: &str, confirmed: bool) -> Result<CmdResult> {
        require_admin(role, "Managing users")?;
        commands::users::delete(&mut self.users, user_id, confirmed)
    }

    pub fn list_roles(&self, role: &str, filter: Option<&RoleFilter>) -> Result<CmdResult> {
        require_admin(role, "Managing roles")?;
        commands::roles::list(&self.roles, filter)
    }

    pub fn add_role(&mut self, role: &str, new: NewRole) -> Result<CmdResult> {
        require_admin(role, "Managing roles")?;
        commands::roles::add(&mut self.roles, new)
    }

    pub fn update_role(
        &mut self,
        role: &str,
        role_id: &str,
        changes: RoleChanges,
    ) -> Result<CmdResult> {
        require_admin(role, "Managing roles")?;
        commands::roles::update(&mut self.roles, role_id, changes)
    }

    pub fn delete_role(&mut self, role: &str, role_id: &str, confirmed: bool) -> Result<CmdResult> {
        require_admin(role, "Managing roles")?;
        commands::roles::delete(&mut self.roles, role_id, confirmed)
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn config(&self) -> &StockroomConfig {
        &self.config
    }
}

pub fn init(paths: &DataPaths) -> Result<CmdResult> {
    commands::init::run(paths)
}

pub fn config(paths: &DataPaths, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(paths, action)
}

pub fn logout(paths: &DataPaths) -> Result<CmdResult> {
    commands::login::logout(paths)
}

pub fn whoami(paths: &DataPaths) -> Result<CmdResult> {
    commands::login::whoami(paths)
}

pub use crate::commands::config::ConfigAction;
pub use commands::products::{NewProduct, ProductChanges, ProductFilter};
pub use commands::roles::{NewRole, RoleChanges, RoleFilter};
pub use commands::users::{NewUser, UserChanges, UserFilter};
pub use commands::{CmdMessage, MessageLevel};
