//! # CLI Layer
//!
//! One UI client for stockroom. This is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging, dispatch (called by `main.rs`)
//! - `resolve_paths()`: `--data-dir`, then `STOCKROOM_DATA`, then the platform data dir
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! Product, user and role commands need a session; the session's role is what
//! the API checks permissions against.

use super::render::{
    print_messages, render_products, render_roles, render_session, render_text_list,
    render_users,
};
use super::setup::{
    Cli, Commands, ProductBy, ProductCommands, RoleBy, RoleCommands, UserBy, UserCommands,
};
use clap::Parser;
use directories::ProjectDirs;
use stockroom::api::{
    self, ConfigAction, InventoryApi, NewProduct, NewRole, NewUser, ProductChanges,
    ProductFilter, RoleChanges, RoleFilter, UserChanges, UserFilter,
};
use stockroom::commands::{CmdResult, DataPaths};
use stockroom::error::{Result, StockroomError};
use stockroom::session::Session;
use stockroom::store::FsBackend;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct AppContext {
    api: InventoryApi<FsBackend>,
    session: Session,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = resolve_paths(&cli)?;
    debug!(data_dir = %paths.dir().display(), "resolved data directory");

    match cli.command {
        Commands::Init => handle_init(&paths),
        Commands::Login { username, password } => handle_login(paths, &username, &password),
        Commands::Logout => handle_logout(&paths),
        Commands::Whoami => handle_whoami(&paths),
        Commands::Config { key, value } => handle_config(&paths, key, value),
        Commands::Product { action } => {
            let mut ctx = init_context(paths)?;
            handle_product(&mut ctx, action)
        }
        Commands::User { action } => {
            let mut ctx = init_context(paths)?;
            handle_user(&mut ctx, action)
        }
        Commands::Role { action } => {
            let mut ctx = init_context(paths)?;
            handle_role(&mut ctx, action)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stockroom={}", level).into()),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn resolve_paths(cli: &Cli) -> Result<DataPaths> {
    if let Some(dir) = &cli.data_dir {
        return Ok(DataPaths::new(dir));
    }
    let dirs = ProjectDirs::from("com", "stockroom", "stockroom").ok_or_else(|| {
        StockroomError::Api("Could not determine a data directory; pass --data-dir".into())
    })?;
    Ok(DataPaths::new(dirs.data_dir()))
}

fn init_context(paths: DataPaths) -> Result<AppContext> {
    let session = Session::require(paths.dir())?;
    let api = InventoryApi::open(paths)?;
    Ok(AppContext { api, session })
}

fn print_result(result: &CmdResult) {
    print!("{}", render_products(&result.products));
    print!("{}", render_users(&result.users));
    print!("{}", render_roles(&result.roles));
    print_messages(&result.messages);
}

fn handle_init(paths: &DataPaths) -> Result<()> {
    let result = api::init(paths)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_login(paths: DataPaths, username: &str, password: &str) -> Result<()> {
    let mut api = InventoryApi::open(paths)?;
    let result = api.login(username, password)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(paths: &DataPaths) -> Result<()> {
    let result = api::logout(paths)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(paths: &DataPaths) -> Result<()> {
    let result = api::whoami(paths)?;
    if let Some(session) = &result.session {
        print!("{}", render_session(session));
    }
    Ok(())
}

fn handle_config(paths: &DataPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api::config(paths, action)?;
    let mut lines = Vec::new();
    if let Some(config) = &result.config {
        if key.is_none() {
            for (k, v) in config.entries() {
                lines.push(format!("{} = {}", k, v));
            }
        }
    }
    if !lines.is_empty() || result.messages.is_empty() {
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_product(ctx: &mut AppContext, action: ProductCommands) -> Result<()> {
    let role = ctx.session.role.as_str();
    let result = match action {
        ProductCommands::List { by, value } => {
            let filter = by.zip(value).map(|(by, v)| match by {
                ProductBy::Id => ProductFilter::Id(v),
                ProductBy::Name => ProductFilter::Name(v),
                ProductBy::Category => ProductFilter::Category(v),
                ProductBy::Stock => ProductFilter::StockQuantity(v),
            });
            ctx.api.list_products(role, filter.as_ref())?
        }
        ProductCommands::Add {
            product_id,
            name,
            category,
            price,
            stock_quantity,
        } => ctx.api.add_product(
            role,
            NewProduct {
                product_id,
                name,
                category,
                price,
                stock_quantity,
            },
        )?,
        ProductCommands::Update {
            product_id,
            name,
            category,
            price,
            stock_quantity,
        } => ctx.api.update_product(
            role,
            &product_id,
            ProductChanges {
                name,
                category,
                price,
                stock_quantity,
            },
        )?,
        ProductCommands::Delete { product_id, yes } => {
            ctx.api.delete_product(role, &product_id, yes)?
        }
    };
    print_result(&result);
    Ok(())
}

fn handle_user(ctx: &mut AppContext, action: UserCommands) -> Result<()> {
    let role = ctx.session.role.as_str();
    let result = match action {
        UserCommands::List { by, value } => {
            let filter = by.zip(value).map(|(by, v)| match by {
                UserBy::Id => UserFilter::Id(v),
                UserBy::Username => UserFilter::Username(v),
                UserBy::Role => UserFilter::Role(v),
            });
            ctx.api.list_users(role, filter.as_ref())?
        }
        UserCommands::Add {
            user_id,
            username,
            password,
            role: new_role,
        } => ctx.api.add_user(
            role,
            NewUser {
                user_id,
                username,
                password,
                role: new_role,
            },
        )?,
        UserCommands::Update {
            user_id,
            username,
            password,
            role: new_role,
        } => ctx.api.update_user(
            role,
            &user_id,
            UserChanges {
                username,
                password,
                role: new_role,
            },
        )?,
        UserCommands::Delete { user_id, yes } => ctx.api.delete_user(role, &user_id, yes)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_role(ctx: &mut AppContext, action: RoleCommands) -> Result<()> {
    let role = ctx.session.role.as_str();
    let result = match action {
        RoleCommands::List { by, value } => {
            let filter = by.zip(value).map(|(by, v)| match by {
                RoleBy::Id => RoleFilter::Id(v),
                RoleBy::Name => RoleFilter::Name(v),
                RoleBy::Permission => RoleFilter::PermissionLevel(v),
            });
            ctx.api.list_roles(role, filter.as_ref())?
        }
        RoleCommands::Add {
            role_id,
            name,
            permission_level,
        } => ctx.api.add_role(
            role,
            NewRole {
                role_id,
                name,
                permission_level,
            },
        )?,
        RoleCommands::Update {
            role_id,
            name,
            permission_level,
        } => ctx.api.update_role(
            role,
            &role_id,
            RoleChanges {
                name,
                permission_level,
            },
        )?,
        RoleCommands::Delete { role_id, yes } => ctx.api.delete_role(role, &role_id, yes)?,
    };
    print_result(&result);
    Ok(())
}
