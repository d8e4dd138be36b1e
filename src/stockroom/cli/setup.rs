use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stockroom", bin_name = "stockroom", version)]
#[command(about = "Manage products, users and roles kept in JSON files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the JSON stores
    #[arg(long, global = true, env = "STOCKROOM_DATA", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and any missing store files
    #[command(display_order = 1)]
    Init,

    /// Log in and start a session
    #[command(display_order = 2)]
    Login { username: String, password: String },

    /// End the current session
    #[command(display_order = 3)]
    Logout,

    /// Show who is logged in
    #[command(display_order = 4)]
    Whoami,

    /// Browse and manage products
    #[command(display_order = 10)]
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Manage user accounts (admin only)
    #[command(display_order = 11)]
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage roles (admin only)
    #[command(display_order = 12)]
    Role {
        #[command(subcommand)]
        action: RoleCommands,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (e.g., products-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProductBy {
    Id,
    Name,
    Category,
    Stock,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UserBy {
    Id,
    Username,
    Role,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleBy {
    Id,
    Name,
    Permission,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Field to filter on
        #[arg(long, value_enum, requires = "value")]
        by: Option<ProductBy>,

        /// Filter value
        #[arg(long, requires = "by")]
        value: Option<String>,
    },

    /// Add a product
    Add {
        #[arg(long = "id")]
        product_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Units in stock
        #[arg(long = "stock", allow_negative_numbers = true)]
        stock_quantity: i64,
    },

    /// Update fields of a product
    Update {
        product_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,

        #[arg(long = "stock", allow_negative_numbers = true)]
        stock_quantity: Option<i64>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        product_id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users, optionally filtered
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, requires = "value")]
        by: Option<UserBy>,

        #[arg(long, requires = "by")]
        value: Option<String>,
    },

    /// Add a user
    Add {
        #[arg(long = "id")]
        user_id: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// Defaults to the configured default-role
        #[arg(long)]
        role: Option<String>,
    },

    /// Update fields of a user
    Update {
        user_id: String,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        role: Option<String>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        user_id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List roles, optionally filtered
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, requires = "value")]
        by: Option<RoleBy>,

        #[arg(long, requires = "by")]
        value: Option<String>,
    },

    /// Add a role
    Add {
        #[arg(long = "id")]
        role_id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "permission")]
        permission_level: String,
    },

    /// Update fields of a role
    Update {
        role_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "permission")]
        permission_level: Option<String>,
    },

    /// Delete a role
    #[command(alias = "rm")]
    Delete {
        role_id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}
