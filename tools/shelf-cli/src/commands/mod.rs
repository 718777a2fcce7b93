//! CLI command implementations.

pub mod auth;
pub mod books;
pub mod config;
pub mod genres;
pub mod shop;
pub mod transactions;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use shelf_commerce::catalog::BookCondition;
use shelf_commerce::search::BookSort;
use shelf_commerce::CommerceError;

/// Text shown for a failed command.
pub fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CommerceError>() {
        Some(e) if e.requires_login() => {
            format!("{} Run `shelf login` to sign in.", e.user_message())
        }
        Some(e) => e.user_message(),
        None => format!("{:#}", error),
    }
}

fn parse_condition(s: &str) -> Result<BookCondition, String> {
    BookCondition::parse(s).ok_or_else(|| format!("unknown condition '{}' (new, used)", s))
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted if omitted).
    #[arg(long, env = "SHELF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name (prompted if omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted if omitted).
    #[arg(long, env = "SHELF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the books command.
#[derive(Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommand,
}

#[derive(Subcommand)]
pub enum BooksCommand {
    /// List books
    List {
        /// Match title or writer.
        #[arg(short, long)]
        search: Option<String>,

        /// Only `new` or `used` copies.
        #[arg(long, value_parser = parse_condition)]
        condition: Option<BookCondition>,

        /// title-asc, title-desc, date-asc or date-desc.
        #[arg(long, default_value = "title-asc")]
        sort: BookSort,

        /// Page number.
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show a single book
    Show {
        /// Book ID.
        id: String,
    },

    /// Add a book to the catalog
    Add(AddBookArgs),

    /// Delete a book
    Delete {
        /// Book ID.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Fields of a new catalog entry.
#[derive(Args)]
pub struct AddBookArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub writer: String,

    #[arg(long)]
    pub publisher: String,

    /// Publication year.
    #[arg(long)]
    pub year: i32,

    /// Genre ID (see `shelf genres`).
    #[arg(long)]
    pub genre: String,

    /// Price in the currency's smallest unit.
    #[arg(long)]
    pub price: i64,

    /// Copies in stock.
    #[arg(long, default_value_t = 0)]
    pub stock: i64,

    #[arg(long, value_parser = parse_condition, default_value = "new")]
    pub condition: BookCondition,

    #[arg(long)]
    pub isbn: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,
}

/// Arguments for the transactions command.
#[derive(Args)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    pub command: Option<TransactionsCommand>,
}

#[derive(Subcommand)]
pub enum TransactionsCommand {
    /// List transactions (default)
    List {
        /// Match transaction ID or book title.
        #[arg(short, long)]
        search: Option<String>,

        /// `<field>-<order>`, e.g. createdAt-desc, totalAmount-asc, id-asc.
        #[arg(long, default_value = "createdAt-desc")]
        sort: String,

        /// Page number.
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show a single transaction
    Show {
        /// Transaction ID.
        id: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Where to write it (default: ./shelf.toml).
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}
