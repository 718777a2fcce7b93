//! shelf: a command-line storefront for the bookstore API.
//!
//! ```bash
//! shelf login
//! shelf books list --search rust
//! shelf shop
//! shelf transactions list --sort totalAmount-desc
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod context;
mod logging;
mod output;

use commands::{BooksArgs, ConfigArgs, LoginArgs, RegisterArgs, TransactionsArgs};
use context::Context;
use output::Output;

/// Browse the bookstore, fill a cart and check out.
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, env = "SHELF_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse and manage the catalog
    Books(BooksArgs),

    /// List genres
    Genres,

    /// Show purchase history
    Transactions(TransactionsArgs),

    /// Interactive shopping session with a cart and checkout
    Shop,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let output = Output::new(cli.verbose, cli.json);

    let ctx = match Context::load(cli.config.as_deref(), cli.api_url, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("Logging disabled: {:#}", e));
    }
    tracing::debug!(
        config = ?ctx.config_path,
        api = %ctx.config.api.base_url,
        "configuration loaded"
    );

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Books(args) => commands::books::run(args, &ctx).await,
        Commands::Genres => commands::genres::run(&ctx).await,
        Commands::Transactions(args) => commands::transactions::run(args, &ctx).await,
        Commands::Shop => commands::shop::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&commands::describe(&e));
        std::process::exit(1);
    }
}
