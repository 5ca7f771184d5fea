//! Backoffice - administration client for the backoffice API.
//!
//! Main entry point for the backoffice CLI.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use backoffice_client::ApiClient;
use backoffice_session::{FileStorage, SessionStore};

mod commands;
mod login;
mod router;

use commands::{TerminalNavigator, auth, config, open, roles, status, users};
use router::Router;

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Backoffice - administration client for the backoffice API
#[derive(Parser)]
#[command(name = "backoffice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API origin (default: http://localhost:5175)
    #[arg(long, global = true, env = "BACKOFFICE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login(auth::LoginArgs),

    /// Create an account
    Register(auth::RegisterArgs),

    /// Drop the stored session
    Logout,

    /// Show session state
    Status,

    /// Check where navigating to a path ends up
    Open(open::OpenArgs),

    /// User management
    Users(users::UsersArgs),

    /// Role catalogue
    Roles(roles::RolesArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "backoffice=debug,backoffice_client=debug,backoffice_session=debug,backoffice_config=debug,info"
    } else {
        "backoffice=info,backoffice_client=warn,backoffice_session=warn,warn"
    };

    let log_dir = backoffice_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "backoffice.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "backoffice=trace,backoffice_client=trace,backoffice_session=trace,backoffice_config=trace,info",
                )),
        )
        .init();

    let config = backoffice_config::load_client_config()?;
    let api_url = config.resolve_api_url(cli.api_url.as_deref());

    let storage = Arc::new(FileStorage::new(config.storage_path()));
    let session =
        Arc::new(SessionStore::new(storage)?.with_navigator(Arc::new(TerminalNavigator)));

    let client = ApiClient::builder()
        .base_url(&api_url)
        .timeout(config.timeout())
        .default_cache_ttl(config.cache.default_ttl())
        .cache_capacity(config.cache.capacity)
        .token_source(session.clone())
        .build()?;

    let ctx = commands::Context {
        api_url,
        client,
        session,
        router: Router::default(),
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Login(args) => auth::login(args, &ctx).await,
        Commands::Register(args) => auth::register(args, &ctx).await,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Status => status::run(&ctx).await,
        Commands::Open(args) => open::run(args, &ctx).await,
        Commands::Users(args) => users::run(args, &ctx).await,
        Commands::Roles(args) => roles::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
