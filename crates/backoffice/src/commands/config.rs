//! Config command - configuration management.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde::Serialize;

use backoffice_config::{self, ClientConfig};

use super::{Context, print_json, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved configuration
    Show,

    /// Show configuration file path
    Path,

    /// Store the API origin in the config file
    SetUrl {
        /// API origin (e.g., https://admin-api.example.com)
        url: String,
    },

    /// Store the request timeout in the config file
    SetTimeout {
        /// Timeout in seconds
        seconds: u64,
    },
}

#[derive(Serialize)]
struct ResolvedConfig<'a> {
    api_url: &'a str,
    timeout_secs: u64,
    storage_path: String,
    cache_default_ttl_ms: u64,
    cache_capacity: usize,
    config_file: Option<String>,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Path => cmd_path(ctx),
        ConfigCommand::SetUrl { url } => cmd_set_url(&url, ctx),
        ConfigCommand::SetTimeout { seconds } => cmd_set_timeout(seconds, ctx),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let config = backoffice_config::load_client_config()?;
    let path = backoffice_config::client_config_path();

    let resolved = ResolvedConfig {
        api_url: &ctx.api_url,
        timeout_secs: config.timeout().as_secs(),
        storage_path: config.storage_path().display().to_string(),
        cache_default_ttl_ms: config.cache.default_ttl_ms,
        cache_capacity: config.cache.capacity,
        config_file: path
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string()),
    };

    if ctx.json_output {
        return print_json(&resolved);
    }

    println!("# Backoffice Configuration\n");
    match &resolved.config_file {
        Some(file) => println!("Config file: {}\n", file),
        None => println!("No config file loaded (using defaults)\n"),
    }
    println!("  api-url:      {}", resolved.api_url);
    println!("  timeout:      {}s", resolved.timeout_secs);
    println!("  storage-path: {}", resolved.storage_path);
    println!("  cache ttl:    {}ms", resolved.cache_default_ttl_ms);
    println!("  cache size:   {}", resolved.cache_capacity);

    if ctx.verbose {
        println!("\n---\nRaw config:\n");
        println!("{}", config.to_yaml()?);
    }

    Ok(())
}

fn cmd_path(ctx: &Context) -> Result<()> {
    let Some(path) = backoffice_config::client_config_path() else {
        bail!("could not determine config directory");
    };
    if ctx.json_output {
        return print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        }));
    }
    println!("{}", path.display());
    Ok(())
}

fn update_config(ctx: &Context, apply: impl FnOnce(&mut ClientConfig)) -> Result<()> {
    let mut config = backoffice_config::load_client_config()?;
    apply(&mut config);
    backoffice_config::save_client_config(&config)?;
    if ctx.verbose
        && let Some(path) = backoffice_config::client_config_path()
    {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_set_url(url: &str, ctx: &Context) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        bail!("API URL must not be empty");
    }
    url::Url::parse(url).map_err(|e| anyhow::anyhow!("invalid API URL '{}': {}", url, e))?;

    update_config(ctx, |config| config.api_url = Some(url.to_string()))?;
    print_success(format!("API URL set to {}", url));
    Ok(())
}

fn cmd_set_timeout(seconds: u64, ctx: &Context) -> Result<()> {
    if seconds == 0 {
        bail!("timeout must be at least one second");
    }
    update_config(ctx, |config| config.timeout = Some(seconds))?;
    print_success(format!("Timeout set to {}s", seconds));
    Ok(())
}
