//! CLI administration tool for shrinkify.
//!
//! Manages short links and checks the database without going through the
//! HTTP API. All link commands go through the same [`UrlService`] as the server.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show table info
//! cargo run --bin admin -- db info
//!
//! # Preview the hash for a URL (no database needed)
//! cargo run --bin admin -- hash https://example.com/a
//!
//! # Manage links
//! cargo run --bin admin -- link create https://example.com/a
//! cargo run --bin admin -- link get cd69b81ea0
//! cargo run --bin admin -- link delete cd69b81ea0
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shrinkify::config`].

use shrinkify::application::services::UrlService;
use shrinkify::config::{self, Config};
use shrinkify::domain::outcome::{CreateOutcome, DeleteOutcome, ResolveOutcome};
use shrinkify::domain::repositories::UrlStore;
use shrinkify::infrastructure::persistence::PgUrlStore;
use shrinkify::server::connect_pool;
use shrinkify::utils::hash_generator::{DEFAULT_HASH_LENGTH, HashGenerator, Md5HashGenerator};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shrinkify.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Print the hash a URL would get on its first attempt
    Hash {
        /// Target URL
        url: String,

        /// Hash length (defaults to HASH_LENGTH or 10)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Resolve a hash to its target URL
    Get { hash: String },

    /// Shorten a URL
    Create { url: String },

    /// Delete a hash
    Delete {
        hash: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash { url, length } => {
            let length = match length {
                Some(length) => length,
                None => std::env::var("HASH_LENGTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HASH_LENGTH),
            };
            print_hash(&url, length);
        }
        Commands::Link { action } => {
            let (config, pool) = connect().await?;
            handle_link_action(action, &config, &pool).await?;
        }
        Commands::Db { action } => {
            let (_, pool) = connect().await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

/// Loads configuration and opens the database pool.
async fn connect() -> Result<(Config, PgPool)> {
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    Ok((config, pool))
}

fn print_hash(url: &str, length: usize) {
    let generator = Md5HashGenerator::new(length);
    println!("{}", generator.generate(url).bright_yellow().bold());
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = UrlService::new(
        Arc::new(PgUrlStore::new(Arc::new(pool.clone()))),
        Arc::new(Md5HashGenerator::new(config.hash_length)),
        config.collision_policy(),
    );

    match action {
        LinkAction::Get { hash } => match service.resolve(&hash).await {
            ResolveOutcome::Found(target) => {
                println!("{} {}", hash.cyan(), target);
            }
            ResolveOutcome::NotFound => {
                println!("{}", format!("Hash '{}' not found", hash).yellow());
            }
            ResolveOutcome::Failed(failure) => {
                anyhow::bail!("Failed to resolve hash: {}", failure);
            }
        },
        LinkAction::Create { url } => match service.create(&url).await {
            CreateOutcome::Created(hash) => {
                println!("{}", "Short link created".green().bold());
                println!("  {}/link/{}", config.public_base_url, hash.bright_yellow());
            }
            CreateOutcome::AlreadyExists(hash) => {
                println!("{}", "URL was already shortened".yellow());
                println!("  {}/link/{}", config.public_base_url, hash.bright_yellow());
            }
            CreateOutcome::Failed(failure) => {
                anyhow::bail!("Failed to create short link: {}", failure);
            }
        },
        LinkAction::Delete { hash, yes } => {
            delete_link(&service, hash, yes).await?;
        }
    }

    Ok(())
}

/// Deletes a hash after showing what it points to.
async fn delete_link(service: &UrlService, hash: String, skip_confirm: bool) -> Result<()> {
    let target = match service.resolve(&hash).await {
        ResolveOutcome::Found(target) => target,
        ResolveOutcome::NotFound => {
            println!("{}", format!("Hash '{}' not found", hash).yellow());
            return Ok(());
        }
        ResolveOutcome::Failed(failure) => {
            anyhow::bail!("Failed to resolve hash: {}", failure);
        }
    };

    println!("  Hash:   {}", hash.cyan());
    println!("  Target: {}", target);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    match service.delete(&hash).await {
        DeleteOutcome::Deleted(target) => {
            println!("{} {}", "Deleted".green().bold(), target);
        }
        DeleteOutcome::NotFound => {
            println!("{}", "Already deleted".yellow());
        }
        DeleteOutcome::Failed(failure) => {
            anyhow::bail!("Failed to delete hash: {}", failure);
        }
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            PgUrlStore::new(Arc::new(pool.clone()))
                .test_connection()
                .await
                .context("Database check failed")?;
            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Failed to query server version")?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_details")
                .fetch_one(pool)
                .await
                .context("Failed to count links")?;

            println!("{}", "Database info".bright_blue().bold());
            println!("  Server: {}", version);
            println!("  Links:  {}", links.to_string().bright_yellow());
        }
    }

    Ok(())
}
