//! CLI administration tool for shortlink.
//!
//! Provides maintenance commands that run directly against the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show mapping counts
//! cargo run --bin admin -- stats
//!
//! # Delete expired mappings (asks for confirmation)
//! cargo run --bin admin -- purge
//!
//! # Same, without the prompt
//! cargo run --bin admin -- purge --yes
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`: PostgreSQL connection
//! - `REDIS_URL` (optional): evicted codes are dropped from the Redis cache during purge

use shortlink::config::Config;
use shortlink::domain::repositories::MappingRepository;
use shortlink::infrastructure::cache::{CacheService, DEFAULT_CACHE_TTL_SECONDS, RedisCache};
use shortlink::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    /// Show mapping statistics
    Stats,

    /// Delete expired mappings
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Purge { yes } => handle_purge(&pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays mapping statistics.
///
/// Shows total, live, and expired mapping counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    let expired: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM url_mappings WHERE expires_at IS NOT NULL AND expires_at < NOW()",
    )
    .fetch_one(pool)
    .await?;

    let never_expiring: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expires_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Mappings:       {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Live:           {}",
        (total - expired).to_string().bright_green().bold()
    );
    println!(
        "  Never expiring: {}",
        never_expiring.to_string().bright_white()
    );
    println!("  Expired:        {}", expired.to_string().yellow());
    println!();

    Ok(())
}

/// Deletes every expired mapping.
///
/// Lists the expired codes, asks for confirmation (default: No) unless
/// `--yes` is given, then deletes and reports the rows actually removed.
/// Their cache entries are dropped when Redis is configured.
async fn handle_purge(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge Expired Mappings".bright_blue().bold());
    println!();

    let now = Utc::now();
    let codes: Vec<String> = sqlx::query_scalar(
        "SELECT short_code FROM url_mappings WHERE expires_at < $1 ORDER BY expires_at",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    if codes.is_empty() {
        println!("{}", "  Nothing to purge".green());
        return Ok(());
    }

    println!(
        "  Expired mappings: {}",
        codes.len().to_string().yellow().bold()
    );
    for code in &codes {
        println!("    {}", code.bright_black());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these mappings?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    let removed = repo
        .purge_expired(now)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge mappings: {}", e))?;

    if let Some(redis_url) = Config::load_redis_url() {
        match RedisCache::connect(&redis_url, DEFAULT_CACHE_TTL_SECONDS).await {
            Ok(cache) => {
                for code in &removed {
                    if let Err(e) = cache.invalidate(code).await {
                        println!("  {} {}: {}", "⚠️".yellow(), code, e);
                    }
                }
            }
            Err(e) => println!(
                "{}",
                format!("⚠️  Cache not cleared: {}", e).yellow()
            ),
        }
    }

    println!();
    println!(
        "{}",
        format!("✅ Purged {} mappings", removed.len()).green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgMappingRepository::new(Arc::new(pool.clone()));
            if !repo.health_check().await {
                anyhow::bail!("Database connection check failed");
            }

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
