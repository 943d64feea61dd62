//! CLI administration tool for pageknock.
//!
//! Provides commands for inspecting comment activity and maintaining the
//! aggregate structures without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Per-domain counters
//! cargo run --bin pageknock-admin -- stats
//!
//! # Latest comments across all domains
//! cargo run --bin pageknock-admin -- recent --limit 20
//!
//! # Recompute page and domain structures
//! cargo run --bin pageknock-admin -- rebuild
//!
//! # Check database connection
//! cargo run --bin pageknock-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same database settings as the server (`DATABASE_URL` or `DB_*`).

use pageknock::application::services::{CommentService, CommentSettings, StructureService};
use pageknock::config::{Config, StorageBackend, mask_connection_string};
use pageknock::infrastructure::Repositories;
use pageknock::server;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing pageknock.
#[derive(Parser)]
#[command(name = "pageknock-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show per-domain comment counters
    Stats,

    /// Show the latest comments across all domains
    Recent {
        /// Number of comments to show
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=1000))]
        limit: i64,
    },

    /// Recompute page and domain structures from stored comments
    Rebuild {
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

    /// Show database info and row counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("pageknock-admin works on the postgres storage backend only");
    }
    config.validate()?;

    let pool = server::connect_database(&config).await?;
    let repos = Repositories::postgres(Arc::new(pool.clone()));

    match cli.command {
        Commands::Stats => handle_stats(&repos).await?,
        Commands::Recent { limit } => handle_recent(&repos, limit).await?,
        Commands::Rebuild { yes } => handle_rebuild(&repos, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

fn structure_service(repos: &Repositories) -> StructureService {
    StructureService::new(repos.pages.clone(), repos.domains.clone())
}

fn format_millis(unix_time: i64) -> String {
    DateTime::from_timestamp_millis(unix_time)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| unix_time.to_string())
}

/// Displays the structure of every domain, most recently active first.
///
/// # Output Format
///
/// ```text
/// Domains
///
///   Domain                                   URLs   Comments  Latest
///   ──────────────────────────────────────────────────────────────────────────────
///   https://example.com                         3         12  2024-01-15 10:30:00
/// ```
async fn handle_stats(repos: &Repositories) -> Result<()> {
    println!("{}", "Domains".bright_blue().bold());
    println!();

    let domains = structure_service(repos)
        .global_structure()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load structures: {}", e))?;

    if domains.is_empty() {
        println!("{}", "  No comments yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<40} {:>6} {:>10}  {:<19}",
        "Domain".bright_white().bold(),
        "URLs".bright_white().bold(),
        "Comments".bright_white().bold(),
        "Latest".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for domain in &domains {
        println!(
            "  {:<40} {:>6} {:>10}  {}",
            domain.site_domain.cyan(),
            domain.url_count,
            domain.comment_count,
            format_millis(domain.latest_unix_time).bright_black()
        );
    }

    let total: i64 = domains.iter().map(|d| d.comment_count).sum();
    println!();
    println!(
        "  Domains: {}  Comments: {}",
        domains.len().to_string().bright_white().bold(),
        total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Displays the latest comments of the global recent index.
async fn handle_recent(repos: &Repositories, limit: i64) -> Result<()> {
    println!("{}", "Recent comments".bright_blue().bold());
    println!();

    let service = CommentService::new(
        repos.comments.clone(),
        repos.logs.clone(),
        repos.recent.clone(),
        Arc::new(structure_service(repos)),
        CommentSettings {
            recent_limit: limit,
            ..CommentSettings::default()
        },
    );

    let items = service
        .recent_global()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load recent comments: {}", e))?;

    if items.is_empty() {
        println!("{}", "  No comments yet".yellow());
        return Ok(());
    }

    for item in &items {
        println!(
            "  {}  {}",
            format_millis(item.unix_time).bright_black(),
            item.url.cyan()
        );
        println!("    {}", item.comment);
    }
    println!();

    Ok(())
}

/// Recomputes every structure after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Runs in a single transaction; readers never see a half-built table
async fn handle_rebuild(repos: &Repositories, skip_confirm: bool) -> Result<()> {
    println!("{}", "Rebuild structures".bright_blue().bold());
    println!();
    println!(
        "{}",
        "Page and domain counters will be replaced with values recomputed from the comment index."
            .yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Rebuild now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let summary = structure_service(repos)
        .rebuild()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to rebuild structures: {}", e))?;

    println!(
        "{} {} pages, {} domains",
        "Rebuilt:".green().bold(),
        summary.pages.to_string().bright_white().bold(),
        summary.domains.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            if let Some(url) = &config.database_url {
                println!("  URL:        {}", mask_connection_string(url));
            }
            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for table in [
                "comments",
                "comment_logs",
                "recent_global_comments",
                "recent_domain_comments",
                "page_structures",
                "domain_structures",
            ] {
                let sql = format!("SELECT COUNT(*) FROM {table}");
                let count: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
                println!("  {:<24} {}", table, count.to_string().bright_green());
            }
            println!();
        }
    }

    Ok(())
}
