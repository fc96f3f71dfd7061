//! CLI administration tool for weather-service.
//!
//! Lets operators manage forecast overrides directly in the database without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Set an override (prompts for missing values)
//! cargo run --bin admin -- override set --city Paris --date 18.10.2026 --min 10 --max 18
//!
//! # Show one override
//! cargo run --bin admin -- override get --city Paris --date 18.10.2026
//!
//! # List overrides
//! cargo run --bin admin -- override list --city Paris
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `REDIS_URL` (optional): when set, `override set` drops the cached provider
//!   forecast for the same city and date

use weather_service::domain::entities::{NewForecastOverride, OverriddenForecast};
use weather_service::domain::repositories::ForecastOverrideRepository;
use weather_service::infrastructure::cache::{CacheService, RedisCache, keys};
use weather_service::infrastructure::persistence::PgForecastOverrideRepository;
use weather_service::utils::forecast_validation::{
    check_date_window, check_temperature_range, format_date, parse_date, today,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing weather-service.
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
    /// Manage forecast overrides
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Forecast override subcommands.
#[derive(Subcommand)]
enum OverrideAction {
    /// Create or replace an override
    Set {
        /// City name (case-sensitive)
        #[arg(long)]
        city: Option<String>,

        /// Date in dd.mm.yyyy
        #[arg(long)]
        date: Option<String>,

        /// Minimum temperature, °C
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        /// Maximum temperature, °C
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the override for a city and date
    Get {
        #[arg(long)]
        city: String,

        /// Date in dd.mm.yyyy
        #[arg(long)]
        date: String,
    },

    /// List overrides
    List {
        /// Only overrides for this city (exact match)
        #[arg(long)]
        city: Option<String>,
    },
}

/// Database subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Override { action } => handle_override_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches override management commands.
async fn handle_override_action(action: OverrideAction, pool: &PgPool) -> Result<()> {
    let repo = PgForecastOverrideRepository::new(Arc::new(pool.clone()));

    match action {
        OverrideAction::Set {
            city,
            date,
            min,
            max,
            yes,
        } => set_override(&repo, city, date, min, max, yes).await?,
        OverrideAction::Get { city, date } => get_override(&repo, city, date).await?,
        OverrideAction::List { city } => list_overrides(&repo, city).await?,
    }

    Ok(())
}

/// Creates or replaces an override with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for any value not given on the command line
/// 2. Apply the same validation as `POST /weather/forecast`
/// 3. Confirm (unless `--yes`)
/// 4. Upsert and drop the matching Redis cache entry if Redis is configured
async fn set_override(
    repo: &PgForecastOverrideRepository,
    city: Option<String>,
    date: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌦  Set Forecast Override".bright_blue().bold());
    println!();

    let city = match city {
        Some(c) => c,
        None => Input::new().with_prompt("City").interact_text()?,
    };
    let raw_date = match date {
        Some(d) => d,
        None => Input::new()
            .with_prompt("Date (dd.mm.yyyy)")
            .with_initial_text(format_date(today()))
            .interact_text()?,
    };
    let min_temperature = match min {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Min temperature °C")
            .interact_text()?,
    };
    let max_temperature = match max {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Max temperature °C")
            .interact_text()?,
    };

    let city = city.trim().to_string();
    if city.is_empty() {
        anyhow::bail!("City must not be empty");
    }
    let date = parse_date(&raw_date)?;
    check_temperature_range(min_temperature, max_temperature)?;
    check_date_window(date, today())?;

    println!();
    println!("{}", "Override details:".bright_white().bold());
    println!("  City: {}", city.cyan());
    println!("  Date: {}", format_date(date).cyan());
    println!(
        "  Min:  {}",
        format!("{min_temperature:.1} °C").bright_yellow()
    );
    println!(
        "  Max:  {}",
        format!("{max_temperature:.1} °C").bright_yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Save this override?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let record = repo
        .upsert(NewForecastOverride {
            city,
            date,
            min_temperature,
            max_temperature,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save override: {}", e))?;

    invalidate_cached_forecast(&record).await;

    println!();
    println!(
        "{}",
        format!("✅ Override #{} saved", record.id).green().bold()
    );
    println!();

    Ok(())
}

/// Drops the cached provider forecast so the override is served immediately.
///
/// Without `REDIS_URL` the running service may keep its cached entry until the TTL expires.
async fn invalidate_cached_forecast(record: &OverriddenForecast) {
    let Ok(redis_url) = std::env::var("REDIS_URL") else {
        println!(
            "{}",
            "⚠️  REDIS_URL not set: cached forecasts expire on their own".yellow()
        );
        return;
    };

    let key = keys::forecast(&record.city, record.date);
    match RedisCache::connect(&redis_url, 600).await {
        Ok(cache) => match cache.invalidate(&key).await {
            Ok(()) => println!("  Cache entry {} cleared", key.bright_black()),
            Err(e) => println!("{}", format!("⚠️  Cache not cleared: {}", e).yellow()),
        },
        Err(e) => println!("{}", format!("⚠️  Cache not cleared: {}", e).yellow()),
    }
}

/// Prints the override for a city and date.
async fn get_override(
    repo: &PgForecastOverrideRepository,
    city: String,
    raw_date: String,
) -> Result<()> {
    let date = parse_date(&raw_date)?;

    let record = repo
        .find(&city, date)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match record {
        Some(r) => {
            println!("{}", "🌦  Forecast Override".bright_blue().bold());
            println!();
            println!("  ID:      {}", r.id.to_string().bright_black());
            println!("  City:    {}", r.city.cyan());
            println!("  Date:    {}", format_date(r.date).cyan());
            println!("  Min:     {:.1} °C", r.min_temperature);
            println!("  Max:     {:.1} °C", r.max_temperature);
            println!(
                "  Updated: {}",
                r.updated_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        None => {
            println!(
                "{}",
                format!("No override for {} on {}", city, format_date(date)).yellow()
            );
        }
    }

    Ok(())
}

/// Lists overrides in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Forecast Overrides
///
///   ID   City                      Date         Min      Max
///   ──────────────────────────────────────────────────────────
///   1    Paris                     18.10.2026   10.0     18.0
/// ```
async fn list_overrides(repo: &PgForecastOverrideRepository, city: Option<String>) -> Result<()> {
    println!("{}", "📋 Forecast Overrides".bright_blue().bold());
    println!();

    let records = repo
        .list(city)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list overrides: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No overrides found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<25} {:<12} {:<8} {:<8}",
        "ID".bright_white().bold(),
        "City".bright_white().bold(),
        "Date".bright_white().bold(),
        "Min".bright_white().bold(),
        "Max".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for r in &records {
        println!(
            "  {:<4} {:<25} {:<12} {:<8.1} {:<8.1}",
            r.id.to_string().bright_black(),
            r.city.cyan(),
            format_date(r.date),
            r.min_temperature,
            r.max_temperature
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgForecastOverrideRepository::new(Arc::new(pool.clone()));
            if repo.health_check().await {
                println!("{}", "✅ Database connection OK".green().bold());
            } else {
                anyhow::bail!("Database did not answer");
            }
        }
    }

    Ok(())
}
