//! Orar command-line viewer.
//!
//! Fetches the academic weeks visible around a date for one search and prints
//! the week containing that date.
//!
//! # Usage
//!
//! ```bash
//! ORAR_API_URL=http://localhost:3000 ORAR_QUERY=IA-211 \
//!   cargo run --bin orar --features cli
//! ```
//!
//! # Environment Variables
//!
//! - `ORAR_SEARCH_TYPE`: `grupe` | `profesori` | `aule` (default: grupe)
//! - `ORAR_QUERY`: search text (default depends on the search type)
//! - `ORAR_DATE`: reference date, `YYYY-MM-DD` (default: today)
//! - `ORAR_VIEW`: `week` | `month` (default: week)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Client settings come from `orar.toml` when present, otherwise from the
//! `ORAR_CLIENT_TYPE` / `ORAR_API_URL` variables.

use std::env;

use anyhow::{anyhow, Context};
use chrono::Local;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use orar_rust::cache::ScheduleCoordinator;
use orar_rust::calendar::{visible_weeks, week_days, week_info, Semester, Viewport};
use orar_rust::fetch::{ClientConfig, ClientFactory};
use orar_rust::models::{format_day, parse_day, SearchContext, SearchType};
use orar_rust::services::WeekSummary;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let search_type: SearchType = match env::var("ORAR_SEARCH_TYPE") {
        Ok(raw) => raw.parse().map_err(|e: String| anyhow!(e))?,
        Err(_) => SearchType::Group,
    };
    let query = env::var("ORAR_QUERY").unwrap_or_else(|_| search_type.default_query().to_string());
    let date = match env::var("ORAR_DATE") {
        Ok(raw) => parse_day(&raw).with_context(|| format!("ORAR_DATE is not a date: {}", raw))?,
        Err(_) => Local::now().date_naive(),
    };
    let viewport = match env::var("ORAR_VIEW").as_deref() {
        Ok("month") => Viewport::month_grid(),
        Ok("week") | Err(_) => Viewport::week(),
        Ok(other) => return Err(anyhow!("Unknown ORAR_VIEW: {}", other)),
    };

    let config = match ClientConfig::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; falling back to environment", e);
            ClientConfig::from_env()?
        }
    };
    let client = ClientFactory::create(&config)?;

    let context = SearchContext::new(search_type, query);
    let visible = visible_weeks(date, viewport);
    let semester = Semester::for_date(date);

    let mut coordinator = ScheduleCoordinator::new(client);
    info!("Using {} client", coordinator.client_name());
    let started = coordinator.set_context(context.clone(), &visible, semester);
    info!(
        "Fetching {} week(s) for {} (semester {})",
        started, context, semester
    );
    coordinator.settle().await;

    let cache = coordinator.cache();
    if let Some(message) = cache.last_error() {
        error!("Schedule fetch failed: {}", message);
    }

    let week = week_info(date);
    println!(
        "Week {} starting {} ({})",
        week.week_number,
        format_day(week.start_date),
        context
    );
    for day in week_days(date) {
        let entries = cache.schedule_for_date(day);
        println!("\n{} {}", day.format("%A"), format_day(day));
        if entries.is_empty() {
            println!("  -");
        }
        for entry in entries {
            println!(
                "  {:<12} {:<3} {} | {} | {} | {}",
                entry.time,
                entry.kind.abbreviation(),
                entry.subject,
                entry.teacher,
                entry.room,
                entry.group
            );
        }
    }

    println!();
    for row in WeekSummary::build(cache, date).render_rows() {
        println!("{}", row);
    }

    Ok(())
}
