use anyhow::{Context, Result};
use common::Config;
use scheduler::DailyScheduler;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

async fn run_daily_digest() -> Result<()> {
    info!("Starting daily digest run");
    let report = orchestrator::run_once().await?;
    info!(
        stories = report.stories.len(),
        repositories = report.repositories.len(),
        notified = report.notified,
        "Daily digest run finished"
    );
    Ok(())
}

fn schedule_from_env(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Fail fast on missing secrets; each run reloads its own copy.
    Config::from_env().context("configuration error")?;

    let hour = schedule_from_env("DIGEST_SCHEDULE_HOUR", 0);
    let minute = schedule_from_env("DIGEST_SCHEDULE_MINUTE", 30);

    let mut scheduler = DailyScheduler::new().await?;
    scheduler.add_daily_job(hour, minute, run_daily_digest).await?;

    info!("Scheduler configured to run daily at {:02}:{:02} UTC", hour, minute);
    info!("Press Ctrl+C to stop the scheduler");

    scheduler.start().await?;
    tokio::signal::ctrl_c().await?;
    info!("Received interrupt signal, shutting down...");
    scheduler.shutdown().await?;

    Ok(())
}
