//! Galleria - Telegram album publishing bot.
//!
//! Runs the bot dispatcher and, alongside it, the loop that keeps the local Bot
//! API server's download cache under its disk budget.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use galleria_bot::{GalleriaBot, GalleriaConfig};
use galleria_cache::{CacheReclaimer, CycleOutcome};
use galleria_core::Code;
use galleria_error::GalleriaResult;
use galleria_storage::{CodeAllocator, build_store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let config = GalleriaConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await?,
        Commands::Check => check(&config),
        Commands::Counter => counter(&config).await?,
        Commands::Reclaim => reclaim(config).await?,
    }
    Ok(())
}

async fn run(config: GalleriaConfig) -> GalleriaResult<()> {
    let store = build_store(&config.kv)?;
    let bot = Arc::new(GalleriaBot::from_config(&config, store)?);

    let cancel = CancellationToken::new();
    let reclaimer = Arc::new(CacheReclaimer::new(config.cache.clone()));
    let reclaim_task = tokio::spawn(reclaimer.run(cancel.clone()));

    bot.run().await;

    cancel.cancel();
    if let Err(e) = reclaim_task.await {
        warn!(error = %e, "Reclamation task ended abnormally");
    }
    info!("Shut down");
    Ok(())
}

fn check(config: &GalleriaConfig) {
    println!("Configuration OK");
    println!("  kv backend:     {}", config.kv.backend);
    println!("  intake mode:    {}", config.intake.mode());
    println!("  public url:     {}", config.publish.worker_base_url);
    println!("  code prefix:    {}", config.publish.code_prefix);
    println!(
        "  categories:     {}",
        config.publish.category_list().iter().collect::<Vec<_>>().join(", ")
    );
    println!("  allowed users:  {}", config.telegram.allowed_users.len());
    println!(
        "  cache:          {} ({})",
        config.cache.dir().display(),
        if *config.cache.enabled() { "reclaiming" } else { "disabled" }
    );
}

async fn counter(config: &GalleriaConfig) -> GalleriaResult<()> {
    let store = build_store(&config.kv)?;
    let allocator = CodeAllocator::new(store, &config.publish.code_prefix);
    let current = allocator.current().await?;
    println!("counter: {}", current);
    println!(
        "next code: {}",
        Code::from_counter(allocator.prefix(), current + 1)
    );
    Ok(())
}

async fn reclaim(config: GalleriaConfig) -> Result<(), tokio::task::JoinError> {
    let reclaimer = CacheReclaimer::new(config.cache);
    let outcome = tokio::task::spawn_blocking(move || reclaimer.run_cycle()).await?;

    match outcome {
        CycleOutcome::MissingDirectory => println!("Cache directory does not exist"),
        CycleOutcome::MeasurementFailed => println!("Free space could not be measured"),
        CycleOutcome::Sufficient { available } => {
            println!("Enough free space: {} bytes available", available)
        }
        CycleOutcome::Reclaimed(report) => println!(
            "Removed {} files, freed {} bytes",
            report.deleted.len(),
            report.freed_bytes
        ),
    }
    Ok(())
}
