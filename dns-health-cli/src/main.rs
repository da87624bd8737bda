//! DNS Health command-line front-end
//!
//! Reconciles WP Engine's declared domain state with live DNS and prints the
//! classified result. Operator overrides are persisted to a JSON file shared
//! by every invocation.

mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dns_health_app::adapters::JsonFileOverrideRepository;
use dns_health_app::{AppState, AppStateBuilder};
use dns_health_core::services::OverrideService;
use dns_health_core::traits::SystemDnsResolver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;

#[derive(Parser)]
#[command(name = "dns-health", version, about = "WP Engine domain health checker")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "DNS_HEALTH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh and list every domain with its verdict
    Refresh {
        #[arg(long)]
        json: bool,
    },
    /// Refresh and print a per-site summary
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Mark a domain as manually confirmed
    Confirm { domain: String },
    /// Remove a manual confirmation
    Unconfirm { domain: String },
    /// List confirmed domains
    Overrides,
    /// Refresh periodically until interrupted
    ///
    /// Ctrl-C also abandons a refresh that is still running.
    Watch {
        /// Seconds between refreshes (defaults to `refresh.watch_interval_secs`)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::new(config.log_filter()))
        .init();

    tracing::debug!("Loaded configuration: {config:?}");

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Refresh { json } => {
            let state = build_state(config).await?;
            let snapshot = state.trigger_refresh().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", output::format_domain_table(&snapshot));
            }
        }
        Command::Status { json } => {
            let state = build_state(config).await?;
            let snapshot = state.trigger_refresh().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.statistics)?);
            } else {
                println!("{}", output::format_site_table(&snapshot));
            }
        }
        Command::Confirm { domain } => {
            let service = override_service(config).await;
            let state = service.confirm(&domain).await?;
            println!("Confirmed {}", state.domain);
        }
        Command::Unconfirm { domain } => {
            let service = override_service(config).await;
            let state = service.unconfirm(&domain).await?;
            println!("Unconfirmed {}", state.domain);
        }
        Command::Overrides => {
            let service = override_service(config).await;
            println!("{}", output::format_overrides(&service.list().await));
        }
        Command::Watch { interval } => {
            let secs = interval.unwrap_or(config.refresh.watch_interval_secs).max(1);
            let state = build_state(config).await?;
            watch(&state, Duration::from_secs(secs)).await;
        }
    }
    Ok(())
}

/// Override commands only touch the store; no provider credentials needed.
async fn override_service(config: &Config) -> OverrideService {
    let path = config.overrides_path();
    tracing::debug!("Using override store {}", path.display());
    let service = OverrideService::new(Arc::new(JsonFileOverrideRepository::new(path)));
    service.load().await;
    service
}

async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let resolver = SystemDnsResolver::new(&config.dns.nameservers)
        .context("Invalid DNS nameserver configuration")?;

    let state = AppStateBuilder::new()
        .credentials(config.credentials()?)
        .resolver(Arc::new(resolver))
        .override_repository(Arc::new(JsonFileOverrideRepository::new(
            config.overrides_path(),
        )))
        .fingerprints(config.fingerprints.clone())
        .options(config.refresh_options())
        .build()?;

    state.run_startup().await;
    Ok(state)
}

async fn watch(state: &AppState, every: Duration) {
    tracing::info!("Refreshing every {}s, press Ctrl-C to stop", every.as_secs());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    watch_until(state, every, ctrl_c).await;
}

/// Refresh on every tick until `stop` resolves, including mid-refresh.
async fn watch_until<F>(state: &AppState, every: Duration, mut stop: F) -> usize
where
    F: std::future::Future + Unpin,
{
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut completed = 0;

    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            _ = &mut stop => break,
            result = state.trigger_refresh() => {
                completed += 1;
                match result {
                    Ok(snapshot) => println!("{}", output::format_statistics(&snapshot)),
                    // 保留上一次快照，下一轮继续
                    Err(e) => tracing::warn!("Refresh failed, keeping previous snapshot: {e}"),
                }
            }
        }
    }
    tracing::info!("Interrupted, stopping");
    completed
}
