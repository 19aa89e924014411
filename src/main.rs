use anyhow::{Context, Result};
use blubar_client::{DeviceResolver, ResolvedDevice, StatusClient};
use blubar_core::config::ResolverConfig;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// blubar - resolve a BluOS player address for menu-bar plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    config: PathBuf,

    /// Fallback player address, e.g. http://192.168.1.50:11000
    #[arg(long, env = "BLUBAR_URL")]
    fallback: Option<String>,

    /// Override the discovery timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Emit the resolution result as JSON
    #[arg(long)]
    json: bool,

    /// Diagnose the resolved device (working / degraded / unreachable)
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the resolution result for the
    // consuming menu layer.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let resolver = DeviceResolver::new(config).context("invalid configuration")?;

    let resolved = match resolver.resolve().await {
        Ok(resolved) => resolved,
        Err(e) => {
            error!(error = %e, "device resolution failed");
            std::process::exit(1);
        }
    };

    info!(
        url = %resolved.base_url,
        source = %resolved.source,
        "resolved player address"
    );

    print_result(&resolver, &resolved, args.json);

    if args.check {
        diagnose(&resolver, &resolved).await;
    }

    Ok(())
}

/// Loads the YAML configuration file if present and applies CLI overrides.
fn load_config(args: &Args) -> Result<ResolverConfig> {
    let mut config = if args.config.exists() {
        let content = fs::read_to_string(&args.config)
            .with_context(|| format!("failed to read config file: {:?}", args.config))?;
        serde_yaml::from_str(&content).context("failed to parse config file")?
    } else {
        debug!(path = ?args.config, "no config file, using defaults");
        ResolverConfig::default()
    };

    if let Some(fallback) = &args.fallback {
        config.fallback_url = Some(fallback.clone());
    }
    if let Some(secs) = args.timeout {
        config.discovery_timeout_secs = secs;
    }

    Ok(config)
}

fn print_result(resolver: &DeviceResolver, resolved: &ResolvedDevice, json: bool) {
    if json {
        let output = serde_json::json!({
            "base_url": resolved.base_url,
            "source": resolved.source,
            "network": resolver.config().network_name,
        });
        println!("{output}");
    } else if let Some(network) = &resolver.config().network_name {
        println!("{} ({}, {})", resolved.base_url, resolved.source, network);
    } else {
        println!("{} ({})", resolved.base_url, resolved.source);
    }
}

/// Three-way diagnosis of the resolved address: working, alive but API
/// degraded, or completely unreachable.
async fn diagnose(resolver: &DeviceResolver, resolved: &ResolvedDevice) {
    match resolver.probe().probe_status(&resolved.base_url).await {
        Ok(status) => {
            println!("check: working ({status})");

            match StatusClient::new(&resolved.base_url).fetch_status().await {
                Ok(player) => println!("now playing: {}", player.summary()),
                Err(e) => warn!(error = %e, "could not fetch player status"),
            }
        }
        Err(failure) => {
            warn!(cause = %failure, "working-device check failed");

            if resolver.probe().is_reachable(&resolved.base_url).await {
                println!("check: host alive but API degraded");
            } else {
                println!("check: completely unreachable");
            }
        }
    }
}
