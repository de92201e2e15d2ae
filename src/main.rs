use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use yield_collector::config::{Config, DEFAULT_CONFIG_PATH};
use yield_collector::domain::price::PriceService;
use yield_collector::exchanges::api_clients::RaydiumApiClient;
use yield_collector::infrastructure::blockchain::SolanaRpcClient;
use yield_collector::infrastructure::price::CoinGeckoPriceFeed;
use yield_collector::shared::types::ProtocolTag;
use yield_collector::{
    OrcaCollector, RaydiumCollector, TokenRegistry, YieldCollector, YieldOpportunity,
};

#[derive(Parser, Debug)]
#[command(version, about = "Collect normalized yield opportunities from Solana DEX pools")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// RPC endpoint URL (overrides config)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Log filter, e.g. `debug` or `yield_collector=trace` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single protocol's collector (raydium or orca)
    #[arg(long)]
    protocol: Option<ProtocolTag>,

    /// Indent the JSON report
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct CollectionReport {
    collected_at: DateTime<Utc>,
    opportunities: Vec<YieldOpportunity>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let mut cfg = Config::from_file(&args.config).with_context(|| format!("load {}", args.config))?;
    if let Some(rpc_url) = args.rpc_url {
        cfg.rpc.url = rpc_url;
    }

    let registry = TokenRegistry::global();
    let feed = CoinGeckoPriceFeed::new(
        cfg.price.base_url.clone(),
        cfg.price.min_request_interval(),
        Arc::clone(&registry),
    );
    let price_service = Arc::new(PriceService::with_cache_ttl(
        Arc::new(feed),
        cfg.price.cache_ttl(),
    ));

    let mut collectors: Vec<Box<dyn YieldCollector>> = Vec::new();
    for protocol in selected_protocols(&cfg, args.protocol) {
        let collector: Box<dyn YieldCollector> = match protocol {
            ProtocolTag::Raydium => Box::new(RaydiumCollector::new(
                &cfg.collectors,
                Arc::new(RaydiumApiClient::new(cfg.raydium.base_url.clone())),
            )?),
            ProtocolTag::Orca => Box::new(OrcaCollector::new(
                &cfg.collectors,
                Arc::clone(&price_service),
                Arc::new(SolanaRpcClient::new(cfg.rpc.url.clone())),
                Arc::clone(&registry),
            )?),
        };
        info!(
            "{} collector ready with {} pools",
            collector.protocol_name(),
            collector.configurations().len()
        );
        collectors.push(collector);
    }

    if collectors.is_empty() {
        warn!("No collectors configured in {}", args.config);
    }

    let opportunities: Vec<YieldOpportunity> = join_all(collectors.iter().map(|c| c.collect()))
        .await
        .into_iter()
        .flatten()
        .collect();
    info!("Collected {} opportunities", opportunities.len());

    let report = CollectionReport {
        collected_at: Utc::now(),
        opportunities,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON
fn init_tracing(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// An explicit `--protocol` always runs; otherwise every protocol that has
/// at least one configured pool.
fn selected_protocols(cfg: &Config, requested: Option<ProtocolTag>) -> Vec<ProtocolTag> {
    match requested {
        Some(protocol) => vec![protocol],
        None => [ProtocolTag::Raydium, ProtocolTag::Orca]
            .into_iter()
            .filter(|p| cfg.collectors.iter().any(|c| c.protocol() == *p))
            .collect(),
    }
}
