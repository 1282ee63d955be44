//! Configuration loading, env vars, CLI flags.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::engine::fees::FeeSchedule;
use crate::engine::DEFAULT_PROBE_AMOUNT;
use crate::node_client::TESTNET_MIRROR_NODE;
use crate::swap::DEFAULT_DEADLINE_SECS;
use crate::types::{QuoterError, Result};
use crate::venues::{AggregatorId, Venue, VenueTable};

#[cfg(feature = "cli")]
use clap::Parser;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mirror_node_url: String,
    pub rpc_url: Option<String>,
    pub fee_promille: u64,
    pub slippage_promille: u64,
    pub probe_amount: u64,
    pub deadline_secs: u64,
    pub request_timeout_secs: u64,
    pub venues: VenueTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub mirror_node_url: Option<String>,
    pub rpc_url: Option<String>,
    pub fee_promille: Option<u64>,
    pub slippage_promille: Option<u64>,
    pub probe_amount: Option<u64>,
    pub deadline_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Keyed by aggregator id; replaces the built-in testnet table when present.
    pub venues: Option<HashMap<String, Venue>>,
}

impl FileConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| QuoterError::Config(format!("invalid config file: {}", e)))
    }

    pub fn read(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuoterError::Config(format!("unable to read config {}: {}", path, e)))?;
        Self::from_toml(&contents)
    }

    fn venue_table(&self) -> Result<Option<VenueTable>> {
        let Some(raw) = &self.venues else {
            return Ok(None);
        };
        let mut venues = HashMap::with_capacity(raw.len());
        for (id, venue) in raw {
            venues.insert(AggregatorId::from_str(id)?, venue.clone());
        }
        Ok(Some(VenueTable::new(venues)))
    }
}

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliConfig {
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long)]
    pub mirror_node_url: Option<String>,
    #[arg(long)]
    pub rpc_url: Option<String>,
    #[arg(long)]
    pub fee_promille: Option<u64>,
    #[arg(long)]
    pub slippage_promille: Option<u64>,
    #[arg(long)]
    pub probe_amount: Option<u64>,
    #[arg(long)]
    pub deadline_secs: Option<u64>,
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Aggregator id as registered on the exchange (SaucerSwap, SaucerSwapV2, Pangolin).
    #[arg(long)]
    pub aggregator: String,
    /// Input token, `0x` address or `shard.realm.num`.
    #[arg(long)]
    pub token_a: String,
    /// Output token (or middle hop when `--token-c` is set).
    #[arg(long)]
    pub token_b: String,
    #[arg(long)]
    pub token_c: Option<String>,
    /// Pool fee tier(s); repeat once per hop for distinct tiers.
    #[arg(long)]
    pub pool_fee: Vec<u32>,
    /// Raw amount of the fixed side, in the token's smallest unit.
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long, default_value_t = false)]
    pub exact_out: bool,
    /// Also print `Exchange.swap` calldata for the quote.
    #[arg(long, default_value_t = false)]
    pub calldata: bool,
    /// The input leg is native HBAR.
    #[arg(long, default_value_t = false)]
    pub from_hbar: bool,
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::layered(FileConfig::default())
    }

    /// Apply env vars and defaults beneath an already-read file config.
    fn layered(file_config: FileConfig) -> Result<Self> {
        let venues = match file_config.venue_table()? {
            Some(table) => table,
            None => VenueTable::testnet(),
        };
        let mirror_node_url = file_config
            .mirror_node_url
            .or(env::var("MIRROR_NODE_URL").ok())
            .unwrap_or_else(|| TESTNET_MIRROR_NODE.to_string());
        let rpc_url = file_config.rpc_url.or(env::var("RPC_URL").ok());
        if rpc_url.is_none() {
            info!("RPC_URL not set, quoter calls go through the mirror node.");
        }

        let config = Self {
            mirror_node_url,
            rpc_url,
            fee_promille: file_config
                .fee_promille
                .or(env_parse("FEE_PROMILLE"))
                .unwrap_or(FeeSchedule::DEFAULT_FEE_PROMILLE),
            slippage_promille: file_config
                .slippage_promille
                .or(env_parse("SLIPPAGE_PROMILLE"))
                .unwrap_or(FeeSchedule::DEFAULT_SLIPPAGE_PROMILLE),
            probe_amount: file_config
                .probe_amount
                .or(env_parse("PROBE_AMOUNT"))
                .unwrap_or(DEFAULT_PROBE_AMOUNT),
            deadline_secs: file_config
                .deadline_secs
                .or(env_parse("DEADLINE_SECS"))
                .unwrap_or(DEFAULT_DEADLINE_SECS),
            request_timeout_secs: file_config
                .request_timeout_secs
                .or(env_parse("REQUEST_TIMEOUT_SECS"))
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            venues,
        };
        config.fee_schedule()?;
        Ok(config)
    }

    /// CLI flags over `--config` TOML over env vars over defaults.
    #[cfg(feature = "cli")]
    pub fn load_with_cli() -> Result<(Self, CliConfig)> {
        let cli = CliConfig::parse();
        let file_config = match &cli.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        let merged = FileConfig {
            mirror_node_url: cli.mirror_node_url.clone().or(file_config.mirror_node_url),
            rpc_url: cli.rpc_url.clone().or(file_config.rpc_url),
            fee_promille: cli.fee_promille.or(file_config.fee_promille),
            slippage_promille: cli.slippage_promille.or(file_config.slippage_promille),
            probe_amount: cli.probe_amount.or(file_config.probe_amount),
            deadline_secs: cli.deadline_secs.or(file_config.deadline_secs),
            request_timeout_secs: cli.request_timeout_secs.or(file_config.request_timeout_secs),
            venues: file_config.venues,
        };
        Ok((Self::layered(merged)?, cli))
    }

    /// Load from an optional TOML file, env vars and defaults (no CLI parsing).
    pub fn load_from_file(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::layered(FileConfig::read(path)?),
            None => Self::load(),
        }
    }

    pub fn fee_schedule(&self) -> Result<FeeSchedule> {
        FeeSchedule::new(self.fee_promille, self.slippage_promille)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
