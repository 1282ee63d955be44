pub mod fees;
pub mod path;
pub mod strategies;

use alloy_primitives::{Address, U256};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use crate::bindings::IERC20;
use crate::config::AppConfig;
use crate::node_client::{ContractReader, JsonRpcReader, MirrorNodeReader};
use crate::types::{Quote, QuoterError, Result, SplitQuote, TradeIntent};
use crate::venues::{Venue, VenueTable};
use fees::FeeSchedule;

/// Default probe size for oracle-priced venues.
pub const DEFAULT_PROBE_AMOUNT: u64 = 10_000;

/// The quote calculator.
///
/// Holds no mutable state: the venue table and fee schedule are fixed at construction and
/// every quote is an independent chain of reads followed by integer arithmetic.
pub struct QuoteEngine {
    reader: Arc<dyn ContractReader>,
    venues: VenueTable,
    fees: FeeSchedule,
    probe_amount: U256,
}

impl QuoteEngine {
    pub fn new(reader: Arc<dyn ContractReader>, venues: VenueTable, fees: FeeSchedule) -> Self {
        Self {
            reader,
            venues,
            fees,
            probe_amount: U256::from(DEFAULT_PROBE_AMOUNT),
        }
    }

    pub fn with_probe_amount(mut self, probe_amount: U256) -> Self {
        self.probe_amount = probe_amount;
        self
    }

    /// Build an engine from config: `eth_call` when an RPC url is set, the mirror node otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let reader: Arc<dyn ContractReader> = match &config.rpc_url {
            Some(rpc_url) => {
                info!("Quoting through JSON-RPC relay {}", rpc_url);
                Arc::new(JsonRpcReader::new(rpc_url.clone(), config.request_timeout())?)
            }
            None => {
                info!("Quoting through mirror node {}", config.mirror_node_url);
                Arc::new(MirrorNodeReader::new(config.mirror_node_url.clone(), config.request_timeout())?)
            }
        };
        let fees = FeeSchedule::new(config.fee_promille, config.slippage_promille)?;
        Ok(Self::new(reader, config.venues.clone(), fees).with_probe_amount(U256::from(config.probe_amount)))
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn venues(&self) -> &VenueTable {
        &self.venues
    }

    pub fn probe_amount(&self) -> U256 {
        self.probe_amount
    }

    /// Quote a single intent with the engine's own fee schedule.
    pub async fn quote(&self, intent: &TradeIntent) -> Result<Quote> {
        self.quote_with_fees(intent, &self.fees).await
    }

    /// Quote a single intent with an explicit fee schedule, e.g. right after an admin fee change.
    pub async fn quote_with_fees(&self, intent: &TradeIntent, fees: &FeeSchedule) -> Result<Quote> {
        let venue = self.venues.resolve(intent.aggregator)?;
        debug!(aggregator = %intent.aggregator, kind = venue.kind(), direction = %intent.direction, amount = %intent.amount, "quoting");
        let reader = self.reader.as_ref();
        let quote = match venue {
            Venue::ConstantProduct { router } => {
                strategies::quote_constant_product(reader, *router, intent, fees).await?
            }
            Venue::ConcentratedLiquidity { quoter, default_pool_fee } => {
                strategies::quote_concentrated_liquidity(reader, *quoter, *default_pool_fee, intent, fees).await?
            }
            Venue::ExternalRate { oracle, connector } => {
                strategies::quote_from_external_rate(reader, *oracle, *connector, self.probe_amount, intent, fees).await?
            }
        };
        debug!(
            amount_from = %quote.amount_from,
            amount_to = %quote.amount_to,
            fee_estimate = %quote.fee_estimate,
            path = %quote.path_hex(),
            "quote ready"
        );
        Ok(quote)
    }

    /// Quote several independent legs concurrently. Any failing leg fails the whole split.
    pub async fn quote_split(&self, intents: &[TradeIntent]) -> Result<SplitQuote> {
        if intents.is_empty() {
            return Err(QuoterError::InvalidIntent("split quote needs at least one leg".into()));
        }
        let legs = try_join_all(intents.iter().map(|intent| self.quote(intent))).await?;

        let mut total_from = U256::ZERO;
        let mut total_to = U256::ZERO;
        for leg in &legs {
            total_from = fees::checked_add(total_from, leg.amount_from, "split amount_from total")?;
            total_to = fees::checked_add(total_to, leg.amount_to, "split amount_to total")?;
        }
        Ok(SplitQuote { legs, total_from, total_to })
    }

    /// ERC-20 `decimals()` of a token, for display purposes.
    pub async fn token_decimals(&self, token: Address) -> Result<u8> {
        Ok(strategies::read(self.reader.as_ref(), token, &IERC20::decimalsCall {}).await?.decimals)
    }
}
