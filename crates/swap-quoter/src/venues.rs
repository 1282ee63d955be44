//! Known DEX venues and the startup lookup table that maps them to a pricing model.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{QuoterError, Result};

/// Aggregator identifiers registered on the exchange contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregatorId {
    SaucerSwap,
    SaucerSwapV2,
    Pangolin,
}

impl AggregatorId {
    pub const ALL: [AggregatorId; 3] = [AggregatorId::SaucerSwap, AggregatorId::SaucerSwapV2, AggregatorId::Pangolin];

    /// The identifier string the exchange contract expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregatorId::SaucerSwap => "SaucerSwap",
            AggregatorId::SaucerSwapV2 => "SaucerSwapV2",
            AggregatorId::Pangolin => "Pangolin",
        }
    }
}

impl fmt::Display for AggregatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregatorId {
    type Err = QuoterError;

    fn from_str(s: &str) -> Result<Self> {
        AggregatorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| QuoterError::UnsupportedAggregator(s.to_string()))
    }
}

/// Pricing model of a venue together with the contract it is priced against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Venue {
    /// Uniswap-V2 style router exposing `getAmountsOut` / `getAmountsIn`.
    ConstantProduct { router: Address },
    /// Fee-tiered quoter exposing `quoteExactInput` / `quoteExactOutput`.
    ConcentratedLiquidity {
        quoter: Address,
        #[serde(default)]
        default_pool_fee: Option<u32>,
    },
    /// Oracle exposing `getRate`, priced at a fixed probe amount.
    ExternalRate {
        oracle: Address,
        #[serde(default)]
        connector: Option<Address>,
    },
}

impl Venue {
    pub fn kind(&self) -> &'static str {
        match self {
            Venue::ConstantProduct { .. } => "constant_product",
            Venue::ConcentratedLiquidity { .. } => "concentrated_liquidity",
            Venue::ExternalRate { .. } => "external_rate",
        }
    }
}

/// `getRate` connector meaning "no intermediate token".
pub const NO_CONNECTOR: Address = address!("FFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF");

/// Immutable aggregator -> venue table, assembled once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueTable {
    venues: HashMap<AggregatorId, Venue>,
}

impl VenueTable {
    pub fn new(venues: HashMap<AggregatorId, Venue>) -> Self {
        Self { venues }
    }

    /// Hedera testnet deployments.
    pub fn testnet() -> Self {
        let mut venues = HashMap::new();
        venues.insert(
            AggregatorId::SaucerSwapV2,
            Venue::ConcentratedLiquidity {
                quoter: address!("73CC0372e9a1e95BC61160EccAc0F0eA58Aec503"),
                default_pool_fee: Some(3000),
            },
        );
        venues.insert(
            AggregatorId::Pangolin,
            Venue::ExternalRate {
                oracle: address!("5fae1453f35450E7eBfD1F278DA9cb5ca3DC270b"),
                connector: None,
            },
        );
        Self { venues }
    }

    /// Parse a raw identifier and resolve its venue.
    pub fn resolve_str(&self, id: &str) -> Result<(AggregatorId, &Venue)> {
        let id = AggregatorId::from_str(id)?;
        Ok((id, self.resolve(id)?))
    }

    pub fn resolve(&self, id: AggregatorId) -> Result<&Venue> {
        self.venues
            .get(&id)
            .ok_or_else(|| QuoterError::UnsupportedAggregator(format!("{} has no configured venue", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AggregatorId, &Venue)> {
        self.venues.iter()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl Default for VenueTable {
    fn default() -> Self {
        Self::testnet()
    }
}
