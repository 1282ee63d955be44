//! Common types, enums, error handling, data models.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::venues::AggregatorId;

/// Common error type for the swap-quoter system.
#[derive(Debug, thiserror::Error)]
pub enum QuoterError {
    #[error("Unsupported aggregator: {0}")]
    UnsupportedAggregator(String),
    #[error("Upstream query failed: {0}")]
    Upstream(String),
    #[error("Arithmetic violation: {0}")]
    Arithmetic(String),
    #[error("Invalid trade intent: {0}")]
    InvalidIntent(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

pub type Result<T> = std::result::Result<T, QuoterError>;

/// Which side of the trade the caller fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `amount_from` is fixed; the quote computes the minimum acceptable output.
    ExactIn,
    /// `amount_to` is fixed; the quote computes the maximum acceptable input.
    ExactOut,
}

impl Direction {
    pub fn is_exact_out(self) -> bool {
        matches!(self, Direction::ExactOut)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ExactIn => write!(f, "exact_in"),
            Direction::ExactOut => write!(f, "exact_out"),
        }
    }
}

impl FromStr for Direction {
    type Err = QuoterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "exact_in" | "in" => Ok(Direction::ExactIn),
            "exact_out" | "out" => Ok(Direction::ExactOut),
            other => Err(QuoterError::InvalidIntent(format!("unknown direction '{}'", other))),
        }
    }
}

/// A single quote request. Built per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeIntent {
    pub aggregator: AggregatorId,
    pub token_a: Address,
    pub token_b: Address,
    /// Optional second hop: `token_a -> token_b -> token_c`.
    pub token_c: Option<Address>,
    /// Pool fee tiers for fee-tiered venues. One entry is reused for every hop.
    pub pool_fees: Vec<u32>,
    pub direction: Direction,
    /// The caller-fixed amount: input for `ExactIn`, output for `ExactOut`.
    pub amount: U256,
}

impl TradeIntent {
    pub fn new(aggregator: AggregatorId, token_a: Address, token_b: Address, direction: Direction, amount: U256) -> Self {
        Self {
            aggregator,
            token_a,
            token_b,
            token_c: None,
            pool_fees: Vec::new(),
            direction,
            amount,
        }
    }

    pub fn via(mut self, token_c: Address) -> Self {
        self.token_c = Some(token_c);
        self
    }

    pub fn with_pool_fee(mut self, fee: u32) -> Self {
        self.pool_fees = vec![fee];
        self
    }

    pub fn with_pool_fees(mut self, fees: Vec<u32>) -> Self {
        self.pool_fees = fees;
        self
    }

    /// Hop tokens in trade order (`token_a` first).
    pub fn hops(&self) -> Vec<Address> {
        let mut hops = vec![self.token_a, self.token_b];
        hops.extend(self.token_c);
        hops
    }
}

/// Swap parameters ready for the exchange contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub aggregator: AggregatorId,
    pub direction: Direction,
    /// Input amount: exact for `ExactIn`, upper bound for `ExactOut`.
    pub amount_from: U256,
    /// Output amount: lower bound for `ExactIn`, exact for `ExactOut`.
    pub amount_to: U256,
    /// Venue-specific hop encoding.
    pub path: Bytes,
    /// Protocol fee the exchange is expected to collect, in input-token units.
    pub fee_estimate: U256,
    pub gas_estimate: Option<u64>,
}

impl Quote {
    pub fn path_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.path))
    }
}

/// Quotes for a multi-leg (split) swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitQuote {
    pub legs: Vec<Quote>,
    pub total_from: U256,
    pub total_to: U256,
}
