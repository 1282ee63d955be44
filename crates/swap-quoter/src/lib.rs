// Library entry point for swap-quoter

pub mod bindings;
pub mod config;
pub mod engine;
pub mod node_client;
pub mod swap;
pub mod types;
pub mod utils;
pub mod venues;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
mod tests;

pub use alloy_primitives::{Address, Bytes, U256};
pub use engine::fees::FeeSchedule;
pub use engine::QuoteEngine;
pub use types::{Direction, Quote, QuoterError, Result, SplitQuote, TradeIntent};
pub use venues::{AggregatorId, Venue, VenueTable};
