//! Calldata for the exchange's `swap` and `splitSwap` entry points.
//!
//! Only the call arguments are produced here; signing and submission happen elsewhere.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolCall;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bindings::IExchange;
use crate::engine::fees::{checked_add, checked_mul};
use crate::types::{Direction, Quote, QuoterError, Result, SplitQuote};

pub const DEFAULT_DEADLINE_SECS: u64 = 1000;

/// Tinybars (8 decimals) to weibars (18 decimals), the unit of `msg.value` on the relay.
pub const WEIBARS_PER_TINYBAR: u64 = 10_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SwapOptions {
    /// Input leg is native HBAR rather than a token.
    pub is_token_from_hbar: bool,
    /// Let the exchange take its fee from the transferred amount. Defaults to the quote's
    /// direction (`true` for exact-out).
    pub fee_on_transfer: Option<bool>,
    pub deadline_secs: u64,
}

impl Default for SwapOptions {
    fn default() -> Self {
        Self {
            is_token_from_hbar: false,
            fee_on_transfer: None,
            deadline_secs: DEFAULT_DEADLINE_SECS,
        }
    }
}

/// Everything needed to send one `swap` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub call: IExchange::swapCall,
    /// Native value to attach, in weibars.
    pub value: U256,
}

impl SwapRequest {
    pub fn from_quote(quote: &Quote, options: &SwapOptions, now: u64) -> Result<Self> {
        let fee_on_transfer = options.fee_on_transfer.unwrap_or(quote.direction == Direction::ExactOut);
        let call = IExchange::swapCall {
            aggregatorId: quote.aggregator.as_str().to_string(),
            path: quote.path.clone(),
            amountFrom: quote.amount_from,
            amountTo: quote.amount_to,
            deadline: deadline(now, options.deadline_secs)?,
            isTokenFromHBAR: options.is_token_from_hbar,
            feeOnTransfer: fee_on_transfer,
        };
        Ok(Self {
            value: native_value(quote.amount_from, options.is_token_from_hbar)?,
            call,
        })
    }

    pub fn calldata(&self) -> Bytes {
        self.call.abi_encode().into()
    }
}

/// Everything needed to send one `splitSwap` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSwapRequest {
    pub call: IExchange::splitSwapCall,
    pub value: U256,
}

impl SplitSwapRequest {
    pub fn from_split(split: &SplitQuote, options: &SwapOptions, now: u64) -> Result<Self> {
        let first = split
            .legs
            .first()
            .ok_or_else(|| QuoterError::InvalidIntent("split swap needs at least one leg".into()))?;
        if split.legs.iter().any(|leg| leg.direction != first.direction) {
            return Err(QuoterError::InvalidIntent("split swap legs must share a direction".into()));
        }
        let fee_on_transfer = options.fee_on_transfer.unwrap_or(first.direction == Direction::ExactOut);

        let mut total_from = U256::ZERO;
        for leg in &split.legs {
            total_from = checked_add(total_from, leg.amount_from, "split amount_from total")?;
        }

        let call = IExchange::splitSwapCall {
            aggregatorIds: split.legs.iter().map(|l| l.aggregator.as_str().to_string()).collect(),
            paths: split.legs.iter().map(|l| l.path.clone()).collect(),
            amountsFrom: split.legs.iter().map(|l| l.amount_from).collect(),
            amountsTo: split.legs.iter().map(|l| l.amount_to).collect(),
            deadline: deadline(now, options.deadline_secs)?,
            isTokenFromHBAR: options.is_token_from_hbar,
            feeOnTransfer: fee_on_transfer,
        };
        Ok(Self {
            value: native_value(total_from, options.is_token_from_hbar)?,
            call,
        })
    }

    pub fn calldata(&self) -> Bytes {
        self.call.abi_encode().into()
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn deadline(now: u64, deadline_secs: u64) -> Result<U256> {
    now.checked_add(deadline_secs)
        .map(U256::from)
        .ok_or_else(|| QuoterError::Arithmetic("swap deadline overflows u64".into()))
}

fn native_value(amount_from: U256, is_token_from_hbar: bool) -> Result<U256> {
    if !is_token_from_hbar {
        return Ok(U256::ZERO);
    }
    checked_mul(amount_from, U256::from(WEIBARS_PER_TINYBAR), "tinybar to weibar")
}
