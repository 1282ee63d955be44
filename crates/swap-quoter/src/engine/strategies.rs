//! Pricing strategies, one per venue kind.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use tracing::{debug, warn};

use crate::bindings::{IQuoter, IRateOracle, IRouter};
use crate::engine::fees::{checked_div, checked_mul, FeeSchedule};
use crate::engine::path;
use crate::node_client::ContractReader;
use crate::types::{Direction, Quote, QuoterError, Result, TradeIntent};
use crate::venues::NO_CONNECTOR;

/// Fixed-point scale of oracle rates.
pub const RATE_SCALE: u64 = 1_000_000_000_000_000_000;

/// Issue a simulated call and decode its return tuple.
pub async fn read<C: SolCall>(reader: &dyn ContractReader, to: Address, call: &C) -> Result<C::Return> {
    let data = reader.call(to, call.abi_encode().into()).await?;
    Ok(C::abi_decode_returns(&data, true)?)
}

/// Uniswap-V2 style router pricing.
pub async fn quote_constant_product(
    reader: &dyn ContractReader,
    router: Address,
    intent: &TradeIntent,
    fees: &FeeSchedule,
) -> Result<Quote> {
    let hops = intent.hops();
    match intent.direction {
        Direction::ExactIn => {
            let amount_from = intent.amount;
            let fee = fees.protocol_fee(amount_from)?;
            let amount_in = fees.after_fee(amount_from)?;
            let amounts = read(
                reader,
                router,
                &IRouter::getAmountsOutCall { amountIn: amount_in, path: hops.clone() },
            )
            .await?
            .amounts;
            let raw_out = *amounts
                .last()
                .ok_or_else(|| QuoterError::Upstream("getAmountsOut returned no amounts".into()))?;
            debug!(%amount_in, %raw_out, "router forward quote");

            Ok(Quote {
                aggregator: intent.aggregator,
                direction: intent.direction,
                amount_from,
                amount_to: fees.min_output(raw_out)?,
                path: path::encode_packed(&hops),
                fee_estimate: fee,
                gas_estimate: None,
            })
        }
        Direction::ExactOut => {
            let amount_to = intent.amount;
            let reversed: Vec<Address> = hops.iter().rev().copied().collect();
            let amounts = read(
                reader,
                router,
                &IRouter::getAmountsInCall { amountOut: amount_to, path: reversed.clone() },
            )
            .await?
            .amounts;
            // one amount per path token; the input token sits last in the reversed path
            if amounts.len() != reversed.len() {
                return Err(QuoterError::Upstream(format!(
                    "getAmountsIn returned {} amounts for {} tokens",
                    amounts.len(),
                    reversed.len()
                )));
            }
            let raw_in = amounts[amounts.len() - 1];
            debug!(%amount_to, %raw_in, "router reverse quote");

            let amount_from = fees.max_input(raw_in)?;
            Ok(Quote {
                aggregator: intent.aggregator,
                direction: intent.direction,
                amount_from,
                amount_to,
                path: path::encode_packed(&reversed),
                fee_estimate: fees.protocol_fee(amount_from)?,
                gas_estimate: None,
            })
        }
    }
}

/// Fee-tiered quoter pricing.
pub async fn quote_concentrated_liquidity(
    reader: &dyn ContractReader,
    quoter: Address,
    default_pool_fee: Option<u32>,
    intent: &TradeIntent,
    fees: &FeeSchedule,
) -> Result<Quote> {
    let hops = intent.hops();
    let tiers: Vec<u32> = if intent.pool_fees.is_empty() {
        default_pool_fee.into_iter().collect()
    } else {
        intent.pool_fees.clone()
    };

    match intent.direction {
        Direction::ExactIn => {
            let encoded = path::encode_fee_tiered(&hops, &tiers)?;
            let amount_from = intent.amount;
            let fee = fees.protocol_fee(amount_from)?;
            let amount_in = fees.after_fee(amount_from)?;
            let ret = read(
                reader,
                quoter,
                &IQuoter::quoteExactInputCall { path: encoded.clone(), amountIn: amount_in },
            )
            .await?;
            debug!(%amount_in, amount_out = %ret.amountOut, "quoter forward quote");

            Ok(Quote {
                aggregator: intent.aggregator,
                direction: intent.direction,
                amount_from,
                amount_to: fees.min_output(ret.amountOut)?,
                path: encoded,
                fee_estimate: fee,
                gas_estimate: u64::try_from(ret.gasEstimate).ok(),
            })
        }
        Direction::ExactOut => {
            let (rev_hops, rev_tiers) = path::reversed(&hops, &tiers);
            let encoded = path::encode_fee_tiered(&rev_hops, &rev_tiers)?;
            let amount_to = intent.amount;
            let ret = read(
                reader,
                quoter,
                &IQuoter::quoteExactOutputCall { path: encoded.clone(), amountOut: amount_to },
            )
            .await?;
            debug!(%amount_to, amount_in = %ret.amountIn, "quoter reverse quote");

            Ok(Quote {
                aggregator: intent.aggregator,
                direction: intent.direction,
                amount_from: fees.max_input(ret.amountIn)?,
                amount_to,
                path: encoded,
                fee_estimate: fees.protocol_fee(ret.amountIn)?,
                gas_estimate: u64::try_from(ret.gasEstimate).ok(),
            })
        }
    }
}

/// Oracle-rate pricing at a fixed probe amount.
///
/// The rate carries no price impact, so the result only describes trades of roughly
/// `probe_amount`. The caller's own amount is not used.
pub async fn quote_from_external_rate(
    reader: &dyn ContractReader,
    oracle: Address,
    connector: Option<Address>,
    probe_amount: U256,
    intent: &TradeIntent,
    fees: &FeeSchedule,
) -> Result<Quote> {
    if intent.token_c.is_some() {
        return Err(QuoterError::InvalidIntent(format!(
            "{} is priced by oracle and only supports a single hop",
            intent.aggregator
        )));
    }
    if intent.amount != probe_amount {
        warn!(
            requested = %intent.amount,
            probe = %probe_amount,
            aggregator = %intent.aggregator,
            "oracle pricing ignores the requested amount and quotes the probe amount"
        );
    }

    let rate = read(
        reader,
        oracle,
        &IRateOracle::getRateCall {
            srcToken: intent.token_a,
            dstToken: intent.token_b,
            connector: connector.unwrap_or(NO_CONNECTOR),
        },
    )
    .await?
    .rate;
    debug!(%rate, "oracle rate");

    let scale = U256::from(RATE_SCALE);
    let (amount_from, amount_to) = match intent.direction {
        Direction::ExactIn => {
            let gross = checked_mul(probe_amount, rate, "probe * rate")? / scale;
            (probe_amount, fees.min_output(gross)?)
        }
        Direction::ExactOut => {
            let gross = checked_div(checked_mul(probe_amount, scale, "probe * 1e18")?, rate, "probe / rate")?;
            (fees.max_input(gross)?, probe_amount)
        }
    };

    Ok(Quote {
        aggregator: intent.aggregator,
        direction: intent.direction,
        amount_from,
        amount_to,
        path: path::encode_abi_pair(intent.token_a, intent.token_b),
        fee_estimate: fees.protocol_fee(amount_from)?,
        gas_estimate: None,
    })
}
