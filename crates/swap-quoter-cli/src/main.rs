use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use swap_quoter::config::AppConfig;
use swap_quoter::swap::{unix_now, SwapOptions, SwapRequest};
use swap_quoter::utils::address::{address_to_entity_id, parse_token};
use swap_quoter::{Address, AggregatorId, Direction, QuoteEngine, TradeIntent, U256};
use tracing::warn;

// Entity id when the address is long-zero, hex otherwise
fn token_label(token: &Address) -> String {
    address_to_entity_id(token).unwrap_or_else(|| token.to_string())
}

// Raw smallest-unit amount to a human-readable string
fn format_token_amount(raw: U256, decimals: u8) -> String {
    let scaled = u128::try_from(raw)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .and_then(|v| Decimal::try_from_i128_with_scale(v, decimals as u32).ok());
    match scaled {
        Some(d) => d.normalize().to_string(),
        None => raw.to_string(),
    }
}

async fn decimals_or_raw(engine: &QuoteEngine, token: Address) -> u8 {
    match engine.token_decimals(token).await {
        Ok(d) => d,
        Err(e) => {
            warn!(token = %token, "decimals lookup failed, printing raw units: {}", e);
            0
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let (config, cli) = AppConfig::load_with_cli()?;
    let engine = QuoteEngine::from_config(&config)?;

    let aggregator = AggregatorId::from_str(&cli.aggregator)?;
    let token_a = parse_token(&cli.token_a)?;
    let token_b = parse_token(&cli.token_b)?;
    let direction = if cli.exact_out { Direction::ExactOut } else { Direction::ExactIn };
    let amount = match cli.amount.as_deref() {
        Some(a) => U256::from_str_radix(a, 10).map_err(|e| anyhow!("invalid --amount {}: {}", a, e))?,
        None => engine.probe_amount(),
    };

    let mut intent = TradeIntent::new(aggregator, token_a, token_b, direction, amount).with_pool_fees(cli.pool_fee.clone());
    if let Some(c) = cli.token_c.as_deref() {
        intent = intent.via(parse_token(c)?);
    }
    let hops = intent.hops();
    let (first, last) = match (hops.first(), hops.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(anyhow!("trade needs at least two tokens")),
    };

    let quote = engine.quote(&intent).await?;
    let from_decimals = decimals_or_raw(&engine, first).await;
    let to_decimals = decimals_or_raw(&engine, last).await;

    println!("--- Quote ({}, {}) ---", quote.aggregator, quote.direction);
    println!(
        "Route: {}",
        hops.iter().map(token_label).collect::<Vec<_>>().join(" -> ")
    );
    println!("Amount From: {} ({} raw)", format_token_amount(quote.amount_from, from_decimals), quote.amount_from);
    println!("Amount To: {} ({} raw)", format_token_amount(quote.amount_to, to_decimals), quote.amount_to);
    println!("Protocol Fee: {} ({} raw)", format_token_amount(quote.fee_estimate, from_decimals), quote.fee_estimate);
    println!("Fee / Slippage (promille): {} / {}", engine.fees().fee_promille(), engine.fees().slippage_promille());
    if let Some(gas) = quote.gas_estimate {
        println!("Gas Estimate: {}", gas);
    }
    println!("Path: {}", quote.path_hex());
    if aggregator == AggregatorId::Pangolin && amount != engine.probe_amount() {
        println!("Note: rate-oracle quotes are priced at the probe amount {}", engine.probe_amount());
    }

    if cli.calldata {
        let options = SwapOptions {
            is_token_from_hbar: cli.from_hbar,
            fee_on_transfer: None,
            deadline_secs: config.deadline_secs,
        };
        let request = SwapRequest::from_quote(&quote, &options, unix_now())?;
        println!("\n--- Exchange.swap ---");
        println!("Deadline: {}", request.call.deadline);
        println!("Fee On Transfer: {}", request.call.feeOnTransfer);
        println!("Value (weibar): {}", request.value);
        println!("Calldata: {}", request.calldata());
    }

    Ok(())
}
