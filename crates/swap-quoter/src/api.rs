use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::U256;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::QuoteEngine;
use crate::types::{Direction, Quote, QuoterError, TradeIntent};
use crate::utils::address::parse_token;
use crate::venues::AggregatorId;

/// Simple JSON schema returned from /health
#[derive(Serialize)]
struct HealthResp {
    status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub aggregator: String,
    pub token_a: String,
    pub token_b: String,
    pub token_c: Option<String>,
    pub pool_fee: Option<u32>,
    /// Decimal string; defaults to the engine's probe amount.
    pub amount: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteResp {
    pub aggregator: String,
    pub direction: Direction,
    pub amount_from: String,
    pub amount_to: String,
    pub path: String,
    pub fee_estimate: String,
    pub gas_estimate: Option<u64>,
}

impl From<Quote> for QuoteResp {
    fn from(q: Quote) -> Self {
        Self {
            aggregator: q.aggregator.to_string(),
            direction: q.direction,
            amount_from: q.amount_from.to_string(),
            amount_to: q.amount_to.to_string(),
            path: q.path_hex(),
            fee_estimate: q.fee_estimate.to_string(),
            gas_estimate: q.gas_estimate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResp {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResp>);

fn reject(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResp { error: error.to_string() }))
}

fn status_for(err: &QuoterError) -> StatusCode {
    match err {
        QuoterError::UnsupportedAggregator(_) | QuoterError::InvalidIntent(_) => StatusCode::BAD_REQUEST,
        QuoterError::Upstream(_) | QuoterError::Abi(_) => StatusCode::BAD_GATEWAY,
        QuoterError::Arithmetic(_) | QuoterError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl QuoteParams {
    pub fn into_intent(self, default_amount: U256) -> Result<TradeIntent, ApiError> {
        let aggregator = AggregatorId::from_str(&self.aggregator).map_err(|e| reject(StatusCode::BAD_REQUEST, e))?;
        let token_a = parse_token(&self.token_a).map_err(|e| reject(StatusCode::BAD_REQUEST, e))?;
        let token_b = parse_token(&self.token_b).map_err(|e| reject(StatusCode::BAD_REQUEST, e))?;
        let direction = match self.direction.as_deref() {
            Some(d) => Direction::from_str(d).map_err(|e| reject(StatusCode::BAD_REQUEST, e))?,
            None => Direction::ExactIn,
        };
        let amount = match self.amount.as_deref() {
            Some(a) => U256::from_str_radix(a, 10)
                .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("invalid amount {}: {}", a, e)))?,
            None => default_amount,
        };

        let mut intent = TradeIntent::new(aggregator, token_a, token_b, direction, amount);
        if let Some(c) = self.token_c.as_deref() {
            intent = intent.via(parse_token(c).map_err(|e| reject(StatusCode::BAD_REQUEST, e))?);
        }
        if let Some(fee) = self.pool_fee {
            intent = intent.with_pool_fee(fee);
        }
        Ok(intent)
    }
}

async fn health() -> Json<HealthResp> {
    Json(HealthResp { status: "ok" })
}

async fn quote(
    State(engine): State<Arc<QuoteEngine>>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResp>, ApiError> {
    let intent = params.into_intent(engine.probe_amount())?;
    match engine.quote(&intent).await {
        Ok(q) => Ok(Json(q.into())),
        Err(e) => {
            warn!(aggregator = %intent.aggregator, "quote failed: {}", e);
            Err(reject(status_for(&e), e))
        }
    }
}

pub fn router(engine: Arc<QuoteEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/quote", get(quote))
        .with_state(engine)
}

pub struct ApiServer {
    engine: Arc<QuoteEngine>,
}

impl ApiServer {
    pub fn new(engine: Arc<QuoteEngine>) -> Self {
        Self { engine }
    }

    pub async fn start(self, addr: &str) -> anyhow::Result<()> {
        let addr: std::net::SocketAddr = addr.parse()?;
        info!("Starting API server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router(self.engine)).await?;
        Ok(())
    }
}
