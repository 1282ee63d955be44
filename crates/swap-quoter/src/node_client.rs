//! Read-only contract calls against a Hedera mirror node or a JSON-RPC relay.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::types::{QuoterError, Result};

/// Executes a simulated (non-mutating) contract call and returns the raw ABI return data.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}

#[async_trait]
impl<T: ContractReader + ?Sized> ContractReader for std::sync::Arc<T> {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        (**self).call(to, data).await
    }
}

pub const TESTNET_MIRROR_NODE: &str = "https://testnet.mirrornode.hedera.com";
pub const MAINNET_MIRROR_NODE: &str = "https://mainnet-public.mirrornode.hedera.com";

#[derive(Debug, Serialize)]
pub struct ContractCallRequest {
    pub block: String,
    pub data: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct ContractCallResponse {
    pub result: String,
}

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| QuoterError::Config(format!("unable to build HTTP client: {}", e)))
}

fn decode_hex_result(result: &str) -> Result<Bytes> {
    Bytes::from_str(result).map_err(|e| QuoterError::Upstream(format!("result is not hex ({}): {}", e, result)))
}

/// `POST /api/v1/contracts/call` on a mirror node.
#[derive(Clone)]
pub struct MirrorNodeReader {
    client: Client,
    base_url: String,
}

impl MirrorNodeReader {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/contracts/call", self.base_url)
    }

    pub fn request_body(to: Address, data: &Bytes) -> ContractCallRequest {
        ContractCallRequest {
            block: "latest".to_string(),
            data: format!("0x{}", hex::encode(data)),
            to: format!("{:#x}", to),
        }
    }
}

#[async_trait]
impl ContractReader for MirrorNodeReader {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let url = self.endpoint();
        debug!(%to, selector = %hex::encode(data.get(..4).unwrap_or_default()), "mirror node contract call");
        let resp = self
            .client
            .post(&url)
            .json(&Self::request_body(to, &data))
            .send()
            .await
            .map_err(|e| QuoterError::Upstream(format!("{} unreachable: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QuoterError::Upstream(format!("mirror node returned {}: {}", status, body)));
        }
        let body: ContractCallResponse = resp
            .json()
            .await
            .map_err(|e| QuoterError::Upstream(format!("malformed mirror node response: {}", e)))?;
        decode_hex_result(&body.result)
    }
}

/// `eth_call` against a JSON-RPC relay.
#[derive(Clone)]
pub struct JsonRpcReader {
    client: Client,
    rpc_url: String,
}

impl JsonRpcReader {
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            rpc_url: rpc_url.into(),
        })
    }

    pub fn payload(to: Address, data: &Bytes) -> Value {
        json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                { "to": format!("{:#x}", to), "data": format!("0x{}", hex::encode(data)) },
                "latest"
            ],
            "id": 1
        })
    }

    fn parse_response(json_resp: &Value) -> Result<Bytes> {
        if let Some(err) = json_resp.get("error") {
            return Err(QuoterError::Upstream(format!("eth_call rejected: {}", err)));
        }
        let result = json_resp
            .get("result")
            .and_then(|v| v.as_str())
            .ok_or_else(|| QuoterError::Upstream(format!("eth_call response without result: {}", json_resp)))?;
        decode_hex_result(result)
    }
}

#[async_trait]
impl ContractReader for JsonRpcReader {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        debug!(%to, rpc = %self.rpc_url, "eth_call");
        let resp = self
            .client
            .post(&self.rpc_url)
            .json(&Self::payload(to, &data))
            .send()
            .await
            .map_err(|e| QuoterError::Upstream(format!("{} unreachable: {}", self.rpc_url, e)))?;
        let json_resp: Value = resp
            .json()
            .await
            .map_err(|e| QuoterError::Upstream(format!("malformed eth_call response: {}", e)))?;
        Self::parse_response(&json_resp)
    }
}
