//! Crate-level tests driven by an in-memory contract reader.


use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy_primitives::{address, Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;

use crate::engine::fees::FeeSchedule;
use crate::engine::QuoteEngine;
use crate::node_client::ContractReader;
use crate::types::{QuoterError, Result};
use crate::venues::VenueTable;

pub const WHBAR: Address = address!("000000000000000000000000000000000000e6a2");
pub const SAUCE: Address = address!("000000000000000000000000000000000000ef52");
pub const USDC: Address = address!("00000000000000000000000000000000000274a3");
pub const ROUTER: Address = address!("000000000000000000000000000000000007029a");
pub const QUOTER: Address = address!("73CC0372e9a1e95BC61160EccAc0F0eA58Aec503");
pub const ORACLE: Address = address!("5fae1453f35450E7eBfD1F278DA9cb5ca3DC270b");

type Responder = Box<dyn Fn(&[u8]) -> Result<Bytes> + Send + Sync>;

/// Answers calls by selector and records every call it sees.
#[derive(Default)]
pub struct MockReader {
    responders: HashMap<[u8; 4], Responder>,
    calls: Mutex<Vec<(Address, Bytes)>>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `C` by decoding the call and computing ABI return data from it.
    pub fn on<C, F>(mut self, f: F) -> Self
    where
        C: SolCall + 'static,
        F: Fn(C) -> Vec<u8> + Send + Sync + 'static,
    {
        self.responders.insert(
            C::SELECTOR,
            Box::new(move |data| Ok(f(C::abi_decode(data, true)?).into())),
        );
        self
    }

    pub fn failing<C: SolCall>(mut self, msg: &'static str) -> Self {
        self.responders
            .insert(C::SELECTOR, Box::new(move |_| Err(QuoterError::Upstream(msg.to_string()))));
        self
    }

    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractReader for MockReader {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.calls.lock().unwrap().push((to, data.clone()));
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| QuoterError::Upstream("calldata shorter than a selector".into()))?;
        match self.responders.get(&selector) {
            Some(respond) => respond(&data),
            None => Err(QuoterError::Upstream(format!("execution reverted (selector {})", hex::encode(selector)))),
        }
    }
}

pub fn engine_with(mock: &Arc<MockReader>, venues: VenueTable) -> QuoteEngine {
    let reader: Arc<dyn ContractReader> = mock.clone();
    QuoteEngine::new(reader, venues, FeeSchedule::new(5, 3).unwrap())
}
