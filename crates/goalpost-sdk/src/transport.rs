//! Transport abstractions for contract RPC interactions.

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;

use crate::{contracts::TxHash, error::Result};

/// Encoded contract call that can be dispatched via a transport.
#[derive(Clone, Debug)]
pub struct EvmCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
    pub gas_limit: Option<u64>,
}

impl EvmCall {
    pub fn new(to: Address, data: impl Into<Bytes>, value: U256) -> Self {
        Self {
            to,
            data: data.into(),
            value,
            gas_limit: None,
        }
    }

    pub fn with_gas_limit(mut self, gas: u64) -> Self {
        self.gas_limit = Some(gas);
        self
    }
}

/// Abstraction over submitting signed transactions.
///
/// Writes are two-phase: `send` returns a pending handle immediately and
/// `confirm` suspends the caller until the ledger includes the transaction
/// or reports a revert.
#[async_trait]
pub trait EvmTransport: Send + Sync {
    async fn send(&self, call: EvmCall) -> Result<TxHash>;
    async fn confirm(&self, tx: TxHash) -> Result<()>;
}

/// Abstraction over read-only `eth_call` style interactions.
#[async_trait]
pub trait EvmViewTransport: Send + Sync {
    async fn call_view(&self, call: EvmCall) -> Result<Bytes>;
}
