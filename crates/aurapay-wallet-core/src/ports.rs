use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AddChainParams, NetworkConfig, TxPayload, TxReceipt};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl PortError {
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The underlying message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::NotImplemented(what) => (*what).to_owned(),
            Self::Transport(m)
            | Self::Validation(m)
            | Self::Policy(m)
            | Self::NotFound(m)
            | Self::Rpc { message: m, .. } => m.clone(),
        }
    }
}

/// Connected wallet (EIP-1193 style). Every write goes through here; the
/// wallet owns the keys and prompts the user.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `false` when the runtime has no usable wallet behind this handle.
    fn is_available(&self) -> bool {
        true
    }

    async fn accounts(&self) -> Result<Vec<Address>, PortError>;
    async fn chain_id(&self) -> Result<u64, PortError>;
    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), PortError>;
    async fn add_chain(&self, params: &AddChainParams) -> Result<(), PortError>;
    async fn estimate_gas(&self, tx: &TxPayload) -> Result<u64, PortError>;
    async fn send_transaction(&self, tx: &TxPayload) -> Result<B256, PortError>;
    async fn call(&self, to: Address, data: &Bytes) -> Result<Bytes, PortError>;
}

/// Read-only chain access, addressed per network so callers never share an
/// implicit "current" chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn balance(&self, network: &NetworkConfig, address: Address) -> Result<U256, PortError>;
    async fn call(
        &self,
        network: &NetworkConfig,
        to: Address,
        data: &Bytes,
    ) -> Result<Bytes, PortError>;
    async fn transaction_receipt(
        &self,
        network: &NetworkConfig,
        tx_hash: B256,
    ) -> Result<Option<TxReceipt>, PortError>;
    async fn block_number(&self, network: &NetworkConfig) -> Result<u64, PortError>;
}

/// Authenticated session owned by the presentation layer. Read-only here.
pub trait SessionPort {
    fn is_ready(&self) -> bool;
    fn is_authenticated(&self) -> bool;
    fn primary_address(&self) -> Option<Address>;
}
