use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransferError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }

    pub fn is_testnet(self) -> bool {
        matches!(self, Self::Testnet)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static description of one chain the wallet can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub network: Network,
    pub chain_id: u64,
    /// Name sent to the wallet in `wallet_addEthereumChain`.
    pub chain_name: &'static str,
    /// Name shown to users when describing the wallet's active chain.
    pub display_name: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub native_currency: NativeCurrency,
    pub token_contract: Option<Address>,
}

impl NetworkConfig {
    /// Chain id in the `0x`-prefixed form wallet RPC methods expect.
    pub fn hex_chain_id(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn tx_explorer_url(&self, transaction_id: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, transaction_id)
    }

    pub fn add_chain_params(&self) -> AddChainParams {
        AddChainParams {
            chain_id: self.hex_chain_id(),
            chain_name: self.chain_name.to_owned(),
            native_currency: self.native_currency,
            rpc_urls: vec![self.rpc_url.to_owned()],
            block_explorer_urls: vec![self.explorer_url.to_owned()],
        }
    }
}

/// Parameters for `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Native,
    Token,
}

impl Asset {
    /// Decimal places shown to the user.
    pub fn display_precision(self) -> usize {
        match self {
            Self::Native => 4,
            Self::Token => 2,
        }
    }

    pub(crate) fn synthetic_ceiling(self) -> f64 {
        match self {
            Self::Native => 10.0,
            Self::Token => 1000.0,
        }
    }

    pub fn zero_amount(self) -> String {
        format!("{:.*}", self.display_precision(), 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub network: NetworkConfig,
    pub asset: Asset,
}

impl TransferRequest {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<String>,
        network: Network,
        asset: Asset,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount: amount.into(),
            network: crate::registry::resolve(network).clone(),
            asset,
        }
    }
}

/// Transaction payload handed to the wallet provider for estimation and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPayload {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Option<Bytes>,
    pub gas: Option<u64>,
}

impl TxPayload {
    /// JSON-RPC transaction object with hex quantities.
    pub fn to_rpc_value(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("from".to_owned(), Value::String(self.from.to_string()));
        obj.insert("to".to_owned(), Value::String(self.to.to_string()));
        obj.insert("value".to_owned(), Value::String(format!("{:#x}", self.value)));
        if let Some(data) = &self.data {
            obj.insert("data".to_owned(), Value::String(data.to_string()));
        }
        if let Some(gas) = self.gas {
            obj.insert("gas".to_owned(), Value::String(format!("{gas:#x}")));
        }
        Value::Object(obj)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TransferError>,
}

impl TransferResult {
    pub fn submitted(transaction_id: B256, network: &NetworkConfig) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            explorer_url: Some(network.tx_explorer_url(&transaction_id.to_string())),
            error: None,
        }
    }

    pub fn failed(error: TransferError) -> Self {
        Self {
            success: false,
            transaction_id: None,
            explorer_url: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationState {
    Pending,
    Confirmed,
    Failed,
    Unknown,
}

impl ConfirmationState {
    /// Whether a caller polling this transaction can stop.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

/// Point-in-time view of a submitted transaction. `confirmations` is derived
/// from the chain head at query time and goes stale as soon as it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStatus {
    pub state: ConfirmationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    pub explorer_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub status: bool,
    pub block_number: u64,
    pub gas_used: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum SyntheticReason {
    ProviderUnavailable,
    InvalidAddress,
    RpcError(String),
}

impl fmt::Display for SyntheticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable => f.write_str("wallet provider unavailable"),
            Self::InvalidAddress => f.write_str("malformed address"),
            Self::RpcError(message) => write!(f, "rpc error: {message}"),
        }
    }
}

/// A display balance, tagged with whether it came from the chain or was
/// synthesized because the chain could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum Balance {
    Real {
        amount: String,
    },
    Synthetic {
        amount: String,
        reason: SyntheticReason,
    },
}

impl Balance {
    pub fn amount(&self) -> &str {
        match self {
            Self::Real { amount } | Self::Synthetic { amount, .. } => amount,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.amount())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderNetworkInfo {
    pub chain_id: u64,
    pub network: Option<Network>,
    pub is_avalanche: bool,
    pub is_testnet: bool,
    pub name: &'static str,
}
