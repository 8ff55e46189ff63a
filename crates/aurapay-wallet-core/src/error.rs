use serde::Serialize;
use thiserror::Error;

use crate::ports::PortError;

/// EIP-1193 `userRejectedRequest`.
pub const USER_REJECTED_CODE: i64 = 4001;
/// Returned by `wallet_switchEthereumChain` when the wallet does not know the chain.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;
/// JSON-RPC internal error; wallets use it for reverted simulations and insufficient funds.
pub const INTERNAL_ERROR_CODE: i64 = -32603;

/// Why a transfer attempt did not produce a transaction. None of these are
/// retried inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum TransferError {
    #[error("wallet provider not available; connect a wallet and try again")]
    ProviderUnavailable,
    #[error("wallet is on the wrong network: {0}")]
    WrongNetwork(String),
    #[error("transaction rejected by user")]
    UserRejected,
    #[error("transaction failed - insufficient funds or network error: {0}")]
    ExecutionFailed(String),
    #[error("invalid transfer request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Unknown(String),
}

/// Maps a provider failure onto the transfer taxonomy.
pub fn classify_provider_error(err: &PortError) -> TransferError {
    match err {
        PortError::Rpc { code, .. } if *code == USER_REJECTED_CODE => TransferError::UserRejected,
        PortError::Rpc { code, message } if *code == INTERNAL_ERROR_CODE => {
            TransferError::ExecutionFailed(message.clone())
        }
        PortError::Policy(_) | PortError::NotImplemented(_) => TransferError::ProviderUnavailable,
        other => {
            let message = other.message();
            if message.to_ascii_lowercase().contains("insufficient funds") {
                TransferError::ExecutionFailed(message)
            } else if message.is_empty() {
                TransferError::Unknown("transaction failed".to_owned())
            } else {
                TransferError::Unknown(message)
            }
        }
    }
}
