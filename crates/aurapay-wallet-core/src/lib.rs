pub mod abi;
pub mod address;
pub mod balance;
pub mod chain;
pub mod confirm;
pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod submit;
pub mod units;
pub mod wallet;

pub use address::{is_valid_address, parse_address};
pub use balance::{fetch_balance, session_balance};
pub use chain::{ensure_chain, ChainError};
pub use confirm::check_status;
pub use domain::{
    AddChainParams, Asset, Balance, ConfirmationState, ConfirmationStatus, NativeCurrency,
    Network, NetworkConfig, ProviderNetworkInfo, SyntheticReason, TransferRequest, TransferResult,
    TxPayload, TxReceipt,
};
pub use error::{classify_provider_error, TransferError};
pub use ports::{ChainReader, PortError, SessionPort, WalletProvider};
pub use registry::{by_chain_id, network_info, resolve};
pub use submit::{apply_gas_margin, submit, GAS_MARGIN_PERCENT};
pub use units::{format_amount, format_amount_grouped};
pub use wallet::WalletCore;
