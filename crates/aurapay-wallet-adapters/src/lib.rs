pub mod config;
pub mod eip1193;
pub mod jsonrpc;
pub mod rpc;
pub mod session;

pub use config::{RuntimeProfile, WalletAdapterConfig};
pub use eip1193::Eip1193Adapter;
pub use jsonrpc::JsonRpcTransport;
pub use rpc::JsonRpcReader;
pub use session::StaticSessionAdapter;
