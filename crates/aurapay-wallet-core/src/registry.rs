use alloy::primitives::address;

use crate::domain::{NativeCurrency, Network, NetworkConfig};

pub const AVAX: NativeCurrency = NativeCurrency {
    name: "AVAX",
    symbol: "AVAX",
    decimals: 18,
};

pub static MAINNET: NetworkConfig = NetworkConfig {
    network: Network::Mainnet,
    chain_id: 43114,
    chain_name: "Avalanche Network",
    display_name: "Avalanche Mainnet",
    rpc_url: "https://api.avax.network/ext/bc/C/rpc",
    explorer_url: "https://snowtrace.io",
    native_currency: AVAX,
    token_contract: Some(address!("B97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E")),
};

pub static TESTNET: NetworkConfig = NetworkConfig {
    network: Network::Testnet,
    chain_id: 43113,
    chain_name: "Avalanche Fuji Testnet",
    display_name: "Avalanche Fuji Testnet",
    rpc_url: "https://api.avax-test.network/ext/bc/C/rpc",
    explorer_url: "https://testnet.snowtrace.io",
    native_currency: AVAX,
    token_contract: Some(address!("5425890298aed601595a70AB815c96711a31Bc65")),
};

static NETWORKS: [&NetworkConfig; 2] = [&MAINNET, &TESTNET];

pub const TOKEN_SYMBOL: &str = "USDC";

pub fn resolve(network: Network) -> &'static NetworkConfig {
    match network {
        Network::Mainnet => &MAINNET,
        Network::Testnet => &TESTNET,
    }
}

pub fn network_info(is_testnet: bool) -> &'static NetworkConfig {
    resolve(Network::from_testnet_flag(is_testnet))
}

pub fn by_chain_id(chain_id: u64) -> Option<&'static NetworkConfig> {
    NETWORKS.iter().copied().find(|cfg| cfg.chain_id == chain_id)
}

pub fn all() -> &'static [&'static NetworkConfig] {
    &NETWORKS
}
