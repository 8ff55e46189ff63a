use alloy::primitives::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

impl RuntimeProfile {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Self::Development),
            "prod" | "production" => Some(Self::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WalletAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    /// JSON-RPC endpoint that relays requests to the user's wallet.
    pub eip1193_proxy_url: Option<String>,
    pub rpc_timeout_ms: u64,
    /// Sends read traffic here instead of the network's public RPC.
    pub rpc_endpoint_override: Option<String>,
    pub session_address: Option<Address>,
}

impl Default for WalletAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            rpc_timeout_ms: 15_000,
            rpc_endpoint_override: None,
            session_address: None,
        }
    }
}

impl WalletAdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let runtime_profile = match non_empty("AURAPAY_RUNTIME_PROFILE") {
            Some(raw) => RuntimeProfile::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown runtime profile, using development");
                defaults.runtime_profile
            }),
            None => defaults.runtime_profile,
        };
        let rpc_timeout_ms = match non_empty("AURAPAY_RPC_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid rpc timeout, using default");
                defaults.rpc_timeout_ms
            }),
            None => defaults.rpc_timeout_ms,
        };
        let session_address = non_empty("AURAPAY_SESSION_ADDRESS").and_then(|raw| {
            let parsed = aurapay_wallet_core::parse_address(raw.trim());
            if parsed.is_none() {
                tracing::warn!(value = %raw, "ignoring malformed session address");
            }
            parsed
        });

        Self {
            runtime_profile,
            eip1193_proxy_url: non_empty("AURAPAY_EIP1193_PROXY_URL"),
            rpc_timeout_ms,
            rpc_endpoint_override: non_empty("AURAPAY_RPC_ENDPOINT_OVERRIDE"),
            session_address,
        }
    }

    /// Production refuses to fall back to the deterministic in-memory wallet.
    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}
