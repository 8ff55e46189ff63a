use alloy::primitives::Address;

use aurapay_wallet_core::SessionPort;

use crate::WalletAdapterConfig;

/// Session fixed at construction time, for hosts that authenticate outside
/// this process (CLI, tests). Authenticated iff an address is known.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionAdapter {
    primary_address: Option<Address>,
}

impl StaticSessionAdapter {
    pub fn new(primary_address: Option<Address>) -> Self {
        Self { primary_address }
    }

    pub fn with_config(config: &WalletAdapterConfig) -> Self {
        Self::new(config.session_address)
    }
}

impl SessionPort for StaticSessionAdapter {
    fn is_ready(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        self.primary_address.is_some()
    }

    fn primary_address(&self) -> Option<Address> {
        self.primary_address
    }
}
