use crate::domain::{
    Asset, Balance, ConfirmationStatus, Network, NetworkConfig, ProviderNetworkInfo,
    TransferRequest, TransferResult,
};
use crate::ports::{ChainReader, SessionPort, WalletProvider};
use crate::{address, balance, confirm, registry, submit};

/// Entry point for the presentation layer. Holds the injected capabilities;
/// `provider` is `None` when no wallet runtime is present.
pub struct WalletCore<P, R>
where
    P: WalletProvider,
    R: ChainReader,
{
    pub provider: Option<P>,
    pub reader: R,
}

impl<P, R> WalletCore<P, R>
where
    P: WalletProvider,
    R: ChainReader,
{
    pub fn new(provider: Option<P>, reader: R) -> Self {
        Self { provider, reader }
    }

    pub fn network_info(&self, network: Network) -> &'static NetworkConfig {
        registry::resolve(network)
    }

    pub fn is_valid_address(&self, candidate: &str) -> bool {
        address::is_valid_address(candidate)
    }

    pub async fn fetch_balance(&self, address: &str, network: Network, asset: Asset) -> Balance {
        balance::fetch_balance(
            self.provider.as_ref(),
            &self.reader,
            address,
            registry::resolve(network),
            asset,
        )
        .await
    }

    pub async fn session_balance<S>(&self, session: &S, network: Network, asset: Asset) -> Balance
    where
        S: SessionPort + ?Sized,
    {
        balance::session_balance(
            session,
            self.provider.as_ref(),
            &self.reader,
            registry::resolve(network),
            asset,
        )
        .await
    }

    pub async fn send_transaction(&self, request: &TransferRequest) -> TransferResult {
        submit::submit(self.provider.as_ref(), request).await
    }

    pub async fn check_status(&self, transaction_id: &str, network: Network) -> ConfirmationStatus {
        confirm::check_status(&self.reader, transaction_id, registry::resolve(network)).await
    }

    /// Which chain the wallet is currently on, if it can be asked.
    pub async fn detect_network(&self) -> Option<ProviderNetworkInfo> {
        let provider = self.provider.as_ref().filter(|p| p.is_available())?;
        match provider.chain_id().await {
            Ok(chain_id) => Some(describe_chain(chain_id)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read provider network");
                None
            }
        }
    }
}

pub fn describe_chain(chain_id: u64) -> ProviderNetworkInfo {
    match registry::by_chain_id(chain_id) {
        Some(cfg) => ProviderNetworkInfo {
            chain_id,
            network: Some(cfg.network),
            is_avalanche: true,
            is_testnet: cfg.network.is_testnet(),
            name: cfg.display_name,
        },
        None => ProviderNetworkInfo {
            chain_id,
            network: None,
            is_avalanche: false,
            is_testnet: false,
            name: "Unknown Network",
        },
    }
}
