use thiserror::Error;

use crate::domain::NetworkConfig;
use crate::error::UNRECOGNIZED_CHAIN_CODE;
use crate::ports::{PortError, WalletProvider};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("could not read the wallet's active chain: {0}")]
    ChainIdUnavailable(PortError),
    #[error("please switch to {chain_name} ({chain_id}): {source}")]
    SwitchFailed {
        chain_name: &'static str,
        chain_id: String,
        source: PortError,
    },
    #[error("could not add {chain_name} to the wallet: {source}")]
    AddFailed {
        chain_name: &'static str,
        source: PortError,
    },
    #[error("wallet still on chain {actual} after switching to {expected}")]
    StillMismatched { expected: u64, actual: u64 },
}

/// Makes sure the wallet is on `network` before anything is signed. Switches,
/// or registers the chain when the wallet does not know it, then re-reads the
/// active chain so a write can never go out on the wrong network.
pub async fn ensure_chain<P>(provider: &P, network: &NetworkConfig) -> Result<(), ChainError>
where
    P: WalletProvider + ?Sized,
{
    let active = provider
        .chain_id()
        .await
        .map_err(ChainError::ChainIdUnavailable)?;
    if active == network.chain_id {
        return Ok(());
    }

    let expected_hex = network.hex_chain_id();
    tracing::info!(
        active,
        expected = network.chain_id,
        "wallet on a different chain, requesting switch"
    );

    match provider.switch_chain(&expected_hex).await {
        Ok(()) => {}
        Err(e) if e.code() == Some(UNRECOGNIZED_CHAIN_CODE) => {
            tracing::info!(chain_id = %expected_hex, "chain unknown to wallet, registering it");
            provider
                .add_chain(&network.add_chain_params())
                .await
                .map_err(|source| ChainError::AddFailed {
                    chain_name: network.chain_name,
                    source,
                })?;
        }
        Err(source) => {
            return Err(ChainError::SwitchFailed {
                chain_name: network.chain_name,
                chain_id: expected_hex,
                source,
            })
        }
    }

    let now = provider
        .chain_id()
        .await
        .map_err(ChainError::ChainIdUnavailable)?;
    if now != network.chain_id {
        return Err(ChainError::StillMismatched {
            expected: network.chain_id,
            actual: now,
        });
    }
    Ok(())
}
