use alloy::primitives::{Address, U256};
use rand::Rng;

use crate::abi;
use crate::address::parse_address;
use crate::domain::{Asset, Balance, NetworkConfig, SyntheticReason};
use crate::ports::{ChainReader, PortError, SessionPort, WalletProvider};
use crate::units::format_smallest_unit;

/// Reads a display balance for `address`. Never fails: when no wallet runtime
/// is present or the read errors, a synthetic placeholder tagged with the
/// reason is returned instead.
pub async fn fetch_balance<P, R>(
    provider: Option<&P>,
    reader: &R,
    address: &str,
    network: &NetworkConfig,
    asset: Asset,
) -> Balance
where
    P: WalletProvider + ?Sized,
    R: ChainReader + ?Sized,
{
    if !provider.is_some_and(|p| p.is_available()) {
        return synthetic_balance(asset, SyntheticReason::ProviderUnavailable);
    }
    let Some(owner) = parse_address(address) else {
        return synthetic_balance(asset, SyntheticReason::InvalidAddress);
    };

    match read_balance(reader, owner, network, asset).await {
        Ok(amount) => {
            tracing::debug!(
                chain_id = network.chain_id,
                ?asset,
                %owner,
                %amount,
                "balance read"
            );
            Balance::Real { amount }
        }
        Err(e) => synthetic_balance(asset, SyntheticReason::RpcError(e.message())),
    }
}

/// Balance of the session's primary address. A session that is not ready,
/// not authenticated or has no address shows zero.
pub async fn session_balance<S, P, R>(
    session: &S,
    provider: Option<&P>,
    reader: &R,
    network: &NetworkConfig,
    asset: Asset,
) -> Balance
where
    S: SessionPort + ?Sized,
    P: WalletProvider + ?Sized,
    R: ChainReader + ?Sized,
{
    if !session.is_ready() || !session.is_authenticated() {
        return Balance::Real {
            amount: asset.zero_amount(),
        };
    }
    match session.primary_address() {
        Some(address) => {
            fetch_balance(provider, reader, &address.to_string(), network, asset).await
        }
        None => Balance::Real {
            amount: asset.zero_amount(),
        },
    }
}

async fn read_balance<R>(
    reader: &R,
    owner: Address,
    network: &NetworkConfig,
    asset: Asset,
) -> Result<String, PortError>
where
    R: ChainReader + ?Sized,
{
    let precision = asset.display_precision();
    match asset {
        Asset::Native => {
            let wei = reader.balance(network, owner).await?;
            format_smallest_unit(wei, network.native_currency.decimals, precision)
                .map_err(PortError::Validation)
        }
        Asset::Token => {
            let contract = network.token_contract.ok_or_else(|| {
                PortError::NotFound(format!("no token contract on chain {}", network.chain_id))
            })?;
            let decimals_raw = reader
                .call(network, contract, &abi::decimals_calldata())
                .await?;
            let decimals = abi::decode_decimals(&decimals_raw)?;
            let balance_raw = reader
                .call(network, contract, &abi::balance_of_calldata(owner))
                .await?;
            let units: U256 = abi::decode_balance(&balance_raw)?;
            format_smallest_unit(units, decimals, precision).map_err(PortError::Validation)
        }
    }
}

pub(crate) fn synthetic_balance(asset: Asset, reason: SyntheticReason) -> Balance {
    let value = rand::thread_rng().gen_range(0.0..asset.synthetic_ceiling());
    let amount = format!("{value:.*}", asset.display_precision());
    tracing::warn!(?asset, %reason, %amount, "using synthetic balance");
    Balance::Synthetic { amount, reason }
}
