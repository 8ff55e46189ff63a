use alloy::primitives::U256;

use crate::abi;
use crate::address::parse_address;
use crate::chain::ensure_chain;
use crate::domain::{Asset, TransferRequest, TransferResult, TxPayload};
use crate::error::{classify_provider_error, TransferError};
use crate::ports::WalletProvider;
use crate::units::to_smallest_unit;

/// Headroom added on top of the wallet's gas estimate, in percent.
pub const GAS_MARGIN_PERCENT: u64 = 20;

/// `ceil(estimate * 1.2)`, saturating at `u64::MAX`.
pub fn apply_gas_margin(estimate: u64) -> u64 {
    let scaled = u128::from(estimate) * u128::from(100 + GAS_MARGIN_PERCENT);
    let with_margin = scaled.div_ceil(100);
    u64::try_from(with_margin).unwrap_or(u64::MAX)
}

/// Submits a transfer through the connected wallet. Every failure comes back
/// as a failed [`TransferResult`]; nothing is retried here, and a caller that
/// resubmits after a timeout may broadcast a second transfer.
pub async fn submit<P>(provider: Option<&P>, request: &TransferRequest) -> TransferResult
where
    P: WalletProvider + ?Sized,
{
    let result = match provider {
        Some(p) if p.is_available() => try_submit(p, request).await,
        _ => Err(TransferError::ProviderUnavailable),
    };

    match result {
        Ok(tx_hash) => {
            tracing::info!(
                chain_id = request.network.chain_id,
                asset = ?request.asset,
                %tx_hash,
                "transfer submitted"
            );
            TransferResult::submitted(tx_hash, &request.network)
        }
        Err(error) => {
            tracing::warn!(
                chain_id = request.network.chain_id,
                asset = ?request.asset,
                %error,
                "transfer failed"
            );
            TransferResult::failed(error)
        }
    }
}

async fn try_submit<P>(
    provider: &P,
    request: &TransferRequest,
) -> Result<alloy::primitives::B256, TransferError>
where
    P: WalletProvider + ?Sized,
{
    let from = parse_address(&request.from).ok_or_else(|| {
        TransferError::InvalidRequest(format!("invalid sender address: {}", request.from))
    })?;
    let to = parse_address(&request.to).ok_or_else(|| {
        TransferError::InvalidRequest(format!("invalid recipient address: {}", request.to))
    })?;

    // Chain first: decimals and the token contract are only meaningful on the
    // target chain.
    ensure_chain(provider, &request.network)
        .await
        .map_err(|e| TransferError::WrongNetwork(e.to_string()))?;

    let mut payload = match request.asset {
        Asset::Native => {
            let value = to_smallest_unit(&request.amount, request.network.native_currency.decimals)
                .map_err(TransferError::InvalidRequest)?;
            TxPayload {
                from,
                to,
                value,
                data: None,
                gas: None,
            }
        }
        Asset::Token => {
            let contract = request.network.token_contract.ok_or_else(|| {
                TransferError::InvalidRequest(format!(
                    "no token contract configured for chain {}",
                    request.network.chain_id
                ))
            })?;
            let raw = provider
                .call(contract, &abi::decimals_calldata())
                .await
                .map_err(|e| classify_provider_error(&e))?;
            let decimals =
                abi::decode_decimals(&raw).map_err(|e| TransferError::Unknown(e.message()))?;
            let amount = to_smallest_unit(&request.amount, decimals)
                .map_err(TransferError::InvalidRequest)?;
            TxPayload {
                from,
                to: contract,
                value: U256::ZERO,
                data: Some(abi::transfer_calldata(to, amount)),
                gas: None,
            }
        }
    };

    let estimate = provider
        .estimate_gas(&payload)
        .await
        .map_err(|e| classify_provider_error(&e))?;
    payload.gas = Some(apply_gas_margin(estimate));
    tracing::debug!(estimate, gas = ?payload.gas, "gas estimated");

    provider
        .send_transaction(&payload)
        .await
        .map_err(|e| classify_provider_error(&e))
}
