use alloy::primitives::B256;

use crate::domain::{ConfirmationState, ConfirmationStatus, NetworkConfig};
use crate::ports::{ChainReader, PortError};

/// One status check for `transaction_id`. Callers poll by calling again; read
/// failures come back as [`ConfirmationState::Unknown`], never as an error.
pub async fn check_status<R>(
    reader: &R,
    transaction_id: &str,
    network: &NetworkConfig,
) -> ConfirmationStatus
where
    R: ChainReader + ?Sized,
{
    let explorer_url = network.tx_explorer_url(transaction_id);
    match read_status(reader, transaction_id, network).await {
        Ok(Some(mut status)) => {
            status.explorer_url = explorer_url;
            status
        }
        Ok(None) => ConfirmationStatus {
            state: ConfirmationState::Pending,
            confirmations: Some(0),
            block_number: None,
            gas_used: None,
            explorer_url,
            error: None,
        },
        Err(e) => {
            tracing::warn!(
                chain_id = network.chain_id,
                transaction_id,
                error = %e,
                "transaction status check failed"
            );
            ConfirmationStatus {
                state: ConfirmationState::Unknown,
                confirmations: None,
                block_number: None,
                gas_used: None,
                explorer_url,
                error: Some(e.message()),
            }
        }
    }
}

async fn read_status<R>(
    reader: &R,
    transaction_id: &str,
    network: &NetworkConfig,
) -> Result<Option<ConfirmationStatus>, PortError>
where
    R: ChainReader + ?Sized,
{
    let tx_hash: B256 = transaction_id
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid transaction id: {e}")))?;

    let Some(receipt) = reader.transaction_receipt(network, tx_hash).await? else {
        return Ok(None);
    };
    let head = reader.block_number(network).await?;

    let state = if receipt.status {
        ConfirmationState::Confirmed
    } else {
        ConfirmationState::Failed
    };
    Ok(Some(ConfirmationStatus {
        state,
        confirmations: Some(head.saturating_sub(receipt.block_number)),
        block_number: Some(receipt.block_number),
        gas_used: Some(receipt.gas_used),
        explorer_url: String::new(),
        error: None,
    }))
}
