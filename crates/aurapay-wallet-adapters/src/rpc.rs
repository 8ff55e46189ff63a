use std::time::Duration;

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportErrorKind};
use async_trait::async_trait;

use aurapay_wallet_core::{ChainReader, NetworkConfig, PortError, TxReceipt};

use crate::WalletAdapterConfig;

/// Reads chain state from each network's public JSON-RPC endpoint through an
/// alloy HTTP provider.
#[derive(Debug, Clone)]
pub struct JsonRpcReader {
    client: reqwest::Client,
    endpoint_override: Option<String>,
}

impl JsonRpcReader {
    pub fn with_config(config: &WalletAdapterConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.rpc_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            endpoint_override: config.rpc_endpoint_override.clone(),
        })
    }

    fn endpoint<'a>(&'a self, network: &'a NetworkConfig) -> &'a str {
        self.endpoint_override.as_deref().unwrap_or(network.rpc_url)
    }

    fn provider(&self, network: &NetworkConfig) -> Result<impl Provider, PortError> {
        let endpoint = self.endpoint(network);
        let url = endpoint
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid rpc url {endpoint}: {e}")))?;
        tracing::debug!(chain_id = network.chain_id, endpoint, "opening rpc provider");
        let transport = Http::with_client(self.client.clone(), url);
        Ok(ProviderBuilder::new().on_client(RpcClient::new(transport, false)))
    }
}

#[async_trait]
impl ChainReader for JsonRpcReader {
    async fn balance(&self, network: &NetworkConfig, address: Address) -> Result<U256, PortError> {
        self.provider(network)?
            .get_balance(address)
            .await
            .map_err(port_error)
    }

    async fn call(
        &self,
        network: &NetworkConfig,
        to: Address,
        data: &Bytes,
    ) -> Result<Bytes, PortError> {
        let tx = TransactionRequest::default().to(to).input(data.clone().into());
        self.provider(network)?
            .call(&tx)
            .await
            .map_err(port_error)
    }

    async fn transaction_receipt(
        &self,
        network: &NetworkConfig,
        tx_hash: B256,
    ) -> Result<Option<TxReceipt>, PortError> {
        let receipt = self
            .provider(network)?
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(port_error)?;
        let Some(receipt) = receipt else {
            return Ok(None);
        };
        let block_number = receipt
            .block_number()
            .ok_or_else(|| PortError::Validation(format!("receipt for {tx_hash} has no block")))?;
        Ok(Some(TxReceipt {
            status: receipt.status(),
            block_number,
            gas_used: receipt.gas_used(),
        }))
    }

    async fn block_number(&self, network: &NetworkConfig) -> Result<u64, PortError> {
        self.provider(network)?
            .get_block_number()
            .await
            .map_err(port_error)
    }
}

/// Node error objects keep their JSON-RPC code; everything else is transport.
fn port_error(err: RpcError<TransportErrorKind>) -> PortError {
    match err {
        RpcError::ErrorResp(payload) => PortError::Rpc {
            code: payload.code,
            message: payload.message.to_string(),
        },
        e @ RpcError::DeserError { .. } => {
            PortError::Validation(format!("malformed rpc response: {e}"))
        }
        other => PortError::Transport(other.to_string()),
    }
}
