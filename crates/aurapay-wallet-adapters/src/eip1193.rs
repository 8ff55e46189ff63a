use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use async_trait::async_trait;
use serde_json::Value;

use aurapay_wallet_core::error::UNRECOGNIZED_CHAIN_CODE;
use aurapay_wallet_core::{AddChainParams, PortError, TxPayload, WalletProvider};

use crate::jsonrpc::{parse_bytes, parse_chain_id_str, parse_hash, parse_quantity, JsonRpcTransport};
use crate::WalletAdapterConfig;

const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
const DETERMINISTIC_TOKEN_DECIMALS: u8 = 6;
const DETERMINISTIC_TRANSFER_GAS: u64 = 21_000;
const DETERMINISTIC_CONTRACT_GAS: u64 = 65_000;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    transport: JsonRpcTransport,
}

#[derive(Debug, Clone)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: u64,
    known_chains: Vec<u64>,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            accounts: vec![Address::with_last_byte(1)],
            chain_id: 1,
            known_chains: vec![1],
        }
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(WalletAdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: WalletAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            match JsonRpcTransport::new(config.rpc_timeout_ms) {
                Ok(transport) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    transport,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        ))
                    } else {
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        match &mode {
            ProviderMode::Disabled(reason) => tracing::warn!(%reason, "wallet provider disabled"),
            ProviderMode::Deterministic => {
                tracing::info!("using deterministic in-memory wallet provider")
            }
            ProviderMode::Proxy(proxy) => {
                tracing::info!(url = %proxy.base_url, "using EIP-1193 proxy wallet provider")
            }
        }

        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let ProviderMode::Disabled(reason) = &self.mode {
            return Err(PortError::Policy(reason.clone()));
        }
        Ok(())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_inject_accounts_changed(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        self.lock_state()?.accounts = accounts;
        Ok(())
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        g.chain_id = chain_id;
        if !g.known_chains.contains(&chain_id) {
            g.known_chains.push(chain_id);
        }
        Ok(())
    }

    async fn proxy_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let proxy = match &self.mode {
            ProviderMode::Proxy(proxy) => proxy,
            ProviderMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            ProviderMode::Deterministic => {
                return Err(PortError::NotImplemented(
                    "eip1193 proxy runtime not enabled",
                ))
            }
        };
        proxy.transport.request(&proxy.base_url, method, params).await
    }

    fn is_proxy(&self) -> bool {
        matches!(self.mode, ProviderMode::Proxy(_))
    }

    fn deterministic_hash(&self, tx: &TxPayload) -> Result<B256, PortError> {
        let canonical = serde_json::to_vec(&tx.to_rpc_value())
            .map_err(|e| PortError::Validation(format!("tx payload serialization failed: {e}")))?;
        Ok(keccak256(canonical))
    }
}

#[async_trait]
impl WalletProvider for Eip1193Adapter {
    fn is_available(&self) -> bool {
        !matches!(self.mode, ProviderMode::Disabled(_))
    }

    async fn accounts(&self) -> Result<Vec<Address>, PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let result = self.proxy_call("eth_accounts", serde_json::json!([])).await?;
            let arr = result
                .as_array()
                .ok_or_else(|| PortError::Transport("eth_accounts: array expected".to_owned()))?;
            let mut accounts = Vec::with_capacity(arr.len());
            for item in arr {
                let raw = item.as_str().ok_or_else(|| {
                    PortError::Transport("eth_accounts: string expected".to_owned())
                })?;
                let parsed: Address = raw
                    .parse()
                    .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
                accounts.push(parsed);
            }
            self.lock_state()?.accounts = accounts.clone();
            return Ok(accounts);
        }

        Ok(self.lock_state()?.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let result = self.proxy_call("eth_chainId", serde_json::json!([])).await?;
            let chain_id = parse_quantity(&result, "chain id")?;
            self.lock_state()?.chain_id = chain_id;
            return Ok(chain_id);
        }

        Ok(self.lock_state()?.chain_id)
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            self.proxy_call(
                "wallet_switchEthereumChain",
                serde_json::json!([{ "chainId": chain_id_hex }]),
            )
            .await?;
            return Ok(());
        }

        let requested = parse_chain_id_str(chain_id_hex)?;
        let mut g = self.lock_state()?;
        if !g.known_chains.contains(&requested) {
            return Err(PortError::Rpc {
                code: UNRECOGNIZED_CHAIN_CODE,
                message: format!("Unrecognized chain ID \"{chain_id_hex}\""),
            });
        }
        g.chain_id = requested;
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let encoded = serde_json::to_value(params)
                .map_err(|e| PortError::Validation(format!("add chain params: {e}")))?;
            self.proxy_call("wallet_addEthereumChain", Value::Array(vec![encoded]))
                .await?;
            return Ok(());
        }

        let chain_id = parse_chain_id_str(&params.chain_id)?;
        let mut g = self.lock_state()?;
        if !g.known_chains.contains(&chain_id) {
            g.known_chains.push(chain_id);
        }
        g.chain_id = chain_id;
        Ok(())
    }

    async fn estimate_gas(&self, tx: &TxPayload) -> Result<u64, PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let result = self
                .proxy_call("eth_estimateGas", serde_json::json!([tx.to_rpc_value()]))
                .await?;
            return parse_quantity(&result, "gas estimate");
        }

        Ok(match tx.data {
            Some(_) => DETERMINISTIC_CONTRACT_GAS,
            None => DETERMINISTIC_TRANSFER_GAS,
        })
    }

    async fn send_transaction(&self, tx: &TxPayload) -> Result<B256, PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let result = self
                .proxy_call("eth_sendTransaction", serde_json::json!([tx.to_rpc_value()]))
                .await?;
            return parse_hash(&result, "eth_sendTransaction");
        }

        self.deterministic_hash(tx)
    }

    async fn call(&self, to: Address, data: &Bytes) -> Result<Bytes, PortError> {
        self.check_mode()?;

        if self.is_proxy() {
            let result = self
                .proxy_call(
                    "eth_call",
                    serde_json::json!([{ "to": to.to_string(), "data": data.to_string() }, "latest"]),
                )
                .await?;
            return parse_bytes(&result, "eth_call result");
        }

        let word = if data.starts_with(&DECIMALS_SELECTOR) {
            U256::from(DETERMINISTIC_TOKEN_DECIMALS)
        } else {
            U256::ZERO
        };
        Ok(Bytes::from(word.to_be_bytes::<32>().to_vec()))
    }
}
