#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;

use aurapay_wallet_core::{
    AddChainParams, ChainReader, NetworkConfig, PortError, SessionPort, TxPayload, TxReceipt,
    WalletProvider,
};

pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

pub fn tx_hash() -> B256 {
    TX_HASH.parse().expect("valid tx hash")
}

pub fn wallet_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid wallet address")
}

pub fn recipient_address() -> Address {
    "0x000000000000000000000000000000000000dEaD"
        .parse()
        .expect("valid recipient address")
}

pub fn word(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<32>().to_vec())
}

#[derive(Debug, Clone)]
pub struct ProviderScript {
    pub available: bool,
    pub chain_id: u64,
    pub known_chains: Vec<u64>,
    pub chain_id_error: Option<PortError>,
    pub switch_error: Option<PortError>,
    pub add_error: Option<PortError>,
    /// Chain the wallet ends up on after a "successful" switch; defaults to the requested one.
    pub switch_lands_on: Option<u64>,
    pub token_decimals: u8,
    pub gas_estimate: u64,
    pub estimate_error: Option<PortError>,
    pub send_error: Option<PortError>,
    pub tx_hash: B256,
    pub log: Vec<String>,
    pub estimated: Vec<TxPayload>,
    pub sent: Vec<TxPayload>,
    pub added: Vec<AddChainParams>,
}

impl Default for ProviderScript {
    fn default() -> Self {
        Self {
            available: true,
            chain_id: 43113,
            known_chains: vec![1, 43113, 43114],
            chain_id_error: None,
            switch_error: None,
            add_error: None,
            switch_lands_on: None,
            token_decimals: 6,
            gas_estimate: 21_000,
            estimate_error: None,
            send_error: None,
            tx_hash: tx_hash(),
            log: Vec::new(),
            estimated: Vec::new(),
            sent: Vec::new(),
            added: Vec::new(),
        }
    }
}

/// In-memory wallet whose answers are set up per test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    pub script: Arc<Mutex<ProviderScript>>,
}

impl ScriptedProvider {
    pub fn new(script: ProviderScript) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }

    pub fn snapshot(&self) -> ProviderScript {
        self.script.lock().expect("provider script lock").clone()
    }
}

fn parse_hex_chain(raw: &str) -> Result<u64, PortError> {
    u64::from_str_radix(raw.trim_start_matches("0x"), 16)
        .map_err(|e| PortError::Validation(format!("bad chain id {raw}: {e}")))
}

#[async_trait]
impl WalletProvider for ScriptedProvider {
    fn is_available(&self) -> bool {
        self.script.lock().expect("provider script lock").available
    }

    async fn accounts(&self) -> Result<Vec<Address>, PortError> {
        Ok(vec![wallet_address()])
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push("eth_chainId".to_owned());
        match &g.chain_id_error {
            Some(e) => Err(e.clone()),
            None => Ok(g.chain_id),
        }
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push(format!("wallet_switchEthereumChain:{chain_id_hex}"));
        if let Some(e) = &g.switch_error {
            return Err(e.clone());
        }
        let requested = parse_hex_chain(chain_id_hex)?;
        if !g.known_chains.contains(&requested) {
            return Err(PortError::Rpc {
                code: 4902,
                message: format!("Unrecognized chain ID {chain_id_hex}"),
            });
        }
        g.chain_id = g.switch_lands_on.unwrap_or(requested);
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push(format!("wallet_addEthereumChain:{}", params.chain_id));
        g.added.push(params.clone());
        if let Some(e) = &g.add_error {
            return Err(e.clone());
        }
        let chain = parse_hex_chain(&params.chain_id)?;
        g.known_chains.push(chain);
        g.chain_id = chain;
        Ok(())
    }

    async fn estimate_gas(&self, tx: &TxPayload) -> Result<u64, PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push("eth_estimateGas".to_owned());
        g.estimated.push(tx.clone());
        match &g.estimate_error {
            Some(e) => Err(e.clone()),
            None => Ok(g.gas_estimate),
        }
    }

    async fn send_transaction(&self, tx: &TxPayload) -> Result<B256, PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push("eth_sendTransaction".to_owned());
        if let Some(e) = &g.send_error {
            return Err(e.clone());
        }
        g.sent.push(tx.clone());
        Ok(g.tx_hash)
    }

    async fn call(&self, _to: Address, _data: &Bytes) -> Result<Bytes, PortError> {
        let mut g = self.script.lock().expect("provider script lock");
        g.log.push("eth_call".to_owned());
        Ok(word(U256::from(g.token_decimals)))
    }
}

#[derive(Debug, Clone)]
pub struct ReaderScript {
    pub native_balance: U256,
    pub token_decimals: u8,
    pub token_balance: U256,
    pub receipt: Option<TxReceipt>,
    pub head: u64,
    pub failure: Option<PortError>,
    pub head_failure: Option<PortError>,
    /// Raw bytes every `eth_call` returns instead of an encoded word.
    pub call_result: Option<Bytes>,
    pub calls: Vec<String>,
}

impl Default for ReaderScript {
    fn default() -> Self {
        Self {
            native_balance: U256::ZERO,
            token_decimals: 6,
            token_balance: U256::ZERO,
            receipt: None,
            head: 0,
            failure: None,
            head_failure: None,
            call_result: None,
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedReader {
    pub script: Arc<Mutex<ReaderScript>>,
}

impl ScriptedReader {
    pub fn new(script: ReaderScript) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.lock().expect("reader script lock").calls.clone()
    }
}

#[async_trait]
impl ChainReader for ScriptedReader {
    async fn balance(&self, network: &NetworkConfig, _address: Address) -> Result<U256, PortError> {
        let mut g = self.script.lock().expect("reader script lock");
        g.calls.push(format!("eth_getBalance@{}", network.chain_id));
        match &g.failure {
            Some(e) => Err(e.clone()),
            None => Ok(g.native_balance),
        }
    }

    async fn call(
        &self,
        network: &NetworkConfig,
        _to: Address,
        data: &Bytes,
    ) -> Result<Bytes, PortError> {
        let mut g = self.script.lock().expect("reader script lock");
        g.calls.push(format!("eth_call@{}", network.chain_id));
        if let Some(e) = &g.failure {
            return Err(e.clone());
        }
        if let Some(raw) = &g.call_result {
            return Ok(raw.clone());
        }
        // decimals() is the only zero-argument call the resolver makes.
        if data.len() == 4 {
            Ok(word(U256::from(g.token_decimals)))
        } else {
            Ok(word(g.token_balance))
        }
    }

    async fn transaction_receipt(
        &self,
        network: &NetworkConfig,
        _tx_hash: B256,
    ) -> Result<Option<TxReceipt>, PortError> {
        let mut g = self.script.lock().expect("reader script lock");
        g.calls.push(format!("eth_getTransactionReceipt@{}", network.chain_id));
        match &g.failure {
            Some(e) => Err(e.clone()),
            None => Ok(g.receipt),
        }
    }

    async fn block_number(&self, network: &NetworkConfig) -> Result<u64, PortError> {
        let mut g = self.script.lock().expect("reader script lock");
        g.calls.push(format!("eth_blockNumber@{}", network.chain_id));
        match &g.head_failure {
            Some(e) => Err(e.clone()),
            None => Ok(g.head),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedSession {
    pub ready: bool,
    pub authenticated: bool,
    pub address: Option<Address>,
}

impl SessionPort for FixedSession {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn primary_address(&self) -> Option<Address> {
        self.address
    }
}
