use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Bytes, B256};
use serde_json::Value;

use aurapay_wallet_core::PortError;

/// Minimal JSON-RPC 2.0 client for relaying wallet methods to an EIP-1193 bridge.
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    client: reqwest::Client,
    next_id: Arc<AtomicU64>,
}

impl JsonRpcTransport {
    pub fn new(timeout_ms: u64) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub async fn request(&self, url: &str, method: &str, params: Value) -> Result<Value, PortError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!(url, method, id, "json-rpc request");

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("{method} request failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PortError::Transport(format!("{method} body read failed: {e}")))?;
        // Bridges may answer a rejected prompt with a non-2xx status and a
        // JSON-RPC error body; the error code wins over the status.
        let body: Option<Value> = serde_json::from_str(&text).ok();
        let error = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .filter(|e| !e.is_null());
        if let Some(err) = error {
            return Err(rpc_error(err));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "{method} http status {status}: {text}"
            )));
        }
        let body = body.ok_or_else(|| {
            PortError::Transport(format!("{method} json decode failed: {text}"))
        })?;
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport(format!("{method} response missing result")))
    }
}

fn rpc_error(err: &Value) -> PortError {
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| err.to_string());
    match err.get("code").and_then(Value::as_i64) {
        Some(code) => PortError::Rpc { code, message },
        None => PortError::Transport(format!("rpc error without code: {message}")),
    }
}

pub(crate) fn parse_quantity(value: &Value, what: &str) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation(format!("{what} must be a hex string")))?;
    parse_chain_id_str(raw).map_err(|_| PortError::Validation(format!("invalid {what}: {raw}")))
}

pub(crate) fn parse_bytes(value: &Value, what: &str) -> Result<Bytes, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Validation(format!("{what} must be a hex string")))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid {what}: {e}")))
}

pub(crate) fn parse_hash(value: &Value, what: &str) -> Result<B256, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Validation(format!("{what} must return a tx hash")))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid {what} hash: {e}")))
}

pub(crate) fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if raw.starts_with("0x") || raw.starts_with("0X") {
        u64::from_str_radix(raw.trim_start_matches("0x").trim_start_matches("0X"), 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}
