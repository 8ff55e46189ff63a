#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

pub type RpcHandler = dyn Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync;

#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl CallLog {
    pub fn methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("call log lock")
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .expect("call log lock")
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

/// JSON-RPC server on an ephemeral port answering through `handler`.
pub fn spawn_mock_rpc<F>(handler: F) -> (String, CallLog)
where
    F: Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let log = CallLog::default();
    let calls = Arc::clone(&log.calls);
    let handler: Arc<RpcHandler> = Arc::new(handler);

    thread::spawn(move || {
        for mut req in server.incoming_requests() {
            let mut body = String::new();
            if req.as_reader().read_to_string(&mut body).is_err() {
                let _ = req.respond(Response::from_string("bad body").with_status_code(StatusCode(400)));
                continue;
            }
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let id = parsed.get("id").cloned().unwrap_or(Value::Null);
            let method = parsed
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let params = parsed.get("params").cloned().unwrap_or(Value::Null);
            if let Ok(mut g) = calls.lock() {
                g.push((method.clone(), params.clone()));
            }

            let payload = match handler(&method, &params) {
                Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
                Err((code, message)) => json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": code, "message": message},
                }),
            };
            let response = Response::from_string(payload.to_string())
                .with_status_code(StatusCode(200))
                .with_header(
                    "Content-Type: application/json"
                        .parse::<tiny_http::Header>()
                        .expect("content type header"),
                );
            let _ = req.respond(response);
        }
    });

    (addr, log)
}

/// HTTP server that answers every request with the same status and body.
pub fn spawn_fixed_http(status: u16, body: &'static str) -> String {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    thread::spawn(move || {
        for req in server.incoming_requests() {
            let _ = req.respond(Response::from_string(body).with_status_code(StatusCode(status)));
        }
    });

    addr
}

/// A mined receipt shaped the way nodes return it.
pub fn receipt_json(tx_hash: &str, block_number: u64, gas_used: u64, success: bool) -> Value {
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": format!("{block_number:#x}"),
        "from": "0x1000000000000000000000000000000000000001",
        "to": "0x2222222222222222222222222222222222222222",
        "cumulativeGasUsed": format!("{gas_used:#x}"),
        "gasUsed": format!("{gas_used:#x}"),
        "effectiveGasPrice": "0x5d21dba00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
    })
}

/// Calldata of an `eth_call` request, whichever field the client used.
pub fn call_data(params: &Value) -> String {
    let tx = &params[0];
    tx.get("input")
        .or_else(|| tx.get("data"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

pub fn hex_word(value: u64) -> String {
    format!("0x{value:064x}")
}
