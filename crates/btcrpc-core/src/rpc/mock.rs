use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};

use super::BitcoinRpc;

/// Bitcoin Core's "Method not found" code.
const RPC_METHOD_NOT_FOUND: i64 = -32601;

/// A mock Bitcoin RPC backend for testing. Answers each method with a canned
/// result or error populated via the builder pattern, and records every call
/// so tests can assert on the exact positional parameters sent.
pub struct MockRpc {
    responses: HashMap<String, Result<serde_json::Value, (i64, String)>>,
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            responses: HashMap::new(),
        }
    }

    /// Every `(method, params)` pair received so far, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

pub struct MockRpcBuilder {
    responses: HashMap<String, Result<serde_json::Value, (i64, String)>>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, method: &str, result: serde_json::Value) -> Self {
        self.responses.insert(method.to_owned(), Ok(result));
        self
    }

    pub fn with_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.responses
            .insert(method.to_owned(), Err((code, message.to_owned())));
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BitcoinRpc for MockRpc {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params));

        match self.responses.get(method) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err((code, message))) => Err(RpcError::Server {
                code: *code,
                message: message.clone(),
            }
            .into()),
            None => Err(RpcError::Server {
                code: RPC_METHOD_NOT_FOUND,
                message: "Method not found".to_owned(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn unknown_method_reports_method_not_found() {
        let rpc = MockRpc::builder().build();
        let err = rpc.call("nosuchmethod", Vec::new()).await.unwrap_err();
        assert_eq!(err.server_code(), Some(RPC_METHOD_NOT_FOUND));
        assert_eq!(err.to_string(), "Method not found");
    }

    #[tokio::test]
    async fn default_batch_runs_calls_in_order() {
        let rpc = MockRpc::builder()
            .with_result("getblockcount", json!(101))
            .with_result("getbalance", json!(1.5))
            .build();
        let results = rpc
            .call_batch(&[
                ("getbalance".to_owned(), Vec::new()),
                ("getblockcount".to_owned(), Vec::new()),
            ])
            .await
            .unwrap();
        assert_eq!(results, vec![json!(1.5), json!(101)]);
        let methods: Vec<String> = rpc.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["getbalance", "getblockcount"]);
    }

    #[tokio::test]
    async fn default_batch_stops_at_first_error() {
        let rpc = MockRpc::builder()
            .with_error("getbalance", -18, "Requested wallet does not exist or is not loaded")
            .with_result("getblockcount", json!(101))
            .build();
        let err = rpc
            .call_batch(&[
                ("getbalance".to_owned(), Vec::new()),
                ("getblockcount".to_owned(), Vec::new()),
            ])
            .await
            .unwrap_err();
        assert_eq!(err.server_code(), Some(-18));
        assert_eq!(rpc.calls().len(), 1);
    }
}
