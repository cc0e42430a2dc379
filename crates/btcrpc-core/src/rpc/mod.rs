//! Bitcoin Core RPC abstraction layer.
//!
//! [`BitcoinRpc`] is the single call primitive every wrapper is built on.
//! [`HttpRpcClient`] implements it over HTTP JSON-RPC; `mock::MockRpc` is a
//! canned-response double for tests. Per-method wrappers live in the
//! [`ChainRpc`], [`WalletRpc`], and [`RawTxRpc`] extension traits, which are
//! implemented for every `BitcoinRpc`.

mod chain;
mod http_adapter;
#[cfg(test)]
pub mod mock;
mod parsing;
mod rawtx;
pub mod types;
mod wallet;

pub use chain::ChainRpc;
pub use http_adapter::HttpRpcClient;
pub use rawtx::RawTxRpc;
pub use types::ChainInfo;
pub use wallet::WalletRpc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Minimal JSON-RPC surface of a Bitcoin Core node.
///
/// `params` are positional and passed through unchecked; the node validates
/// arity and types and answers mismatches with a structured error.
#[async_trait]
pub trait BitcoinRpc: Send + Sync {
    /// Invoke `method` and return the envelope's `result` verbatim.
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError>;

    /// Invoke several methods, returning results in request order.
    /// Implementations may batch these into fewer HTTP requests.
    async fn call_batch(
        &self,
        calls: &[(String, Vec<serde_json::Value>)],
    ) -> Result<Vec<serde_json::Value>, CoreError> {
        let mut results = Vec::with_capacity(calls.len());
        for (method, params) in calls {
            results.push(self.call(method, params.clone()).await?);
        }
        Ok(results)
    }
}

/// [`BitcoinRpc::call`] followed by decoding the result into `T`.
pub async fn call_typed<T, R>(
    rpc: &R,
    method: &str,
    params: Vec<serde_json::Value>,
) -> Result<T, CoreError>
where
    T: DeserializeOwned + Send,
    R: BitcoinRpc + ?Sized,
{
    let raw = rpc.call(method, params).await?;
    parsing::decode_result(method, raw)
}
