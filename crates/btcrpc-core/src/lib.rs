//! Client library for Bitcoin Core's JSON-RPC interface.
//!
//! [`rpc::HttpRpcClient`] performs authenticated calls and unwraps the
//! node's response envelope; the [`rpc::ChainRpc`], [`rpc::WalletRpc`], and
//! [`rpc::RawTxRpc`] extension traits add one typed wrapper per node method.
//!
//! ```no_run
//! use btcrpc_core::rpc::{BitcoinRpc, HttpRpcClient, RawTxRpc, WalletRpc};
//! use btcrpc_core::ClientConfig;
//!
//! # async fn run() -> Result<(), btcrpc_core::CoreError> {
//! let config = ClientConfig::new("http://127.0.0.1:18443", "user", "pass");
//! let rpc = HttpRpcClient::connect(config).await?;
//!
//! let address = rpc.get_new_address("").await?;
//! assert!(rpc.validate_address(&address).await?.is_valid);
//!
//! let count = rpc.call("getblockcount", Vec::new()).await?;
//! println!("height {count}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod rpc;
#[cfg(test)]
mod test_util;

pub use config::ClientConfig;
pub use error::{CoreError, RpcError};
