//! Native JSON-RPC client for Bitcoin Core compatible endpoints.
//!
//! Implements [`BitcoinRpc`](super::BitcoinRpc) over HTTP using `reqwest`,
//! with Basic or cookie-file auth, optional request rate limiting, and
//! single plus batched calls.

mod client;
mod protocol;

pub use client::HttpRpcClient;
