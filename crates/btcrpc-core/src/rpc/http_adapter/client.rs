use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use futures::future::try_join_all;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, Url};
use tracing::{debug, info, trace, warn};

use crate::config::{redact_userinfo, ClientConfig};
use crate::error::{CoreError, RpcError};

use super::super::BitcoinRpc;
use super::protocol::{decode_batch, decode_envelope, Envelope, JsonRpcBatchItem, JsonRpcRequest};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Method used by [`HttpRpcClient::connect`] to prove the endpoint is
/// reachable and accepts our credentials.
const LIVENESS_PROBE_METHOD: &str = "getblockcount";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Bitcoin Core JSON-RPC client over HTTP(S).
///
/// Holds only immutable connection settings plus the transport's own pool,
/// so one instance can be shared across tasks (e.g. behind an `Arc`) without
/// locking. Every [`call`](BitcoinRpc::call) is one POST; nothing is cached
/// or retried.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: Url,
    auth: Option<(String, String)>,
    limiter: Option<DirectRateLimiter>,
    batch_chunk_size: usize,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Build a client without contacting the node.
    ///
    /// Validates the endpoint scheme, credential pairing, and batch size.
    /// Prefer [`connect`](Self::connect) unless validation should be
    /// deferred to the first call.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        if config.batch_chunk_size == 0 {
            return Err(CoreError::Config(
                "rpc batch chunk size must be at least 1".to_owned(),
            ));
        }
        let auth = config.credentials()?;
        let url = config.effective_endpoint()?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_nodelay(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RpcError::Transport)?;

        let limiter = match config.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::Config("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            auth,
            limiter,
            batch_chunk_size: config.batch_chunk_size,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    /// Build a client and verify it with one `getblockcount` call.
    ///
    /// Authentication and network problems surface here as
    /// [`CoreError::Connect`] instead of on first use.
    pub async fn connect(config: ClientConfig) -> Result<Self, CoreError> {
        let client = Self::new(config)?;
        let endpoint = redact_userinfo(&client.url);

        let blocks = client
            .call(LIVENESS_PROBE_METHOD, Vec::new())
            .await
            .map_err(|source| CoreError::Connect {
                endpoint: endpoint.clone(),
                source: Box::new(source),
            })?;

        info!(endpoint = %endpoint, blocks = %blocks, "connected to Bitcoin Core");
        Ok(client)
    }

    /// The URL calls are posted to, wallet path included.
    pub fn endpoint(&self) -> &str {
        self.url.as_str()
    }

    /// Atomically reserve `count` consecutive request IDs for batch calls.
    fn reserve_request_ids(&self, count: u64) -> u64 {
        self.next_id.fetch_add(count, Ordering::Relaxed)
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// POST a serialized body and return the raw response text.
    async fn post(&self, body: Vec<u8>) -> Result<(reqwest::StatusCode, String), CoreError> {
        self.wait_for_rate_limit().await;

        let mut builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await.map_err(RpcError::Transport)?;
        let status = response.status();
        let text = response.text().await.map_err(RpcError::Transport)?;
        Ok((status, text))
    }

    async fn rpc_batch(
        &self,
        calls: &[(String, Vec<serde_json::Value>)],
    ) -> Result<Vec<serde_json::Value>, CoreError> {
        let start_id = self.reserve_request_ids(calls.len() as u64);
        debug!(
            rpc.batch_start_id = start_id,
            rpc.batch_size = calls.len(),
            "rpc batch call"
        );
        let requests: Vec<JsonRpcBatchItem<'_>> = calls
            .iter()
            .enumerate()
            .map(|(offset, (method, params))| JsonRpcBatchItem {
                jsonrpc: "1.0",
                id: start_id + offset as u64,
                method,
                params,
            })
            .collect();
        let payload = serde_json::to_vec(&requests)?;

        let (status, body) = self.post(payload).await?;
        debug!(
            rpc.batch_start_id = start_id,
            rpc.batch_size = calls.len(),
            %status,
            body_len = body.len(),
            "rpc batch response"
        );
        trace!(
            rpc.batch_start_id = start_id,
            rpc.batch_size = calls.len(),
            body = %body,
            "rpc batch response body"
        );

        let decoded = decode_batch(&body)?;
        let mut by_id: HashMap<u64, Envelope> = HashMap::with_capacity(decoded.len());
        for item in decoded {
            // Unidentifiable items cannot be matched; the gap shows up below.
            if let Some(id) = item.id.as_ref() {
                by_id.insert(id.to_u64()?, item);
            }
        }

        let mut ordered = Vec::with_capacity(calls.len());
        for id in start_id..(start_id + calls.len() as u64) {
            let Some(item) = by_id.remove(&id) else {
                warn!(rpc.batch_start_id = start_id, rpc.id = id, "batch response missing item");
                return Err(RpcError::MissingBatchItem { id }.into());
            };
            ordered.push(item.into_result()?);
        }

        Ok(ordered)
    }
}

#[async_trait]
impl BitcoinRpc for HttpRpcClient {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let id = self.reserve_request_ids(1);
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let payload = serde_json::to_vec(&JsonRpcRequest {
            method,
            params: &params,
        })?;

        let (status, body) = self.post(payload).await?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        decode_envelope(&body)
    }

    async fn call_batch(
        &self,
        calls: &[(String, Vec<serde_json::Value>)],
    ) -> Result<Vec<serde_json::Value>, CoreError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        // Keep each payload small enough for node/proxy limits while still
        // issuing chunks concurrently to avoid serial round-trip latency.
        let chunk_futures: Vec<_> = calls
            .chunks(self.batch_chunk_size)
            .map(|chunk| self.rpc_batch(chunk))
            .collect();
        let chunked = try_join_all(chunk_futures).await?;
        Ok(chunked.into_iter().flatten().collect())
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
