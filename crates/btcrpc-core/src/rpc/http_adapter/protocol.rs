use serde::Deserialize;

use crate::error::{CoreError, RpcError};

/// Single-call request body. Bitcoin Core accepts JSON-RPC 1.0 bodies
/// without `jsonrpc`/`id`, so only the method and positional params go out.
#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
}

/// Batch items need ids so responses can be matched back to calls.
#[derive(serde::Serialize)]
pub(super) struct JsonRpcBatchItem<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
}

/// Echoed request id. Proxies in front of the node sometimes stringify it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ResponseId {
    Number(u64),
    Text(String),
}

impl ResponseId {
    pub(super) fn to_u64(&self) -> Result<u64, CoreError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.parse().map_err(|_| {
                RpcError::InvalidResponse(format!("batch response id `{s}` is not a number"))
                    .into()
            }),
        }
    }
}

/// Response envelope shared by single and batched calls.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope {
    #[serde(default)]
    pub(super) id: Option<ResponseId>,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Node error object, `{"code": <int>, "message": <string>}`.
#[derive(Deserialize)]
struct NodeError {
    code: i64,
    message: String,
}

impl Envelope {
    /// The call's outcome. A missing `result` reads as `null`; a `null` or
    /// empty-string `error` means success.
    pub(super) fn into_result(self) -> Result<serde_json::Value, CoreError> {
        match self.error {
            None => {}
            Some(serde_json::Value::String(s)) if s.is_empty() => {}
            Some(raw) => {
                return Err(match NodeError::deserialize(&raw) {
                    Ok(NodeError { code, message }) => RpcError::Server { code, message },
                    Err(_) => RpcError::InvalidResponse(format!("unrecognised error value {raw}")),
                }
                .into());
            }
        }
        Ok(self.result.unwrap_or(serde_json::Value::Null))
    }
}

/// Unwrap a single-call response body into its `result`.
///
/// An empty or non-JSON body is how Bitcoin Core answers a request whose
/// Basic-auth credentials it rejected, so both map to [`RpcError::Auth`].
pub(super) fn decode_envelope(body: &str) -> Result<serde_json::Value, CoreError> {
    let envelope: Envelope = serde_json::from_value(parse_body(body)?).map_err(|e| {
        RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={body}"))
    })?;
    envelope.into_result()
}

pub(super) fn decode_batch(body: &str) -> Result<Vec<Envelope>, CoreError> {
    serde_json::from_value(parse_body(body)?).map_err(|e| {
        RpcError::InvalidResponse(format!("decode JSON-RPC batch response: {e}; body={body}"))
            .into()
    })
}

fn parse_body(body: &str) -> Result<serde_json::Value, CoreError> {
    if body.trim().is_empty() {
        return Err(RpcError::Auth.into());
    }
    serde_json::from_str(body).map_err(|_| RpcError::Auth.into())
}
