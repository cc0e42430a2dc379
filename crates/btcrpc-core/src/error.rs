/// Failures of the JSON-RPC exchange itself.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Bitcoin Core answers rejected Basic-auth requests with an empty body.
    #[error("invalid credentials: node returned an empty or non-JSON response")]
    Auth,

    #[error("{message}")]
    Server { code: i64, message: String },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("missing JSON-RPC batch item id={id}")]
    MissingBatchItem { id: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("failed to encode request parameters: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("unexpected `{method}` result: {message}")]
    InvalidResult { method: String, message: String },

    #[error("could not connect to RPC endpoint `{endpoint}`: {source}")]
    Connect {
        /// Target URL with any userinfo stripped.
        endpoint: String,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// The node-supplied error code, if this error came from the node.
    pub fn server_code(&self) -> Option<i64> {
        match self {
            Self::Rpc(RpcError::Server { code, .. }) => Some(*code),
            Self::Connect { source, .. } => source.server_code(),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        match self {
            Self::Rpc(RpcError::Auth) => true,
            Self::Connect { source, .. } => source.is_auth(),
            _ => false,
        }
    }

    pub fn is_transport(&self) -> bool {
        match self {
            Self::Rpc(RpcError::Transport(_)) => true,
            Self::Connect { source, .. } => source.is_transport(),
            _ => false,
        }
    }
}
