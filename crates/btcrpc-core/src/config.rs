//! Connection settings for [`HttpRpcClient`](crate::rpc::HttpRpcClient).
//!
//! A [`ClientConfig`] is built once by the embedding application and handed
//! to the client by value; nothing in it changes afterwards.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::CoreError;

/// Default number of calls packed into a single batched HTTP request.
pub const DEFAULT_BATCH_CHUNK_SIZE: usize = 50;

#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Bitcoin Core `.cookie` file, consulted only when no explicit
    /// username/password pair is set.
    pub cookie_file: Option<PathBuf>,
    /// Routes calls to `<endpoint>/wallet/<name>`.
    pub wallet: Option<String>,
    /// Whole-request deadline. `None` means the call waits as long as the
    /// node takes to answer.
    pub request_timeout: Option<Duration>,
    pub requests_per_second: Option<u32>,
    pub batch_chunk_size: usize,
}

impl ClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::unauthenticated(endpoint)
        }
    }

    /// Config without credentials; pair with [`Self::with_cookie_file`] or
    /// use against endpoints that carry their token in the URL.
    pub fn unauthenticated(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            cookie_file: None,
            wallet: None,
            request_timeout: None,
            requests_per_second: None,
            batch_chunk_size: DEFAULT_BATCH_CHUNK_SIZE,
        }
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = Some(limit);
        self
    }

    pub fn with_batch_chunk_size(mut self, size: usize) -> Self {
        self.batch_chunk_size = size;
        self
    }

    /// URL the client actually posts to, including wallet routing.
    ///
    /// The wallet name is pushed as one percent-encoded path segment, so
    /// names containing `#`, `?`, `/` or spaces still address that wallet.
    pub fn effective_endpoint(&self) -> Result<Url, CoreError> {
        // The parser's own message never echoes the input, which may carry
        // userinfo.
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            CoreError::Config(format!("endpoint is not a valid HTTP(S) URL: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "unsupported endpoint scheme `{}`; expected http or https",
                url.scheme()
            )));
        }

        if let Some(wallet) = &self.wallet {
            url.path_segments_mut()
                .map_err(|()| CoreError::Config("endpoint URL cannot carry a path".to_owned()))?
                .pop_if_empty()
                .push("wallet")
                .push(wallet);
        }
        Ok(url)
    }

    /// Basic-auth pair to send: explicit username and password first, then
    /// the cookie file, otherwise none.
    pub fn credentials(&self) -> Result<Option<(String, String)>, CoreError> {
        match (&self.username, &self.password, &self.cookie_file) {
            (Some(user), Some(pass), _) => Ok(Some((user.clone(), pass.clone()))),
            (Some(_), None, _) | (None, Some(_), _) => Err(CoreError::Config(
                "username and password must be given together".to_owned(),
            )),
            (None, None, Some(path)) => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    CoreError::Config(format!("cannot read cookie file {}: {e}", path.display()))
                })?;
                parse_cookie(&contents)
                    .map(Some)
                    .ok_or_else(|| {
                        CoreError::Config(format!(
                            "cookie file {} does not hold `user:password`",
                            path.display()
                        ))
                    })
            }
            (None, None, None) => Ok(None),
        }
    }
}

/// First line of a `.cookie` file as `(user, password)`. Bitcoin Core
/// writes `__cookie__:<hex>`; the password itself may contain `:`.
fn parse_cookie(contents: &str) -> Option<(String, String)> {
    let (user, pass) = contents.lines().next()?.trim().split_once(':')?;
    (!user.is_empty() && !pass.is_empty()).then(|| (user.to_owned(), pass.to_owned()))
}

/// `url` with any userinfo removed, for logs and error messages.
pub(crate) fn redact_userinfo(url: &Url) -> String {
    let mut url = url.clone();
    // Both fail only for URLs that cannot carry userinfo in the first place.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.to_string()
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field(
                "endpoint",
                &Url::parse(&self.endpoint)
                    .map(|url| redact_userinfo(&url))
                    .unwrap_or_else(|_| "<invalid url>".to_owned()),
            )
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cookie_file", &self.cookie_file)
            .field("wallet", &self.wallet)
            .field("request_timeout", &self.request_timeout)
            .field("requests_per_second", &self.requests_per_second)
            .field("batch_chunk_size", &self.batch_chunk_size)
            .finish()
    }
}
