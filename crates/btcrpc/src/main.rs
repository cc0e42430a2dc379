mod cli;

use std::time::Duration;

use btcrpc_core::rpc::{BitcoinRpc, HttpRpcClient};
use btcrpc_core::ClientConfig;
use clap::Parser;
use eyre::{eyre, WrapErr};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    let mut config = ClientConfig::unauthenticated(&args.rpc_url);
    config.username = args.rpc_user.clone();
    config.password = args.rpc_pass.clone();
    config.cookie_file = args.rpc_cookie_file.clone();
    config.wallet = args.wallet.clone();
    config.request_timeout = args.timeout_secs.map(Duration::from_secs);

    // Connect (and run the liveness probe) before issuing the real call so
    // credential and network problems get a clear message.
    let rpc = HttpRpcClient::connect(config).await.map_err(|err| {
        let message = format_rpc_connect_error(&err);
        eyre!(message).wrap_err("while attempting to connect to Bitcoin Core RPC")
    })?;

    let params = args.params.iter().map(String::as_str).map(parse_param).collect();
    tracing::debug!(method = %args.method, "issuing rpc call");
    let result = rpc.call(&args.method, params).await.map_err(|err| {
        let mut message = format!("`{}` failed: {err}", args.method);
        if let Some(hint) = call_hint(&err) {
            message.push('\n');
            message.push_str(hint);
        }
        eyre!(message)
    })?;

    println!("{}", render_result(&result)?);
    Ok(())
}

/// Parse a command-line argument as JSON, treating anything that is not
/// valid JSON as a string.
fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

/// Strings print bare, everything else pretty-printed.
fn render_result(result: &serde_json::Value) -> eyre::Result<String> {
    match result {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Null => Ok(String::new()),
        other => serde_json::to_string_pretty(other).context("render result"),
    }
}

/// The connect error plus a hint. The endpoint comes from the error, which
/// carries it without userinfo, never from the raw `--rpc-url`.
fn format_rpc_connect_error(err: &btcrpc_core::CoreError) -> String {
    let source_error = err.to_string();
    let mut lines = vec![source_error.clone()];

    if err.is_auth() {
        lines.push(
            "hint: authentication failed; verify --rpc-user/--rpc-pass or --rpc-cookie-file"
                .into(),
        );
    } else if source_error.contains("dns error") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("certificate") || source_error.contains("tls") {
        lines.push(
            "hint: TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
                .into(),
        );
    } else if err.is_transport() {
        lines.push(
            "hint: request could not be sent; verify the node is running and rpcbind/rpcallowip permit this host"
                .into(),
        );
    }

    lines.join("\n")
}

fn call_hint(err: &btcrpc_core::CoreError) -> Option<&'static str> {
    match err.server_code()? {
        -18 => Some("hint: wallet not loaded; check --wallet or run `loadwallet`"),
        -19 => Some("hint: several wallets are loaded; pick one with --wallet"),
        -32601 => Some("hint: unknown method; run `help` to list what the node supports"),
        _ => None,
    }
}
