use std::path::PathBuf;

use clap::Parser;

/// btcrpc — send a JSON-RPC call to a Bitcoin Core node and print the result.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Bitcoin Core RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:8332", env = "BTCRPC_URL")]
    pub rpc_url: String,

    /// RPC username.
    #[arg(long, env = "BTCRPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "BTCRPC_PASS", hide_env_values = true)]
    pub rpc_pass: Option<String>,

    /// Cookie file with `user:password`, used when no user/pass is given.
    #[arg(long, env = "BTCRPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Wallet to route the call to (`/wallet/<name>`).
    #[arg(long, env = "BTCRPC_WALLET")]
    pub wallet: Option<String>,

    /// Abort the call after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// RPC method name, e.g. `getblockcount`.
    pub method: String,

    /// Positional parameters. Each is parsed as JSON and falls back to a
    /// plain string.
    pub params: Vec<String>,
}
