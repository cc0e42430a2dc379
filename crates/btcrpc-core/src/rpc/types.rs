//! Typed parameters and results for the wrapped RPC methods.
//!
//! Only fields the wrappers rely on are modelled; methods whose results are
//! large or version-dependent return raw `serde_json::Value` instead.

use bitcoin::{Amount, BlockHash, Txid};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Chain
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    pub pruned: bool,
}

/// Fee estimation modes accepted by `estimatesmartfee` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstimateMode {
    Unset,
    Economical,
    Conservative,
}

/// Result of `estimatesmartfee`. `fee_rate` is per kvB and absent when the
/// node has too little data.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeEstimate {
    #[serde(
        rename = "feerate",
        default,
        with = "bitcoin::amount::serde::as_btc::opt"
    )]
    pub fee_rate: Option<Amount>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub blocks: u32,
}

// ==============================================================================
// Addresses
// ==============================================================================

/// Result of `validateaddress`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressValidation {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    pub address: Option<String>,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: Option<String>,
    #[serde(rename = "iswitness")]
    pub is_witness: Option<bool>,
    pub error: Option<String>,
}

// ==============================================================================
// Wallet
// ==============================================================================

/// One entry of `listunspent`.
#[derive(Debug, Clone, Deserialize)]
pub struct Utxo {
    pub txid: Txid,
    pub vout: u32,
    pub address: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub amount: Amount,
    pub confirmations: u32,
    #[serde(default)]
    pub spendable: bool,
    #[serde(default)]
    pub safe: bool,
}

/// Optional positional arguments of `sendtoaddress`. `None` fields are sent
/// as `null`, which the node treats as its default.
#[derive(Debug, Clone, Default)]
pub struct SendToAddressOptions {
    pub comment: Option<String>,
    pub comment_to: Option<String>,
    pub subtract_fee_from_amount: Option<bool>,
    pub replaceable: Option<bool>,
    pub conf_target: Option<u32>,
    pub estimate_mode: Option<EstimateMode>,
}

/// Options object of `bumpfee`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BumpFeeOptions {
    /// sat/vB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conf_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaceable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_mode: Option<EstimateMode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BumpFeeResult {
    pub txid: Option<Txid>,
    pub psbt: Option<String>,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub origfee: Amount,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub fee: Amount,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Options object of `fundrawtransaction`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundOptions {
    /// Fee rate per kvB.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "bitcoin::amount::serde::as_btc::opt"
    )]
    pub fee_rate: Option<Amount>,
    /// Output indices the fee is taken from.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtract_fee_from_outputs: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaceable: Option<bool>,
}

/// Result of `fundrawtransaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct FundedTransaction {
    pub hex: String,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub fee: Amount,
    /// Position of the change output, or -1 when none was added.
    #[serde(rename = "changepos")]
    pub change_position: i32,
}

// ==============================================================================
// Raw Transactions
// ==============================================================================

/// Input reference for `createrawtransaction`.
#[derive(Debug, Clone, Serialize)]
pub struct TxInputRef {
    pub txid: Txid,
    pub vout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

/// Previous output description for the signing RPCs, needed when the node
/// does not know the spent output.
#[derive(Debug, Clone, Serialize)]
pub struct PrevTx {
    pub txid: Txid,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(rename = "redeemScript", skip_serializing_if = "Option::is_none")]
    pub redeem_script: Option<String>,
    #[serde(rename = "witnessScript", skip_serializing_if = "Option::is_none")]
    pub witness_script: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "bitcoin::amount::serde::as_btc::opt"
    )]
    pub amount: Option<Amount>,
}

/// Result of the `signrawtransactionwith*` family.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedTransaction {
    pub hex: String,
    pub complete: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// One entry of `testmempoolaccept`.
#[derive(Debug, Clone, Deserialize)]
pub struct MempoolAcceptance {
    pub txid: Txid,
    #[serde(default)]
    pub allowed: bool,
    #[serde(rename = "reject-reason")]
    pub reject_reason: Option<String>,
}
