use async_trait::async_trait;
use bitcoin::{Amount, Txid};
use serde_json::json;

use crate::error::CoreError;

use super::parsing::{opt_param, parse_btc_amount, parse_txid};
use super::types::{
    BumpFeeOptions, BumpFeeResult, FundOptions, FundedTransaction, PrevTx, SendToAddressOptions,
    SignedTransaction, Utxo,
};
use super::{call_typed, BitcoinRpc};

/// Wallet RPCs. Calls go to whichever wallet the client endpoint addresses
/// (see [`ClientConfig::with_wallet`](crate::config::ClientConfig::with_wallet)).
#[async_trait]
pub trait WalletRpc: BitcoinRpc {
    async fn get_balance(&self) -> Result<Amount, CoreError> {
        let raw = self.call("getbalance", Vec::new()).await?;
        parse_btc_amount("getbalance", &raw)
    }

    /// Raw `getbalances` object (trusted/untrusted/immature per wallet kind).
    async fn get_balances(&self) -> Result<serde_json::Value, CoreError> {
        self.call("getbalances", Vec::new()).await
    }

    /// Detailed information about an in-wallet transaction.
    async fn get_transaction(&self, txid: &Txid) -> Result<serde_json::Value, CoreError> {
        self.call("gettransaction", vec![json!(txid)]).await
    }

    /// Unspent outputs with between `min_conf` and `max_conf` confirmations,
    /// optionally restricted to `addresses`.
    async fn list_unspent(
        &self,
        min_conf: u32,
        max_conf: u32,
        addresses: &[String],
        include_unsafe: bool,
    ) -> Result<Vec<Utxo>, CoreError> {
        let params = vec![
            json!(min_conf),
            json!(max_conf),
            json!(addresses),
            json!(include_unsafe),
        ];
        call_typed(self, "listunspent", params).await
    }

    /// Up to `count` most recent transactions, skipping the first `skip`.
    async fn list_transactions(
        &self,
        count: u32,
        skip: u32,
    ) -> Result<Vec<serde_json::Value>, CoreError> {
        call_typed(
            self,
            "listtransactions",
            vec![json!("*"), json!(count), json!(skip)],
        )
        .await
    }

    /// Mark an in-wallet transaction and its descendants as abandoned so
    /// their inputs can be respent.
    async fn abandon_transaction(&self, txid: &Txid) -> Result<(), CoreError> {
        self.call("abandontransaction", vec![json!(txid)]).await?;
        Ok(())
    }

    /// Watch an address or hex script without being able to spend from it.
    async fn import_address(&self, address: &str, label: &str) -> Result<(), CoreError> {
        self.call("importaddress", vec![json!(address), json!(label)])
            .await?;
        Ok(())
    }

    async fn import_priv_key(
        &self,
        private_key: &str,
        label: &str,
        rescan: bool,
    ) -> Result<(), CoreError> {
        self.call(
            "importprivkey",
            vec![json!(private_key), json!(label), json!(rescan)],
        )
        .await?;
        Ok(())
    }

    async fn import_pub_key(&self, pubkey: &str, label: &str, rescan: bool) -> Result<(), CoreError> {
        self.call(
            "importpubkey",
            vec![json!(pubkey), json!(label), json!(rescan)],
        )
        .await?;
        Ok(())
    }

    async fn get_new_address(&self, label: &str) -> Result<String, CoreError> {
        call_typed(self, "getnewaddress", vec![json!(label)]).await
    }

    async fn dump_priv_key(&self, address: &str) -> Result<String, CoreError> {
        call_typed(self, "dumpprivkey", vec![json!(address)]).await
    }

    /// Raw `getaddressinfo` object.
    async fn get_address_info(&self, address: &str) -> Result<serde_json::Value, CoreError> {
        self.call("getaddressinfo", vec![json!(address)]).await
    }

    async fn send_to_address(
        &self,
        address: &str,
        amount: Amount,
        options: &SendToAddressOptions,
    ) -> Result<Txid, CoreError> {
        let params = vec![
            json!(address),
            json!(amount.to_btc()),
            opt_param(options.comment.as_deref())?,
            opt_param(options.comment_to.as_deref())?,
            opt_param(options.subtract_fee_from_amount)?,
            opt_param(options.replaceable)?,
            opt_param(options.conf_target)?,
            opt_param(options.estimate_mode)?,
        ];
        let raw = self.call("sendtoaddress", params).await?;
        parse_txid("sendtoaddress", &raw)
    }

    /// Replace an unconfirmed wallet transaction with a higher-fee version.
    async fn bump_fee(
        &self,
        txid: &Txid,
        options: &BumpFeeOptions,
    ) -> Result<BumpFeeResult, CoreError> {
        let params = vec![json!(txid), serde_json::to_value(options)?];
        call_typed(self, "bumpfee", params).await
    }

    /// Add wallet inputs (and change) until the transaction covers its
    /// outputs plus fee.
    async fn fund_raw_transaction(
        &self,
        hex: &str,
        options: &FundOptions,
    ) -> Result<FundedTransaction, CoreError> {
        let params = vec![json!(hex), serde_json::to_value(options)?];
        call_typed(self, "fundrawtransaction", params).await
    }

    /// Sign with wallet keys. `prev_txs` describes spent outputs the node
    /// does not know about and may be empty.
    async fn sign_raw_transaction_with_wallet(
        &self,
        hex: &str,
        prev_txs: &[PrevTx],
    ) -> Result<SignedTransaction, CoreError> {
        let mut params = vec![json!(hex)];
        if !prev_txs.is_empty() {
            params.push(serde_json::to_value(prev_txs)?);
        }
        call_typed(self, "signrawtransactionwithwallet", params).await
    }
}

#[async_trait]
impl<T: BitcoinRpc + ?Sized> WalletRpc for T {}
