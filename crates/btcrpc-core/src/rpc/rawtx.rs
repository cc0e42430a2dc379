use async_trait::async_trait;
use bitcoin::{Amount, Txid};
use serde_json::json;

use crate::error::CoreError;

use super::parsing::{opt_param, parse_txid};
use super::types::{AddressValidation, MempoolAcceptance, SignedTransaction, TxInputRef};
use super::{call_typed, BitcoinRpc};

/// Raw transaction construction, inspection, and broadcast.
#[async_trait]
pub trait RawTxRpc: BitcoinRpc {
    /// Create an unsigned, unfunded transaction. Each output is an
    /// `(address, amount)` pair and is sent as a single-key object.
    async fn create_raw_transaction(
        &self,
        inputs: &[TxInputRef],
        outputs: &[(String, Amount)],
    ) -> Result<String, CoreError> {
        let outputs: Vec<serde_json::Value> = outputs
            .iter()
            .map(|(address, amount)| {
                let mut entry = serde_json::Map::with_capacity(1);
                entry.insert(address.clone(), json!(amount.to_btc()));
                serde_json::Value::Object(entry)
            })
            .collect();
        let params = vec![serde_json::to_value(inputs)?, json!(outputs)];
        call_typed(self, "createrawtransaction", params).await
    }

    /// Verbose `getrawtransaction` object.
    async fn get_raw_transaction(&self, txid: &Txid) -> Result<serde_json::Value, CoreError> {
        self.call("getrawtransaction", vec![json!(txid), json!(true)])
            .await
    }

    async fn decode_raw_transaction(&self, hex: &str) -> Result<serde_json::Value, CoreError> {
        self.call("decoderawtransaction", vec![json!(hex)]).await
    }

    /// Submit a signed transaction to the node and network.
    async fn send_raw_transaction(&self, hex: &str) -> Result<Txid, CoreError> {
        let raw = self.call("sendrawtransaction", vec![json!(hex)]).await?;
        parse_txid("sendrawtransaction", &raw)
    }

    /// Sign with the given WIF keys only, ignoring the wallet.
    async fn sign_raw_transaction_with_key(
        &self,
        hex: &str,
        private_keys: &[String],
    ) -> Result<SignedTransaction, CoreError> {
        call_typed(
            self,
            "signrawtransactionwithkey",
            vec![json!(hex), json!(private_keys)],
        )
        .await
    }

    /// Check mempool acceptance without broadcasting. `max_fee_rate` is in
    /// BTC/kvB; `None` keeps the node default.
    async fn test_mempool_accept(
        &self,
        raw_txs: &[String],
        max_fee_rate: Option<f64>,
    ) -> Result<Vec<MempoolAcceptance>, CoreError> {
        let params = vec![json!(raw_txs), opt_param(max_fee_rate)?];
        call_typed(self, "testmempoolaccept", params).await
    }

    async fn validate_address(&self, address: &str) -> Result<AddressValidation, CoreError> {
        call_typed(self, "validateaddress", vec![json!(address)]).await
    }
}

#[async_trait]
impl<T: BitcoinRpc + ?Sized> RawTxRpc for T {}
