use async_trait::async_trait;
use serde_json::json;

use crate::error::CoreError;

use super::parsing::opt_param;
use super::types::{ChainInfo, EstimateMode, FeeEstimate};
use super::{call_typed, BitcoinRpc};

/// Blockchain and mempool queries.
#[async_trait]
pub trait ChainRpc: BitcoinRpc {
    async fn get_blockchain_info(&self) -> Result<ChainInfo, CoreError> {
        call_typed(self, "getblockchaininfo", Vec::new()).await
    }

    async fn get_block_count(&self) -> Result<u64, CoreError> {
        call_typed(self, "getblockcount", Vec::new()).await
    }

    /// Raw `getmempoolinfo` object.
    async fn get_mempool_info(&self) -> Result<serde_json::Value, CoreError> {
        self.call("getmempoolinfo", Vec::new()).await
    }

    /// Estimate the fee rate needed to confirm within `conf_target` blocks.
    async fn estimate_smart_fee(
        &self,
        conf_target: u16,
        mode: Option<EstimateMode>,
    ) -> Result<FeeEstimate, CoreError> {
        let params = vec![json!(conf_target), opt_param(mode)?];
        call_typed(self, "estimatesmartfee", params).await
    }
}

#[async_trait]
impl<T: BitcoinRpc + ?Sized> ChainRpc for T {}
