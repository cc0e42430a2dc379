use bitcoin::{Amount, Txid};
use serde::de::DeserializeOwned;

use crate::error::CoreError;

pub(super) fn decode_result<T: DeserializeOwned>(
    method: &str,
    raw: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(raw).map_err(|e| CoreError::InvalidResult {
        method: method.to_owned(),
        message: e.to_string(),
    })
}

pub(super) fn parse_txid(method: &str, raw: &serde_json::Value) -> Result<Txid, CoreError> {
    let value = raw.as_str().ok_or_else(|| CoreError::InvalidResult {
        method: method.to_owned(),
        message: format!("expected txid string, got: {raw}"),
    })?;
    value.parse().map_err(|e| CoreError::InvalidResult {
        method: method.to_owned(),
        message: format!("invalid txid `{value}`: {e}"),
    })
}

/// Parse a BTC amount from a JSON value.
///
/// Number values are parsed via `Amount::from_float_in` to support scientific
/// notation, while string values are parsed via `Amount::from_str_in`.
pub(super) fn parse_btc_amount(
    method: &str,
    value: &serde_json::Value,
) -> Result<Amount, CoreError> {
    let invalid = |message: String| CoreError::InvalidResult {
        method: method.to_owned(),
        message,
    };
    match value {
        serde_json::Value::Number(n) => {
            let parsed = n
                .as_f64()
                .ok_or_else(|| invalid(format!("invalid BTC amount `{value}`")))?;
            Amount::from_float_in(parsed, bitcoin::Denomination::Bitcoin)
                .map_err(|e| invalid(format!("invalid BTC amount `{value}`: {e}")))
        }
        serde_json::Value::String(s) => Amount::from_str_in(s, bitcoin::Denomination::Bitcoin)
            .map_err(|e| invalid(format!("invalid BTC amount `{s}`: {e}"))),
        _ => Err(invalid(format!("expected numeric BTC amount, got: {value}"))),
    }
}

/// Bitcoin Core reads JSON `null` in an optional position as "use the
/// default", which lets wrappers keep a fixed arity.
pub(super) fn opt_param<T: serde::Serialize>(
    value: Option<T>,
) -> Result<serde_json::Value, CoreError> {
    match value {
        Some(v) => Ok(serde_json::to_value(v)?),
        None => Ok(serde_json::Value::Null),
    }
}
