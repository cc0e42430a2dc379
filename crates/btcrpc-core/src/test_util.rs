//! Shared test helpers for `btcrpc-core` unit tests.

use bitcoin::hashes::Hash;
use bitcoin::Txid;

/// Create a deterministic `Txid` from a single distinguishing byte.
pub fn txid_from_byte(b: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Txid::from_byte_array(bytes)
}
