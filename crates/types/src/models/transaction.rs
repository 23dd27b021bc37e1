//! Records of transactions accepted by the wallet

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

/// A transaction the wallet provider accepted for broadcast
///
/// Created as soon as the wallet returns a hash, before the transaction is mined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
	pub hash: TxHash,
	pub explorer_url: String,
}

impl TransactionRecord {
	pub fn new(hash: TxHash, explorer_base_url: &str) -> Self {
		Self {
			hash,
			explorer_url: explorer_tx_url(explorer_base_url, &hash),
		}
	}
}

/// Build `<explorer>/tx/<hash>`
pub fn explorer_tx_url(explorer_base_url: &str, hash: &TxHash) -> String {
	format!("{}/tx/{}", explorer_base_url.trim_end_matches('/'), hash)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_explorer_url() {
		let hash = TxHash::repeat_byte(0xab);
		let record = TransactionRecord::new(hash, "https://snowtrace.io/");
		assert_eq!(
			record.explorer_url,
			format!("https://snowtrace.io/tx/0x{}", "ab".repeat(32))
		);
	}
}
