//! Blockchain network models

use serde::{Deserialize, Serialize};

use crate::constants::{AVALANCHE_C_CHAIN_ID, AVALANCHE_C_CHAIN_NAME};
use crate::session::ConnectionError;

/// The single network the vault is deployed on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Network {
	/// Chain ID (43114 for Avalanche C-Chain)
	pub chain_id: u64,
	/// Human-readable name used in user-facing errors
	pub name: String,
}

impl Network {
	pub fn new(chain_id: u64, name: impl Into<String>) -> Self {
		Self {
			chain_id,
			name: name.into(),
		}
	}

	pub fn avalanche() -> Self {
		Self::new(AVALANCHE_C_CHAIN_ID, AVALANCHE_C_CHAIN_NAME)
	}

	pub fn is_supported(&self, chain_id: u64) -> bool {
		self.chain_id == chain_id
	}

	/// Surface a `WrongNetwork` condition for any chain other than this one
	pub fn check(&self, chain_id: u64) -> Result<(), ConnectionError> {
		if self.is_supported(chain_id) {
			Ok(())
		} else {
			Err(ConnectionError::WrongNetwork {
				expected: self.chain_id,
				actual: chain_id,
				network_name: self.name.clone(),
			})
		}
	}
}

impl Default for Network {
	fn default() -> Self {
		Self::avalanche()
	}
}
