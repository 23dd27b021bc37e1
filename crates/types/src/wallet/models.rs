//! Request and response shapes exchanged with a wallet provider

use alloy_primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Read-only contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
	pub to: Address,
	pub data: Bytes,
}

impl CallRequest {
	pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
		Self {
			to,
			data: data.into(),
		}
	}
}

/// State-changing transaction for the wallet to sign and broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
	pub from: Address,
	pub to: Address,
	pub value: U256,
	pub data: Bytes,
}

impl TransactionRequest {
	pub fn new(from: Address, to: Address, data: impl Into<Bytes>) -> Self {
		Self {
			from,
			to,
			value: U256::ZERO,
			data: data.into(),
		}
	}

	pub fn with_value(mut self, value: U256) -> Self {
		self.value = value;
		self
	}
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	pub transaction_hash: TxHash,
	pub block_number: Option<u64>,
	/// `false` when the transaction reverted
	pub success: bool,
}

/// Change notifications emitted by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
	AccountsChanged(Vec<Address>),
	ChainChanged(u64),
}
