//! Wallet session state

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems establishing or keeping a usable wallet connection
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionError {
	#[error("No wallet provider found. Please install a browser wallet.")]
	NoProviderFound,

	#[error("Wallet connection was rejected. Please approve the connection request.")]
	UserRejected,

	#[error("Please connect to the {network_name} network (expected chain {expected}, got {actual}).")]
	WrongNetwork {
		expected: u64,
		actual: u64,
		network_name: String,
	},

	#[error("Failed to connect wallet: {0}")]
	Provider(String),
}

impl ConnectionError {
	pub fn is_wrong_network(&self) -> bool {
		matches!(self, ConnectionError::WrongNetwork { .. })
	}
}

/// Snapshot of the wallet connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Active account, `None` until the wallet grants access
	pub account: Option<Address>,
	/// Chain the wallet is currently on (0 when unknown)
	pub chain_id: u64,
	/// Blocking problem to show the user, if any
	pub connection_error: Option<ConnectionError>,
}

impl Session {
	pub fn connected(account: Address, chain_id: u64) -> Self {
		Self {
			account: Some(account),
			chain_id,
			connection_error: None,
		}
	}

	pub fn failed(error: ConnectionError) -> Self {
		Self {
			account: None,
			chain_id: 0,
			connection_error: Some(error),
		}
	}

	/// A session can submit deposits only with an account and no blocking error
	pub fn is_ready(&self) -> bool {
		self.account.is_some() && self.connection_error.is_none()
	}

	pub fn is_wrong_network(&self) -> bool {
		self.connection_error
			.as_ref()
			.map(ConnectionError::is_wrong_network)
			.unwrap_or(false)
	}
}
