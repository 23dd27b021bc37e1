//! Error types for wallet provider operations

use thiserror::Error;

use crate::session::ConnectionError;

/// EIP-1193 code for a request the user declined
pub const USER_REJECTED_CODE: i64 = 4001;

/// Wallet provider operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
	#[error("No wallet provider found")]
	NoProviderFound,

	#[error("User rejected the request")]
	UserRejected,

	#[error("Wallet returned no accounts")]
	NoAccounts,

	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("Transport error: {0}")]
	Transport(String),

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },
}

impl WalletError {
	/// Build an error from a JSON-RPC error object, recognising user rejection
	pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
		if code == USER_REJECTED_CODE {
			WalletError::UserRejected
		} else {
			WalletError::Rpc {
				code,
				message: message.into(),
			}
		}
	}

	pub fn is_user_rejection(&self) -> bool {
		matches!(self, WalletError::UserRejected)
	}
}

impl From<WalletError> for ConnectionError {
	fn from(error: WalletError) -> Self {
		match error {
			WalletError::NoProviderFound => ConnectionError::NoProviderFound,
			WalletError::UserRejected => ConnectionError::UserRejected,
			other => ConnectionError::Provider(other.to_string()),
		}
	}
}
