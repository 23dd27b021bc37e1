//! Transport-level errors shared by the HTTP and JSON-RPC adapters

use thiserror::Error;
use vault_types::{QuoteError, WalletError};

#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Endpoint returned HTTP {status}: {message}")]
	HttpFailure { status: u16, message: String },

	#[error("Invalid endpoint '{endpoint}': {reason}")]
	InvalidEndpoint { endpoint: String, reason: String },

	#[error("JSON-RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },
}

pub type AdapterResult<T> = Result<T, AdapterError>;

impl AdapterError {
	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}

	/// Nothing is listening at the endpoint
	pub fn is_unreachable(&self) -> bool {
		match self {
			AdapterError::HttpError(e) => e.is_connect(),
			AdapterError::InvalidEndpoint { .. } => true,
			_ => false,
		}
	}
}

impl From<AdapterError> for WalletError {
	fn from(error: AdapterError) -> Self {
		if error.is_unreachable() {
			return WalletError::NoProviderFound;
		}
		match error {
			AdapterError::Rpc { code, message } => WalletError::from_rpc(code, message),
			AdapterError::InvalidResponse { reason } => WalletError::InvalidResponse { reason },
			other => WalletError::Transport(other.to_string()),
		}
	}
}

impl From<AdapterError> for QuoteError {
	fn from(error: AdapterError) -> Self {
		match error {
			AdapterError::InvalidResponse { reason } => QuoteError::RouteUnavailable { reason },
			other => QuoteError::ServiceUnreachable {
				reason: other.to_string(),
			},
		}
	}
}
