//! Error types for path-finding operations

use thiserror::Error;

use crate::models::{AmountError, RouteValidationError};

/// Validation errors for path-finding requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
	#[error("Missing amountIn parameter")]
	MissingAmount,

	#[error("Invalid amountIn: {reason}")]
	InvalidAmount { reason: String },
}

/// What the user should do after a failed path lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRecovery {
	/// Try again right away
	Retry,
	/// Change the amount before trying again
	AdjustAmount,
	/// The service is down; wait before trying again
	Wait,
}

/// Path-finding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
	#[error("No route available: {reason}")]
	RouteUnavailable { reason: String },

	#[error("Routing service unreachable: {reason}")]
	ServiceUnreachable { reason: String },

	#[error("Invalid amount: {reason}")]
	InvalidAmount { reason: String },
}

impl QuoteError {
	pub fn route_unavailable(reason: impl Into<String>) -> Self {
		Self::RouteUnavailable {
			reason: reason.into(),
		}
	}

	pub fn unreachable(reason: impl Into<String>) -> Self {
		Self::ServiceUnreachable {
			reason: reason.into(),
		}
	}

	pub fn recovery(&self) -> QuoteRecovery {
		match self {
			QuoteError::RouteUnavailable { .. } => QuoteRecovery::Retry,
			QuoteError::InvalidAmount { .. } => QuoteRecovery::AdjustAmount,
			QuoteError::ServiceUnreachable { .. } => QuoteRecovery::Wait,
		}
	}
}

impl From<QuoteValidationError> for QuoteError {
	fn from(error: QuoteValidationError) -> Self {
		QuoteError::InvalidAmount {
			reason: error.to_string(),
		}
	}
}

impl From<AmountError> for QuoteError {
	fn from(error: AmountError) -> Self {
		QuoteError::InvalidAmount {
			reason: error.to_string(),
		}
	}
}

impl From<RouteValidationError> for QuoteError {
	fn from(error: RouteValidationError) -> Self {
		QuoteError::RouteUnavailable {
			reason: error.to_string(),
		}
	}
}
