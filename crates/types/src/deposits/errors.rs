//! Error types for deposit submission

use alloy_primitives::U256;
use thiserror::Error;

use super::WorkflowStatus;
use crate::models::{AmountError, AssetSymbol};
use crate::session::ConnectionError;

/// Problems with the user's input, caught before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepositValidationError {
	#[error("Invalid amount: {0}")]
	Amount(#[from] AmountError),

	#[error("Amount must be greater than zero")]
	ZeroAmount,

	#[error("Amount {requested} exceeds the available balance of {available}")]
	ExceedsBalance { requested: U256, available: U256 },

	#[error("Native currency flag ({is_native_currency}) does not match asset {asset}")]
	NativeFlagMismatch {
		asset: AssetSymbol,
		is_native_currency: bool,
	},
}

/// Why `submit` refused to start a workflow; the status is left untouched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
	#[error(transparent)]
	Validation(#[from] DepositValidationError),

	#[error("Wallet is not connected")]
	NotConnected,

	#[error(transparent)]
	Connection(#[from] ConnectionError),

	#[error("A deposit is already in progress ({0})")]
	AlreadyInFlight(WorkflowStatus),
}
