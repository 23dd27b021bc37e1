//! Vault Types
//!
//! Shared models, error taxonomy and capability traits for the vault deposit
//! workspace. Every other crate speaks in these types.

pub mod constants;
pub mod contracts;
pub mod deposits;
pub mod models;
pub mod quotes;
pub mod session;
pub mod wallet;

// Re-export alloy primitives so downstream crates agree on one version
pub use alloy_primitives::{Address, Bytes, TxHash, U256};

pub use models::{
	explorer_tx_url, format_amount, format_fixed, parse_amount, AmountError, AssetSymbol, Balance,
	Network, Route, RouteResponse, RouteValidationError, TransactionRecord,
};

pub use quotes::{
	FindBestPathBody, PathRequest, QuoteError, QuoteRecovery, QuoteResult, QuoteValidationError,
	RouteService,
};

pub use wallet::{
	CallRequest, ProviderEvent, TransactionReceipt, TransactionRequest, WalletError,
	WalletProvider, WalletResult,
};

pub use deposits::{
	DepositIntent, DepositValidationError, FailureReason, SubmitRejection, WorkflowStatus,
};

pub use session::{ConnectionError, Session};
