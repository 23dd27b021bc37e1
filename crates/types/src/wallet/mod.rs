//! Wallet provider models, errors and the provider capability trait

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{WalletError, USER_REJECTED_CODE};
pub use models::{CallRequest, ProviderEvent, TransactionReceipt, TransactionRequest};
pub use traits::WalletProvider;

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
