//! Shared domain models used across adapters, services and the API

pub mod amount;
pub mod asset;
pub mod balance;
pub mod network;
pub mod route;
pub mod transaction;

pub use amount::{format_amount, format_fixed, parse_amount, AmountError};
pub use asset::{AssetSymbol, UnknownAssetError};
pub use balance::Balance;
pub use network::Network;
pub use route::{Route, RouteResponse, RouteValidationError};
pub use transaction::{explorer_tx_url, TransactionRecord};
