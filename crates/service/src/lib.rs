//! Vault Service
//!
//! Client-side deposit engine: wallet session, balance tracking, path
//! finding, the deposit workflow and the form model built on top of them.

pub mod balance;
pub mod client;
pub mod form;
pub mod path_finder;
pub mod prices;
pub mod session;
pub mod workflow;

pub use balance::{BalanceState, BalanceTracker};
pub use client::{ClientWatch, DepositClient};
pub use form::DepositForm;
pub use path_finder::PathFinder;
pub use prices::{PriceError, PriceFeed, PriceFeedHandle, PriceSource, StaticPriceSource};
pub use session::{SessionError, SessionSubscription, WalletSession};
pub use workflow::{DepositOutcome, DepositWorkflow, StepError, WorkflowConfig, WorkflowError};
