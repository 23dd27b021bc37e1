//! Capability interface of a wallet provider

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::broadcast;

use super::{
	CallRequest, ProviderEvent, TransactionReceipt, TransactionRequest, WalletResult,
};

/// Everything the deposit engine needs from a wallet
///
/// Implementations wrap an injected browser wallet, a local wallet bridge or a
/// scripted fake in tests.
#[async_trait]
pub trait WalletProvider: Send + Sync + Debug {
	/// Ask the user for account access; the first account is the active one
	async fn request_accounts(&self) -> WalletResult<Vec<Address>>;

	/// Chain the wallet is currently connected to
	async fn chain_id(&self) -> WalletResult<u64>;

	/// Native balance of `account` in base units
	async fn get_balance(&self, account: Address) -> WalletResult<U256>;

	/// Execute a read-only contract call
	async fn call(&self, request: &CallRequest) -> WalletResult<Bytes>;

	/// Hand a transaction to the wallet; returns once the wallet accepted it
	async fn send_transaction(&self, request: &TransactionRequest) -> WalletResult<TxHash>;

	/// Wait, without a timeout, until the transaction is mined
	async fn wait_for_receipt(&self, hash: TxHash) -> WalletResult<TransactionReceipt>;

	/// Attach a listener for account and chain changes
	///
	/// Dropping the receiver detaches it.
	fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}
