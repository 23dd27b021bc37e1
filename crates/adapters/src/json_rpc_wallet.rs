//! Wallet provider over an EIP-1193 style JSON-RPC endpoint
//!
//! Talks to a wallet bridge (or a node with unlocked accounts) using the
//! standard `eth_*` methods. Account and chain changes are detected by polling,
//! and the poller only runs while someone holds a subscription.

use alloy_primitives::{Address, Bytes, TxHash, U256, U64};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use vault_types::{
	constants::{DEFAULT_EVENT_POLL_MS, DEFAULT_RECEIPT_POLL_MS, PROVIDER_EVENT_CAPACITY},
	CallRequest, ProviderEvent, TransactionReceipt, TransactionRequest, WalletError,
	WalletProvider, WalletResult,
};

use crate::{global_client_cache, AdapterResult, ClientCache, JsonRpcClient};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
	transaction_hash: TxHash,
	#[serde(default)]
	block_number: Option<U64>,
	#[serde(default)]
	status: Option<U64>,
}

impl From<RpcReceipt> for TransactionReceipt {
	fn from(receipt: RpcReceipt) -> Self {
		Self {
			transaction_hash: receipt.transaction_hash,
			block_number: receipt.block_number.map(|n| n.to::<u64>()),
			// Pre-byzantium receipts carry no status; treat them as success
			success: receipt.status.map(|s| s == U64::from(1)).unwrap_or(true),
		}
	}
}

#[derive(Debug)]
pub struct JsonRpcWallet {
	rpc: JsonRpcClient,
	receipt_poll: Duration,
	event_poll: Duration,
	events: broadcast::Sender<ProviderEvent>,
	poller: Mutex<Option<JoinHandle<()>>>,
}

impl JsonRpcWallet {
	/// Wallet requests wait on the user, so no request timeout is applied
	pub fn new(endpoint: &str) -> AdapterResult<Self> {
		Self::with_cache(endpoint, global_client_cache())
	}

	pub fn with_cache(endpoint: &str, cache: &ClientCache) -> AdapterResult<Self> {
		let (events, _) = broadcast::channel(PROVIDER_EVENT_CAPACITY);
		Ok(Self {
			rpc: JsonRpcClient::new(endpoint, None, cache)?,
			receipt_poll: Duration::from_millis(DEFAULT_RECEIPT_POLL_MS),
			event_poll: Duration::from_millis(DEFAULT_EVENT_POLL_MS),
			events,
			poller: Mutex::new(None),
		})
	}

	pub fn with_poll_intervals(mut self, receipt_poll: Duration, event_poll: Duration) -> Self {
		self.receipt_poll = receipt_poll;
		self.event_poll = event_poll;
		self
	}

	fn ensure_poller(&self) {
		let Ok(mut poller) = self.poller.lock() else {
			warn!("Provider event poller lock poisoned; change events disabled");
			return;
		};
		if poller.as_ref().is_some_and(|handle| !handle.is_finished()) {
			return;
		}

		let Ok(runtime) = tokio::runtime::Handle::try_current() else {
			warn!("No async runtime available; provider change events disabled");
			return;
		};

		debug!("Starting provider event poller for {}", self.rpc.endpoint());
		*poller = Some(runtime.spawn(poll_provider_events(
			self.rpc.clone(),
			self.events.clone(),
			self.event_poll,
		)));
	}
}

impl Drop for JsonRpcWallet {
	fn drop(&mut self) {
		if let Ok(mut poller) = self.poller.lock() {
			if let Some(handle) = poller.take() {
				handle.abort();
			}
		}
	}
}

/// Emit an event whenever the accounts or chain differ from the previous poll.
/// Exits once the last receiver is gone.
async fn poll_provider_events(
	rpc: JsonRpcClient,
	events: broadcast::Sender<ProviderEvent>,
	interval: Duration,
) {
	let mut last_accounts: Option<Vec<Address>> = None;
	let mut last_chain: Option<u64> = None;

	loop {
		if events.receiver_count() == 0 {
			debug!("No provider event subscribers left; stopping poller");
			return;
		}

		match rpc.request::<_, Vec<Address>>("eth_accounts", json!([])).await {
			Ok(accounts) => {
				if last_accounts.as_ref().is_some_and(|last| *last != accounts) {
					info!("Wallet accounts changed");
					let _ = events.send(ProviderEvent::AccountsChanged(accounts.clone()));
				}
				last_accounts = Some(accounts);
			},
			Err(e) => debug!("eth_accounts poll failed: {}", e),
		}

		match rpc.request::<_, U64>("eth_chainId", json!([])).await {
			Ok(chain) => {
				let chain = chain.to::<u64>();
				if last_chain.is_some_and(|last| last != chain) {
					info!("Wallet chain changed to {}", chain);
					let _ = events.send(ProviderEvent::ChainChanged(chain));
				}
				last_chain = Some(chain);
			},
			Err(e) => debug!("eth_chainId poll failed: {}", e),
		}

		tokio::time::sleep(interval).await;
	}
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
	async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
		let accounts: Vec<Address> = self.rpc.request("eth_requestAccounts", json!([])).await?;
		if accounts.is_empty() {
			return Err(WalletError::NoAccounts);
		}
		Ok(accounts)
	}

	async fn chain_id(&self) -> WalletResult<u64> {
		let chain: U64 = self.rpc.request("eth_chainId", json!([])).await?;
		Ok(chain.to::<u64>())
	}

	async fn get_balance(&self, account: Address) -> WalletResult<U256> {
		Ok(self
			.rpc
			.request("eth_getBalance", json!([account, "latest"]))
			.await?)
	}

	async fn call(&self, request: &CallRequest) -> WalletResult<Bytes> {
		Ok(self.rpc.request("eth_call", json!([request, "latest"])).await?)
	}

	async fn send_transaction(&self, request: &TransactionRequest) -> WalletResult<TxHash> {
		debug!("Sending transaction from {} to {}", request.from, request.to);
		Ok(self
			.rpc
			.request("eth_sendTransaction", json!([request]))
			.await?)
	}

	async fn wait_for_receipt(&self, hash: TxHash) -> WalletResult<TransactionReceipt> {
		loop {
			let receipt: Option<RpcReceipt> = self
				.rpc
				.request("eth_getTransactionReceipt", json!([hash]))
				.await?;
			if let Some(receipt) = receipt {
				let receipt = TransactionReceipt::from(receipt);
				debug!("Transaction {} mined (success: {})", hash, receipt.success);
				return Ok(receipt);
			}
			tokio::time::sleep(self.receipt_poll).await;
		}
	}

	fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
		let receiver = self.events.subscribe();
		self.ensure_poller();
		receiver
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_receipt_status_mapping() {
		let mined: RpcReceipt = serde_json::from_value(json!({
			"transactionHash": format!("0x{}", "11".repeat(32)),
			"blockNumber": "0x10",
			"status": "0x1"
		}))
		.unwrap();
		let receipt = TransactionReceipt::from(mined);
		assert!(receipt.success);
		assert_eq!(receipt.block_number, Some(16));

		let reverted: RpcReceipt = serde_json::from_value(json!({
			"transactionHash": format!("0x{}", "11".repeat(32)),
			"blockNumber": "0x10",
			"status": "0x0"
		}))
		.unwrap();
		assert!(!TransactionReceipt::from(reverted).success);
	}

	#[test]
	fn test_invalid_endpoint_rejected() {
		assert!(JsonRpcWallet::new("not a url").is_err());
	}
}
