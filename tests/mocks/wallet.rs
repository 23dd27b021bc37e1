//! Scripted wallet provider
//!
//! Records every request, answers from configurable balances and lets tests
//! reject, revert or hold individual transactions.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use vault_types::{
	constants::AVALANCHE_C_CHAIN_ID, Address, Bytes, CallRequest, ProviderEvent,
	TransactionReceipt, TransactionRequest, TxHash, WalletError, WalletProvider, WalletResult,
	U256,
};

use super::fixtures::ACCOUNT;

#[derive(Debug)]
pub struct MockWallet {
	accounts: Mutex<WalletResult<Vec<Address>>>,
	chain_id: AtomicU64,
	native_balance: Mutex<U256>,
	wrapped_balance: Mutex<U256>,
	native_delay_ms: AtomicU64,
	wrapped_delay_ms: AtomicU64,
	sent: Mutex<Vec<TransactionRequest>>,
	send_failures: Mutex<HashMap<usize, WalletError>>,
	reverts: Mutex<HashSet<usize>>,
	hold_receipts: AtomicBool,
	fail_balances: AtomicBool,
	call_tracker: AtomicUsize,
	events: broadcast::Sender<ProviderEvent>,
}

impl Default for MockWallet {
	fn default() -> Self {
		Self::new()
	}
}

impl MockWallet {
	/// One account on the supported chain with empty balances
	pub fn new() -> Self {
		let (events, _) = broadcast::channel(16);
		Self {
			accounts: Mutex::new(Ok(vec![ACCOUNT])),
			chain_id: AtomicU64::new(AVALANCHE_C_CHAIN_ID),
			native_balance: Mutex::new(U256::ZERO),
			wrapped_balance: Mutex::new(U256::ZERO),
			native_delay_ms: AtomicU64::new(0),
			wrapped_delay_ms: AtomicU64::new(0),
			sent: Mutex::new(Vec::new()),
			send_failures: Mutex::new(HashMap::new()),
			reverts: Mutex::new(HashSet::new()),
			hold_receipts: AtomicBool::new(false),
			fail_balances: AtomicBool::new(false),
			call_tracker: AtomicUsize::new(0),
			events,
		}
	}

	pub fn with_native_balance(self, amount: U256) -> Self {
		*self.native_balance.lock().unwrap() = amount;
		self
	}

	pub fn with_wrapped_balance(self, amount: U256) -> Self {
		*self.wrapped_balance.lock().unwrap() = amount;
		self
	}

	pub fn with_chain_id(self, chain_id: u64) -> Self {
		self.chain_id.store(chain_id, Ordering::SeqCst);
		self
	}

	pub fn with_accounts_result(self, result: WalletResult<Vec<Address>>) -> Self {
		*self.accounts.lock().unwrap() = result;
		self
	}

	/// Fail the `index`-th `send_transaction` call (0-based)
	pub fn failing_send(self, index: usize, error: WalletError) -> Self {
		self.send_failures.lock().unwrap().insert(index, error);
		self
	}

	/// Mine the `index`-th transaction as reverted
	pub fn reverting_send(self, index: usize) -> Self {
		self.reverts.lock().unwrap().insert(index);
		self
	}

	pub fn set_native_delay(&self, delay: Duration) {
		self.native_delay_ms
			.store(delay.as_millis() as u64, Ordering::SeqCst);
	}

	pub fn set_wrapped_delay(&self, delay: Duration) {
		self.wrapped_delay_ms
			.store(delay.as_millis() as u64, Ordering::SeqCst);
	}

	pub fn set_native_balance(&self, amount: U256) {
		*self.native_balance.lock().unwrap() = amount;
	}

	/// Keep receipts pending until `release_receipts`
	pub fn hold_receipts(&self) {
		self.hold_receipts.store(true, Ordering::SeqCst);
	}

	pub fn release_receipts(&self) {
		self.hold_receipts.store(false, Ordering::SeqCst);
	}

	pub fn fail_balances(&self, fail: bool) {
		self.fail_balances.store(fail, Ordering::SeqCst);
	}

	pub fn sent(&self) -> Vec<TransactionRequest> {
		self.sent.lock().unwrap().clone()
	}

	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::SeqCst)
	}

	/// Switch chains and notify subscribers
	pub fn switch_chain(&self, chain_id: u64) {
		self.chain_id.store(chain_id, Ordering::SeqCst);
		let _ = self.events.send(ProviderEvent::ChainChanged(chain_id));
	}

	pub fn switch_account(&self, account: Address) {
		*self.accounts.lock().unwrap() = Ok(vec![account]);
		let _ = self
			.events
			.send(ProviderEvent::AccountsChanged(vec![account]));
	}

	/// Live receivers of provider events
	pub fn listener_count(&self) -> usize {
		self.events.receiver_count()
	}

	pub fn hash_for(index: usize) -> TxHash {
		TxHash::with_last_byte(index as u8 + 1)
	}

	fn balance_result(&self, amount: U256) -> WalletResult<U256> {
		if self.fail_balances.load(Ordering::SeqCst) {
			Err(WalletError::Transport("connection reset".to_string()))
		} else {
			Ok(amount)
		}
	}

	async fn delay(&self, millis: &AtomicU64) {
		let ms = millis.load(Ordering::SeqCst);
		if ms > 0 {
			tokio::time::sleep(Duration::from_millis(ms)).await;
		}
	}
}

#[async_trait]
impl WalletProvider for MockWallet {
	async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		self.accounts.lock().unwrap().clone()
	}

	async fn chain_id(&self) -> WalletResult<u64> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		Ok(self.chain_id.load(Ordering::SeqCst))
	}

	async fn get_balance(&self, _account: Address) -> WalletResult<U256> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		// Read before the delay so a later balance change is not observed
		let amount = *self.native_balance.lock().unwrap();
		self.delay(&self.native_delay_ms).await;
		self.balance_result(amount)
	}

	async fn call(&self, _request: &CallRequest) -> WalletResult<Bytes> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		let amount = *self.wrapped_balance.lock().unwrap();
		self.delay(&self.wrapped_delay_ms).await;
		self.balance_result(amount)
			.map(|amount| Bytes::copy_from_slice(&amount.to_be_bytes::<32>()))
	}

	async fn send_transaction(&self, request: &TransactionRequest) -> WalletResult<TxHash> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		let index = {
			let mut sent = self.sent.lock().unwrap();
			sent.push(request.clone());
			sent.len() - 1
		};
		if let Some(error) = self.send_failures.lock().unwrap().get(&index) {
			return Err(error.clone());
		}
		Ok(Self::hash_for(index))
	}

	async fn wait_for_receipt(&self, hash: TxHash) -> WalletResult<TransactionReceipt> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		while self.hold_receipts.load(Ordering::SeqCst) {
			tokio::time::sleep(Duration::from_millis(5)).await;
		}
		let index = hash[31] as usize - 1;
		let success = !self.reverts.lock().unwrap().contains(&index);
		Ok(TransactionReceipt {
			transaction_hash: hash,
			block_number: Some(100 + index as u64),
			success,
		})
	}

	fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
		self.events.subscribe()
	}
}
