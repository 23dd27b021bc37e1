//! Spendable balance tracking for the selected asset

use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

use alloy_primitives::{Address, U256};
use tokio::sync::watch;
use tracing::{debug, warn};

use vault_types::{
	contracts::{balance_of_calldata, decode_balance_of},
	AssetSymbol, Balance, CallRequest, WalletError, WalletProvider, WalletResult,
};

/// What the tracker currently knows about the balance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BalanceState {
	#[default]
	Unknown,
	Loading {
		asset: AssetSymbol,
	},
	Ready(Balance),
	Failed {
		asset: AssetSymbol,
		error: String,
	},
}

impl BalanceState {
	pub fn balance(&self) -> Option<&Balance> {
		match self {
			BalanceState::Ready(balance) => Some(balance),
			_ => None,
		}
	}

	/// Amount usable for validation; zero until a fetch has succeeded
	pub fn spendable(&self) -> U256 {
		self.balance().map(|b| b.amount).unwrap_or(U256::ZERO)
	}

	/// Like [`spendable`](Self::spendable), but zero for any other asset
	pub fn spendable_for(&self, asset: AssetSymbol) -> U256 {
		self.balance()
			.filter(|b| b.asset == asset)
			.map(|b| b.amount)
			.unwrap_or(U256::ZERO)
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, BalanceState::Loading { .. })
	}
}

/// Fetches balances and keeps only the answer to the most recent request
#[derive(Debug, Clone)]
pub struct BalanceTracker {
	provider: Arc<dyn WalletProvider>,
	wrapped_asset: Address,
	state: Arc<watch::Sender<BalanceState>>,
	generation: Arc<AtomicU64>,
}

impl BalanceTracker {
	pub fn new(provider: Arc<dyn WalletProvider>, wrapped_asset: Address) -> Self {
		let (state, _) = watch::channel(BalanceState::Unknown);
		Self {
			provider,
			wrapped_asset,
			state: Arc::new(state),
			generation: Arc::new(AtomicU64::new(0)),
		}
	}

	pub fn state(&self) -> BalanceState {
		self.state.borrow().clone()
	}

	pub fn changes(&self) -> watch::Receiver<BalanceState> {
		self.state.subscribe()
	}

	pub fn spendable(&self) -> U256 {
		self.state.borrow().spendable()
	}

	pub fn spendable_for(&self, asset: AssetSymbol) -> U256 {
		self.state.borrow().spendable_for(asset)
	}

	/// Query the provider without touching tracked state
	///
	/// Native balances come from the chain, wrapped balances from
	/// `balanceOf` on the wrapped-asset contract.
	pub async fn get_balance(&self, account: Address, asset: AssetSymbol) -> WalletResult<Balance> {
		let amount = if asset.is_native() {
			self.provider.get_balance(account).await?
		} else {
			let output = self
				.provider
				.call(&CallRequest::new(
					self.wrapped_asset,
					balance_of_calldata(account),
				))
				.await?;
			decode_balance_of(&output).map_err(|e| WalletError::InvalidResponse {
				reason: format!("balanceOf returned undecodable data: {}", e),
			})?
		};
		Ok(Balance::new(asset, amount))
	}

	/// Drop the previous balance immediately, then fetch a fresh one
	///
	/// If another refresh or an invalidation happens before this fetch
	/// resolves, its result is discarded. The generation only changes while
	/// the state channel is locked, so a check and its publish cannot be
	/// split by a newer request.
	pub async fn refresh(&self, account: Address, asset: AssetSymbol) -> BalanceState {
		let mut generation = 0;
		self.state.send_modify(|state| {
			generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
			*state = BalanceState::Loading { asset };
		});
		debug!("Fetching {} balance for {}", asset, account);

		let next = match self.get_balance(account, asset).await {
			Ok(balance) => {
				debug!("{} balance: {}", asset, balance.display_amount());
				BalanceState::Ready(balance)
			},
			Err(e) => {
				warn!("Failed to fetch {} balance: {}", asset, e);
				BalanceState::Failed {
					asset,
					error: e.to_string(),
				}
			},
		};

		let published = self.state.send_if_modified(|state| {
			if self.generation.load(Ordering::Acquire) != generation {
				return false;
			}
			*state = next.clone();
			true
		});
		if !published {
			debug!("Discarding stale {} balance", asset);
			return self.state();
		}
		next
	}

	/// Forget the current balance and ignore any fetch still in flight
	pub fn invalidate(&self) {
		self.state.send_modify(|state| {
			self.generation.fetch_add(1, Ordering::AcqRel);
			*state = BalanceState::Unknown;
		});
	}
}
