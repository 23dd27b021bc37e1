//! Deposit client
//!
//! Wires a wallet provider and a route service into the session, balance
//! tracker, workflow and form model, and keeps them in step as the wallet
//! changes accounts or chains.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use vault_config::{ConfigValidationError, Settings};
use vault_types::{
	AssetSymbol, ConnectionError, RouteService, Session, SubmitRejection, TransactionRecord,
	WalletProvider,
};

use crate::{
	BalanceState, BalanceTracker, DepositForm, DepositOutcome, DepositWorkflow, PathFinder,
	PriceFeed, PriceFeedHandle, SessionError, SessionSubscription, StaticPriceSource,
	WalletSession, WorkflowConfig,
};

pub struct DepositClient {
	session: WalletSession,
	balances: BalanceTracker,
	workflow: Arc<DepositWorkflow>,
	form: Arc<Mutex<DepositForm>>,
	prices: Option<PriceFeedHandle>,
}

impl DepositClient {
	pub fn new(
		provider: Arc<dyn WalletProvider>,
		route_service: Arc<dyn RouteService>,
		config: WorkflowConfig,
	) -> Self {
		let balances = BalanceTracker::new(Arc::clone(&provider), config.wrapped_asset);
		let session = WalletSession::new(Arc::clone(&provider), config.network.clone());
		let workflow = DepositWorkflow::new(provider, PathFinder::new(route_service), config);

		Self {
			session,
			balances,
			workflow: Arc::new(workflow),
			form: Arc::new(Mutex::new(DepositForm::default())),
			prices: None,
		}
	}

	/// Build a client from validated settings
	///
	/// Starts the periodic price refresh, so it must run inside a Tokio runtime.
	pub fn from_settings(
		settings: &Settings,
		provider: Arc<dyn WalletProvider>,
		route_service: Arc<dyn RouteService>,
	) -> Result<Self, ConfigValidationError> {
		settings.validate_client()?;
		let config = WorkflowConfig {
			network: settings.supported_network(),
			vault: settings.contracts.vault,
			wrapped_asset: settings.contracts.wrapped_asset,
			explorer_url: settings.network.explorer_url.clone(),
		};

		let source = StaticPriceSource::new(settings.static_prices()?);
		let prices = PriceFeed::spawn(
			Arc::new(source),
			Duration::from_millis(settings.prices.refresh_interval_ms),
		);
		Ok(Self::new(provider, route_service, config).with_price_feed(prices))
	}

	/// Keep `handle` refreshing for as long as the client lives
	pub fn with_price_feed(mut self, handle: PriceFeedHandle) -> Self {
		self.prices = Some(handle);
		self
	}

	pub fn prices(&self) -> Option<&PriceFeed> {
		self.prices.as_ref().map(|handle| handle.feed())
	}

	/// USD value of the entered amount, once a price is known
	pub fn usd_estimate(&self) -> Option<f64> {
		let prices = self.prices()?;
		lock_form(&self.form).usd_estimate(prices)
	}

	pub fn session(&self) -> &WalletSession {
		&self.session
	}

	pub fn balances(&self) -> &BalanceTracker {
		&self.balances
	}

	pub fn workflow(&self) -> &Arc<DepositWorkflow> {
		&self.workflow
	}

	/// Snapshot of the form model
	pub fn form(&self) -> DepositForm {
		lock_form(&self.form).clone()
	}

	pub fn update_form<R>(&self, f: impl FnOnce(&mut DepositForm) -> R) -> R {
		f(&mut lock_form(&self.form))
	}

	pub async fn connect(&self) -> Result<Session, ConnectionError> {
		let result = self.session.connect().await;
		let session = self.session.current();
		self.update_form(|form| form.set_network_error(network_error(&session)));
		if result.is_ok() {
			self.refresh_balance().await;
		}
		result
	}

	/// Refetch the balance of the selected asset for the active account
	pub async fn refresh_balance(&self) -> BalanceState {
		refresh_balance(&self.session, &self.balances, &self.form).await
	}

	pub async fn select_asset(&self, asset: AssetSymbol) -> BalanceState {
		self.update_form(|form| form.select_asset(asset));
		self.refresh_balance().await
	}

	pub fn set_percentage(&self, percentage: f64) {
		self.update_form(|form| form.set_percentage(percentage));
	}

	pub fn set_amount(&self, amount: &str) {
		self.update_form(|form| form.set_amount(amount));
	}

	pub fn is_submit_disabled(&self) -> bool {
		let status = self.workflow.status();
		lock_form(&self.form).is_submit_disabled(status)
	}

	pub fn status_label(&self) -> String {
		let status = self.workflow.status();
		lock_form(&self.form).status_label(status)
	}

	/// Submit the form's deposit; a completed deposit refreshes the balance
	///
	/// Only a fetched balance of the selected asset counts; anything else is
	/// zero and rejects the amount.
	pub async fn submit(&self) -> Result<DepositOutcome, SubmitRejection> {
		let intent = lock_form(&self.form).intent();
		let balance = self.balances.spendable_for(intent.asset);
		let session = self.session.current();

		let outcome = self.workflow.submit(&intent, balance, &session).await?;
		if matches!(outcome, DepositOutcome::Completed(_)) {
			self.refresh_balance().await;
		}
		Ok(outcome)
	}

	/// Stop tracking the current deposit and ignore pending balance fetches
	pub fn abandon(&self) -> Option<TransactionRecord> {
		self.balances.invalidate();
		self.workflow.abandon()
	}

	/// Follow wallet changes until the returned handle is dropped
	///
	/// A chain change resets the workflow; any account or chain change
	/// refreshes the balance and the form's network error.
	pub fn watch(&self) -> Result<ClientWatch, SessionError> {
		let subscription = self.session.watch()?;

		let session = self.session.clone();
		let balances = self.balances.clone();
		let workflow = Arc::clone(&self.workflow);
		let form = Arc::clone(&self.form);
		let mut changes = session.changes();

		let task = tokio::spawn(async move {
			let mut last = changes.borrow_and_update().clone();
			while changes.changed().await.is_ok() {
				let current = changes.borrow_and_update().clone();
				if current == last {
					continue;
				}

				if current.chain_id != last.chain_id {
					workflow.handle_network_change(current.chain_id);
				}
				lock_form(&form).set_network_error(network_error(&current));
				if current.account != last.account || current.chain_id != last.chain_id {
					debug!("Session changed; refreshing balance");
					refresh_balance(&session, &balances, &form).await;
				}
				last = current;
			}
		});

		info!("Watching wallet for account and network changes");
		Ok(ClientWatch {
			_subscription: subscription,
			task,
		})
	}
}

/// Keeps the client's change listener alive
#[derive(Debug)]
pub struct ClientWatch {
	_subscription: SessionSubscription,
	task: JoinHandle<()>,
}

impl Drop for ClientWatch {
	fn drop(&mut self) {
		self.task.abort();
	}
}

async fn refresh_balance(
	session: &WalletSession,
	balances: &BalanceTracker,
	form: &Mutex<DepositForm>,
) -> BalanceState {
	let Some(account) = session.current().account else {
		balances.invalidate();
		lock_form(form).apply_balance(&BalanceState::Unknown);
		return BalanceState::Unknown;
	};

	let asset = lock_form(form).asset();
	lock_form(form).apply_balance(&BalanceState::Loading { asset });
	let state = balances.refresh(account, asset).await;
	lock_form(form).apply_balance(&balances.state());
	state
}

fn network_error(session: &Session) -> Option<String> {
	session.connection_error.as_ref().map(|e| e.to_string())
}

fn lock_form(form: &Mutex<DepositForm>) -> MutexGuard<'_, DepositForm> {
	form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
