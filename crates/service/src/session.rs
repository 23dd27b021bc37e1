//! Wallet session management
//!
//! Owns the connection state for one wallet provider: the active account, the
//! chain the wallet is on, and whether that chain is the supported one. Change
//! notifications from the provider are consumed through a single
//! [`SessionSubscription`] that detaches when dropped.

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};

use thiserror::Error;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use vault_types::{ConnectionError, Network, ProviderEvent, Session, WalletProvider};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
	#[error("A change subscription is already active for this session")]
	AlreadySubscribed,
}

/// Connection to the user's wallet
///
/// Cloning yields another handle onto the same session state.
#[derive(Debug, Clone)]
pub struct WalletSession {
	provider: Arc<dyn WalletProvider>,
	network: Network,
	state: Arc<watch::Sender<Session>>,
	subscribed: Arc<AtomicBool>,
}

impl WalletSession {
	pub fn new(provider: Arc<dyn WalletProvider>, network: Network) -> Self {
		let (state, _) = watch::channel(Session::default());
		Self {
			provider,
			network,
			state: Arc::new(state),
			subscribed: Arc::new(AtomicBool::new(false)),
		}
	}

	pub fn network(&self) -> &Network {
		&self.network
	}

	pub fn provider(&self) -> &Arc<dyn WalletProvider> {
		&self.provider
	}

	/// Latest session snapshot
	pub fn current(&self) -> Session {
		self.state.borrow().clone()
	}

	/// Receiver that observes every session update
	pub fn changes(&self) -> watch::Receiver<Session> {
		self.state.subscribe()
	}

	/// Request account access and read the wallet's chain
	///
	/// Fails only when there is no provider or the user declines. A wrong
	/// chain still yields a session, with `connection_error` set so callers
	/// cannot submit until the user switches networks.
	pub async fn connect(&self) -> Result<Session, ConnectionError> {
		debug!("Requesting wallet accounts");
		let accounts = match self.provider.request_accounts().await {
			Ok(accounts) => accounts,
			Err(e) => return Err(self.fail(e.into())),
		};
		let Some(account) = accounts.first().copied() else {
			return Err(self.fail(ConnectionError::Provider(
				"wallet returned no accounts".to_string(),
			)));
		};

		let chain_id = match self.provider.chain_id().await {
			Ok(chain_id) => chain_id,
			Err(e) => return Err(self.fail(e.into())),
		};

		let mut session = Session::connected(account, chain_id);
		if let Err(e) = self.network.check(chain_id) {
			warn!("Wallet is on chain {}, expected {}", chain_id, self.network.chain_id);
			session.connection_error = Some(e);
		} else {
			info!("Wallet connected: {} on chain {}", account, chain_id);
		}

		self.state.send_replace(session.clone());
		Ok(session)
	}

	/// Current chain of the wallet, or `WrongNetwork` for any unsupported chain
	pub async fn get_network(&self) -> Result<u64, ConnectionError> {
		let chain_id = self
			.provider
			.chain_id()
			.await
			.map_err(ConnectionError::from)?;
		self.network.check(chain_id)?;
		Ok(chain_id)
	}

	/// Follow provider account and chain changes, re-running `connect` on each
	///
	/// Only one subscription may be live per session. Dropping the returned
	/// handle stops the listener and releases the provider receiver.
	pub fn watch(&self) -> Result<SessionSubscription, SessionError> {
		if self
			.subscribed
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			return Err(SessionError::AlreadySubscribed);
		}

		let cancel = CancellationToken::new();
		let mut events = self.provider.subscribe();
		let session = self.clone();
		let token = cancel.clone();

		let task = tokio::spawn(async move {
			loop {
				let event = tokio::select! {
					biased;
					_ = token.cancelled() => break,
					event = events.recv() => event,
				};

				match event {
					Ok(ProviderEvent::AccountsChanged(accounts)) => {
						debug!("Provider reported {} account(s)", accounts.len());
					},
					Ok(ProviderEvent::ChainChanged(chain_id)) => {
						debug!("Provider switched to chain {}", chain_id);
					},
					Err(RecvError::Lagged(skipped)) => {
						debug!("Missed {} provider events; reconnecting", skipped);
					},
					Err(RecvError::Closed) => break,
				}

				// The token may have fired while the event was in flight
				if token.is_cancelled() {
					break;
				}
				if let Err(e) = session.connect().await {
					warn!("Reconnect after provider change failed: {}", e);
				}
			}
			debug!("Session listener stopped");
		});

		Ok(SessionSubscription {
			cancel,
			task,
			subscribed: Arc::clone(&self.subscribed),
		})
	}

	fn fail(&self, error: ConnectionError) -> ConnectionError {
		warn!("Wallet connection failed: {}", error);
		self.state.send_replace(Session::failed(error.clone()));
		error
	}
}

/// Ownership handle for the provider change listener
#[derive(Debug)]
pub struct SessionSubscription {
	cancel: CancellationToken,
	task: JoinHandle<()>,
	subscribed: Arc<AtomicBool>,
}

impl SessionSubscription {
	pub fn is_active(&self) -> bool {
		!self.cancel.is_cancelled() && !self.task.is_finished()
	}
}

impl Drop for SessionSubscription {
	fn drop(&mut self) {
		self.cancel.cancel();
		self.task.abort();
		self.subscribed.store(false, Ordering::Release);
	}
}
