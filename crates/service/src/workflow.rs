//! Deposit workflow
//!
//! Drives one deposit attempt at a time through
//! `FindingPath -> [Approving ->] Depositing -> Completed`, or into
//! `Failed(reason)` at the first error. Each step waits for the previous
//! transaction to be mined; confirmation waits have no timeout but stop as
//! soon as the attempt is abandoned.

use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{Address, TxHash, U256};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use vault_types::{
	contracts::{approve_calldata, deposit_calldata},
	DepositIntent, FailureReason, Network, QuoteError, Route, Session, SubmitRejection, TransactionRecord,
	TransactionRequest, WalletError, WalletProvider, WorkflowStatus,
};

use crate::PathFinder;

/// Failure of a single signed step (approval or deposit)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
	#[error("rejected in the wallet")]
	Rejected,

	#[error("transaction {0} reverted")]
	Reverted(TxHash),

	#[error(transparent)]
	Wallet(WalletError),
}

impl From<WalletError> for StepError {
	fn from(error: WalletError) -> Self {
		if error.is_user_rejection() {
			StepError::Rejected
		} else {
			StepError::Wallet(error)
		}
	}
}

/// Why an attempt ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
	#[error("Path finding failed: {0}")]
	Path(#[from] QuoteError),

	#[error("Approval {0}")]
	Approval(StepError),

	#[error("Deposit {0}")]
	Deposit(StepError),
}

impl WorkflowError {
	pub fn reason(&self) -> FailureReason {
		match self {
			WorkflowError::Path(_) => FailureReason::PathNotFound,
			WorkflowError::Approval(StepError::Rejected) => FailureReason::ApprovalRejected,
			WorkflowError::Approval(_) => FailureReason::ApprovalFailed,
			WorkflowError::Deposit(StepError::Rejected) => FailureReason::DepositRejected,
			WorkflowError::Deposit(_) => FailureReason::DepositFailed,
		}
	}
}

/// How a started attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositOutcome {
	Completed(TransactionRecord),
	Failed(WorkflowError),
	/// Local tracking stopped; a broadcast transaction may still be mined
	Abandoned(Option<TransactionRecord>),
}

/// Addresses and links the workflow needs for its transactions
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
	/// Deposits are refused on any other chain
	pub network: Network,
	pub vault: Address,
	pub wrapped_asset: Address,
	pub explorer_url: String,
}

#[derive(Debug, Default)]
struct Attempt {
	route: Option<Route>,
	transaction: Option<TransactionRecord>,
	error: Option<WorkflowError>,
	cancel: CancellationToken,
}

#[derive(Debug)]
pub struct DepositWorkflow {
	provider: Arc<dyn WalletProvider>,
	path_finder: PathFinder,
	config: WorkflowConfig,
	status: watch::Sender<WorkflowStatus>,
	attempt: Mutex<Attempt>,
}

impl DepositWorkflow {
	pub fn new(
		provider: Arc<dyn WalletProvider>,
		path_finder: PathFinder,
		config: WorkflowConfig,
	) -> Self {
		let (status, _) = watch::channel(WorkflowStatus::Idle);
		Self {
			provider,
			path_finder,
			config,
			status,
			attempt: Mutex::new(Attempt::default()),
		}
	}

	pub fn status(&self) -> WorkflowStatus {
		*self.status.borrow()
	}

	pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
		self.status.subscribe()
	}

	/// Route of the current or last attempt
	pub fn route(&self) -> Option<Route> {
		self.lock().route.clone()
	}

	/// Latest transaction the wallet accepted in the current or last attempt
	pub fn transaction(&self) -> Option<TransactionRecord> {
		self.lock().transaction.clone()
	}

	pub fn last_error(&self) -> Option<WorkflowError> {
		self.lock().error.clone()
	}

	/// Message for the user when the last attempt failed
	pub fn error_message(&self) -> Option<&'static str> {
		self.status().failure().map(|reason| reason.message())
	}

	/// Start a deposit and drive it to a terminal state
	///
	/// Rejections leave the status untouched. Once accepted, the attempt starts
	/// from a clean slate regardless of what the previous attempt left behind.
	pub async fn submit(
		&self,
		intent: &DepositIntent,
		balance: U256,
		session: &Session,
	) -> Result<DepositOutcome, SubmitRejection> {
		let (amount, account, cancel) = {
			let mut attempt = self.lock();

			let status = self.status();
			if status.is_busy() {
				return Err(SubmitRejection::AlreadyInFlight(status));
			}
			let amount = intent.validate(balance)?;
			if let Some(error) = &session.connection_error {
				return Err(SubmitRejection::Connection(error.clone()));
			}
			let account = session.account.ok_or(SubmitRejection::NotConnected)?;
			self.config.network.check(session.chain_id)?;

			*attempt = Attempt::default();
			let cancel = attempt.cancel.clone();
			self.status.send_replace(WorkflowStatus::FindingPath);
			(amount, account, cancel)
		};

		info!(
			"Deposit of {} {} started for {}",
			intent.amount, intent.asset, account
		);

		let outcome = tokio::select! {
			biased;
			_ = cancel.cancelled() => None,
			result = self.run(intent, amount, account, &cancel) => Some(result),
		};

		Ok(match outcome {
			// `abandon` already handed the record to its caller
			None => DepositOutcome::Abandoned(None),
			Some(Ok(record)) => DepositOutcome::Completed(record),
			Some(Err(error)) => {
				let reason = error.reason();
				warn!("Deposit failed ({}): {}", reason, error);
				let mut attempt = self.lock();
				if cancel.is_cancelled() {
					return Ok(DepositOutcome::Abandoned(None));
				}
				attempt.error = Some(error.clone());
				self.status.send_replace(WorkflowStatus::Failed(reason));
				DepositOutcome::Failed(error)
			},
		})
	}

	async fn run(
		&self,
		intent: &DepositIntent,
		amount: U256,
		account: Address,
		cancel: &CancellationToken,
	) -> Result<TransactionRecord, WorkflowError> {
		let is_native = intent.is_native();
		let route = self.path_finder.find_best_path(amount, is_native).await?;
		self.update(cancel, |attempt| attempt.route = Some(route.clone()));

		if intent.needs_approval() {
			self.advance(cancel, WorkflowStatus::Approving);
			let request = TransactionRequest::new(
				account,
				self.config.wrapped_asset,
				approve_calldata(self.config.vault, amount),
			);
			self.execute(cancel, &request)
				.await
				.map_err(WorkflowError::Approval)?;
		}

		self.advance(cancel, WorkflowStatus::Depositing);
		let value = if is_native { amount } else { U256::ZERO };
		let request = TransactionRequest::new(
			account,
			self.config.vault,
			deposit_calldata(&route, is_native),
		)
		.with_value(value);
		let record = self
			.execute(cancel, &request)
			.await
			.map_err(WorkflowError::Deposit)?;

		self.advance(cancel, WorkflowStatus::Completed);
		info!("Deposit confirmed: {}", record.explorer_url);
		Ok(record)
	}

	/// Send one transaction and wait until it is mined
	async fn execute(
		&self,
		cancel: &CancellationToken,
		request: &TransactionRequest,
	) -> Result<TransactionRecord, StepError> {
		let hash = self.provider.send_transaction(request).await?;
		let record = TransactionRecord::new(hash, &self.config.explorer_url);
		debug!("Wallet accepted transaction {}", hash);
		self.update(cancel, |attempt| attempt.transaction = Some(record.clone()));

		let receipt = self.provider.wait_for_receipt(hash).await?;
		if !receipt.success {
			return Err(StepError::Reverted(hash));
		}
		Ok(record)
	}

	/// Return a terminal workflow to `Idle`, clearing route, hash and error
	pub fn reset(&self) -> bool {
		let mut attempt = self.lock();
		if self.status().is_busy() {
			return false;
		}
		*attempt = Attempt::default();
		self.status.send_replace(WorkflowStatus::Idle);
		true
	}

	/// Stop tracking the current attempt
	///
	/// Transactions already broadcast are not cancelled; their record is
	/// returned so the caller can still link to them.
	pub fn abandon(&self) -> Option<TransactionRecord> {
		let mut attempt = self.lock();
		attempt.cancel.cancel();
		let transaction = attempt.transaction.take();
		if let Some(record) = &transaction {
			warn!(
				"Abandoned deposit tracking; {} may still be mined",
				record.hash
			);
		}
		*attempt = Attempt::default();
		self.status.send_replace(WorkflowStatus::Idle);
		transaction
	}

	/// React to the wallet moving to another chain
	///
	/// An in-flight attempt is abandoned; a finished one is cleared.
	pub fn handle_network_change(&self, chain_id: u64) -> Option<TransactionRecord> {
		info!("Network changed to chain {}; resetting deposit workflow", chain_id);
		if self.status().is_busy() {
			self.abandon()
		} else {
			self.reset();
			None
		}
	}

	fn advance(&self, cancel: &CancellationToken, status: WorkflowStatus) {
		let _attempt = self.lock();
		if cancel.is_cancelled() {
			return;
		}
		debug!("Deposit workflow -> {}", status);
		self.status.send_replace(status);
	}

	fn update(&self, cancel: &CancellationToken, f: impl FnOnce(&mut Attempt)) {
		let mut attempt = self.lock();
		if !cancel.is_cancelled() {
			f(&mut attempt);
		}
	}

	fn lock(&self) -> MutexGuard<'_, Attempt> {
		self.attempt
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}
