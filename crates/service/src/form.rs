//! Non-visual model of the deposit form
//!
//! Keeps the amount field, percentage slider and selected asset consistent
//! with the latest balance, and derives the submit button's label and
//! enabled state from the workflow status.

use alloy_primitives::U256;

use vault_types::{
	constants::AMOUNT_DISPLAY_PLACES, format_fixed, parse_amount, AssetSymbol, Balance,
	DepositIntent, TransactionRecord, WorkflowStatus,
};

use crate::{BalanceState, PriceFeed};

/// Slider resolution: percent with two decimals
const BASIS_POINTS: u64 = 10_000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositForm {
	asset: AssetSymbol,
	amount: String,
	percentage: f64,
	balance: Option<Balance>,
	network_error: Option<String>,
}

impl DepositForm {
	pub fn new(asset: AssetSymbol) -> Self {
		Self {
			asset,
			..Self::default()
		}
	}

	pub fn asset(&self) -> AssetSymbol {
		self.asset
	}

	pub fn amount(&self) -> &str {
		&self.amount
	}

	pub fn percentage(&self) -> f64 {
		self.percentage
	}

	pub fn balance(&self) -> Option<&Balance> {
		self.balance.as_ref()
	}

	fn spendable(&self) -> U256 {
		self.balance.map(|b| b.amount).unwrap_or(U256::ZERO)
	}

	/// Adopt the tracker's latest state; anything but a balance for the
	/// selected asset counts as no balance
	pub fn apply_balance(&mut self, state: &BalanceState) {
		self.balance = state.balance().filter(|b| b.asset == self.asset).copied();
	}

	pub fn set_network_error(&mut self, error: Option<String>) {
		self.network_error = error;
	}

	pub fn network_error(&self) -> Option<&str> {
		self.network_error.as_deref()
	}

	/// Move the slider; with a positive balance the amount follows as
	/// `balance * p / 100` shown with six decimals
	pub fn set_percentage(&mut self, percentage: f64) {
		let percentage = clamp_percentage(percentage);
		self.percentage = percentage;

		let balance = self.spendable();
		if balance.is_zero() {
			return;
		}
		let basis_points = U256::from((percentage * 100.0).round() as u64);
		let amount = balance * basis_points / U256::from(BASIS_POINTS);
		self.amount = format_fixed(amount, self.asset.decimals(), AMOUNT_DISPLAY_PLACES);
	}

	/// Type into the amount field; with a positive balance the slider follows
	pub fn set_amount(&mut self, text: impl Into<String>) {
		self.amount = text.into();

		let balance = self.spendable();
		if balance.is_zero() {
			return;
		}
		let Ok(amount) = parse_amount(&self.amount, self.asset.decimals()) else {
			return;
		};
		let basis_points = if amount >= balance {
			BASIS_POINTS
		} else {
			u64::try_from(amount * U256::from(BASIS_POINTS) / balance).unwrap_or(BASIS_POINTS)
		};
		self.percentage = basis_points as f64 / 100.0;
	}

	/// Switch assets: the slider resets and the old balance is forgotten
	pub fn select_asset(&mut self, asset: AssetSymbol) {
		if asset == self.asset {
			return;
		}
		self.asset = asset;
		self.percentage = 0.0;
		self.balance = None;
	}

	pub fn intent(&self) -> DepositIntent {
		DepositIntent::new(self.amount.trim(), self.asset)
	}

	pub fn is_submit_disabled(&self, status: WorkflowStatus) -> bool {
		status.is_busy()
			|| self.network_error.is_some()
			|| self.intent().validate(self.spendable()).is_err()
	}

	pub fn status_label(&self, status: WorkflowStatus) -> String {
		match status {
			WorkflowStatus::Approving => "Approving...".to_string(),
			WorkflowStatus::Depositing => "Depositing...".to_string(),
			WorkflowStatus::FindingPath => "Finding Best Path...".to_string(),
			_ => format!("Deposit {}", self.asset),
		}
	}

	/// "View on explorer" link for the latest transaction
	pub fn transaction_link<'a>(&self, record: Option<&'a TransactionRecord>) -> Option<&'a str> {
		record.map(|r| r.explorer_url.as_str())
	}

	/// Approximate USD value of the entered amount
	pub fn usd_estimate(&self, prices: &PriceFeed) -> Option<f64> {
		let price = prices.price(self.asset)?;
		let amount: f64 = self.amount.trim().parse().ok()?;
		(amount >= 0.0).then_some(amount * price)
	}
}

fn clamp_percentage(percentage: f64) -> f64 {
	if percentage.is_nan() {
		0.0
	} else {
		percentage.clamp(0.0, 100.0)
	}
}
