//! Deposit intent built from user input

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::DepositValidationError;
use crate::models::{parse_amount, AssetSymbol};

/// A single deposit request: how much of which asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositIntent {
	/// Human-readable decimal amount, as typed or derived from the slider
	pub amount: String,
	pub asset: AssetSymbol,
	pub is_native_currency: bool,
}

impl DepositIntent {
	pub fn new(amount: impl Into<String>, asset: AssetSymbol) -> Self {
		Self {
			amount: amount.into(),
			asset,
			is_native_currency: asset.is_native(),
		}
	}

	pub fn needs_approval(&self) -> bool {
		self.asset.needs_approval()
	}

	/// Whether the deposit attaches native value; always follows the asset
	pub fn is_native(&self) -> bool {
		self.asset.is_native()
	}

	/// Check `0 < amount <= balance` and return the amount in base units
	///
	/// An intent whose native flag disagrees with its asset is rejected.
	pub fn validate(&self, balance: U256) -> Result<U256, DepositValidationError> {
		if self.is_native_currency != self.is_native() {
			return Err(DepositValidationError::NativeFlagMismatch {
				asset: self.asset,
				is_native_currency: self.is_native_currency,
			});
		}
		let amount = parse_amount(&self.amount, self.asset.decimals())?;
		if amount.is_zero() {
			return Err(DepositValidationError::ZeroAmount);
		}
		if amount > balance {
			return Err(DepositValidationError::ExceedsBalance {
				requested: amount,
				available: balance,
			});
		}
		Ok(amount)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::AmountError;

	fn ether(n: u64) -> U256 {
		U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
	}

	#[test]
	fn test_native_flag_follows_asset() {
		assert!(DepositIntent::new("1", AssetSymbol::Avax).is_native_currency);
		assert!(!DepositIntent::new("1", AssetSymbol::Wavax).is_native_currency);
		assert!(DepositIntent::new("1", AssetSymbol::Wavax).needs_approval());
	}

	#[test]
	fn test_validate_within_balance() {
		let intent = DepositIntent::new("5.000000", AssetSymbol::Avax);
		assert_eq!(intent.validate(ether(10)).unwrap(), ether(5));

		let whole_balance = DepositIntent::new("10", AssetSymbol::Avax);
		assert_eq!(whole_balance.validate(ether(10)).unwrap(), ether(10));
	}

	#[test]
	fn test_validate_rejections() {
		let over = DepositIntent::new("3", AssetSymbol::Wavax);
		assert_eq!(
			over.validate(ether(2)),
			Err(DepositValidationError::ExceedsBalance {
				requested: ether(3),
				available: ether(2),
			})
		);

		let zero = DepositIntent::new("0.0", AssetSymbol::Avax);
		assert_eq!(zero.validate(ether(2)), Err(DepositValidationError::ZeroAmount));

		let negative = DepositIntent::new("-1", AssetSymbol::Avax);
		assert!(matches!(
			negative.validate(ether(2)),
			Err(DepositValidationError::Amount(AmountError::Negative(_)))
		));

		let garbage = DepositIntent::new("ten", AssetSymbol::Avax);
		assert!(matches!(
			garbage.validate(ether(2)),
			Err(DepositValidationError::Amount(AmountError::NotNumeric(_)))
		));
	}

	#[test]
	fn test_native_flag_must_match_asset() {
		let mut wrapped = DepositIntent::new("1", AssetSymbol::Wavax);
		wrapped.is_native_currency = true;
		assert_eq!(
			wrapped.validate(ether(10)),
			Err(DepositValidationError::NativeFlagMismatch {
				asset: AssetSymbol::Wavax,
				is_native_currency: true,
			})
		);

		let native: DepositIntent = serde_json::from_value(serde_json::json!({
			"amount": "1",
			"asset": "AVAX",
			"is_native_currency": false
		}))
		.unwrap();
		assert!(matches!(
			native.validate(ether(10)),
			Err(DepositValidationError::NativeFlagMismatch { .. })
		));
	}
}
