//! Spendable balance of the selected asset

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{format_amount, AssetSymbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
	pub asset: AssetSymbol,
	/// Base units
	pub amount: U256,
}

impl Balance {
	pub fn new(asset: AssetSymbol, amount: U256) -> Self {
		Self { asset, amount }
	}

	/// Human-readable amount, e.g. `10.0`
	pub fn display_amount(&self) -> String {
		format_amount(self.amount, self.asset.decimals())
	}
}
