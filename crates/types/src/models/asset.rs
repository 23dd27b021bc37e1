//! Depositable asset models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::ASSET_DECIMALS;

/// Closed set of assets the vault accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AssetSymbol {
	/// Chain-native currency, deposited by attaching value to the transaction
	#[default]
	#[serde(rename = "AVAX")]
	Avax,
	/// ERC20 wrapper of the native currency, moved through an allowance
	#[serde(rename = "WAVAX")]
	Wavax,
}

impl AssetSymbol {
	pub const ALL: [AssetSymbol; 2] = [AssetSymbol::Avax, AssetSymbol::Wavax];

	pub fn as_str(&self) -> &'static str {
		match self {
			AssetSymbol::Avax => "AVAX",
			AssetSymbol::Wavax => "WAVAX",
		}
	}

	/// Human-readable name
	pub fn display_name(&self) -> &'static str {
		match self {
			AssetSymbol::Avax => "Avalanche",
			AssetSymbol::Wavax => "Wrapped AVAX",
		}
	}

	pub fn is_native(&self) -> bool {
		matches!(self, AssetSymbol::Avax)
	}

	/// Only the wrapped asset has to be approved before the vault can pull it
	pub fn needs_approval(&self) -> bool {
		!self.is_native()
	}

	/// Both supported assets use 18 decimals
	pub fn decimals(&self) -> u8 {
		ASSET_DECIMALS
	}
}

impl fmt::Display for AssetSymbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported asset symbol: {0}")]
pub struct UnknownAssetError(pub String);

impl FromStr for AssetSymbol {
	type Err = UnknownAssetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"AVAX" => Ok(AssetSymbol::Avax),
			"WAVAX" => Ok(AssetSymbol::Wavax),
			other => Err(UnknownAssetError(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_symbol_parsing() {
		assert_eq!("avax".parse::<AssetSymbol>().unwrap(), AssetSymbol::Avax);
		assert_eq!(" WAVAX ".parse::<AssetSymbol>().unwrap(), AssetSymbol::Wavax);
		assert!("USDC".parse::<AssetSymbol>().is_err());
	}

	#[test]
	fn test_approval_only_for_wrapped() {
		assert!(!AssetSymbol::Avax.needs_approval());
		assert!(AssetSymbol::Wavax.needs_approval());
		assert!(AssetSymbol::Avax.is_native());
	}

	#[test]
	fn test_serde_uses_ticker() {
		let json = serde_json::to_string(&AssetSymbol::Wavax).unwrap();
		assert_eq!(json, "\"WAVAX\"");
		let parsed: AssetSymbol = serde_json::from_str("\"AVAX\"").unwrap();
		assert_eq!(parsed, AssetSymbol::Avax);
	}
}
