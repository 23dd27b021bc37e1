//! Conversion between human-readable decimal amounts and base units

use alloy_primitives::{
	utils::{format_units, parse_units, ParseUnits},
	U256,
};
use thiserror::Error;

/// Reasons a user-entered amount cannot be converted to base units
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
	#[error("Amount is empty")]
	Empty,

	#[error("Amount '{0}' is not a number")]
	NotNumeric(String),

	#[error("Amount '{0}' is negative")]
	Negative(String),

	#[error("Amount '{value}' has more than {decimals} decimal places")]
	TooPrecise { value: String, decimals: u8 },
}

/// Parse a decimal string such as `"1.5"` into base units with `decimals` places
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256, AmountError> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return Err(AmountError::Empty);
	}
	if trimmed.starts_with('-') {
		return Err(AmountError::Negative(trimmed.to_string()));
	}

	let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
	let (integer, fraction) = match unsigned.split_once('.') {
		Some((integer, fraction)) => (integer, fraction),
		None => (unsigned, ""),
	};

	let well_formed = !(integer.is_empty() && fraction.is_empty())
		&& integer.chars().all(|c| c.is_ascii_digit())
		&& fraction.chars().all(|c| c.is_ascii_digit());
	if !well_formed {
		return Err(AmountError::NotNumeric(trimmed.to_string()));
	}
	if fraction.len() > decimals as usize {
		return Err(AmountError::TooPrecise {
			value: trimmed.to_string(),
			decimals,
		});
	}

	let normalized = match (integer.is_empty(), fraction.is_empty()) {
		(true, _) => format!("0.{}", fraction),
		(false, true) => integer.to_string(),
		(false, false) => format!("{}.{}", integer, fraction),
	};

	match parse_units(&normalized, decimals) {
		Ok(ParseUnits::U256(value)) => Ok(value),
		Ok(ParseUnits::I256(_)) => Err(AmountError::Negative(trimmed.to_string())),
		Err(_) => Err(AmountError::NotNumeric(trimmed.to_string())),
	}
}

/// Render base units as a trimmed decimal string (`10.0`, `0.25`)
pub fn format_amount(value: U256, decimals: u8) -> String {
	let rendered = format_units(value, decimals).unwrap_or_else(|_| value.to_string());
	match rendered.split_once('.') {
		Some((integer, fraction)) => {
			let fraction = fraction.trim_end_matches('0');
			if fraction.is_empty() {
				format!("{}.0", integer)
			} else {
				format!("{}.{}", integer, fraction)
			}
		},
		None => format!("{}.0", rendered),
	}
}

/// Render base units with exactly `places` fractional digits, truncating the rest
///
/// Truncation keeps the rendered amount at or below `value`, so an amount
/// derived from a balance never exceeds that balance once parsed back.
pub fn format_fixed(value: U256, decimals: u8, places: usize) -> String {
	let places = places.min(decimals as usize);
	let ten = U256::from(10u8);
	let dropped = ten.pow(U256::from(decimals as usize - places));
	let kept = value / dropped;

	if places == 0 {
		return kept.to_string();
	}

	let scale = ten.pow(U256::from(places));
	let integer = kept / scale;
	let fraction = kept % scale;
	format!("{}.{:0>width$}", integer, fraction.to_string(), width = places)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ether(n: u64) -> U256 {
		U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
	}

	#[test]
	fn test_parse_whole_and_fractional() {
		assert_eq!(parse_amount("5", 18).unwrap(), ether(5));
		assert_eq!(parse_amount("5.000000", 18).unwrap(), ether(5));
		assert_eq!(
			parse_amount("0.5", 18).unwrap(),
			U256::from(500_000_000_000_000_000u64)
		);
		assert_eq!(
			parse_amount(".5", 18).unwrap(),
			U256::from(500_000_000_000_000_000u64)
		);
		assert_eq!(parse_amount("2.", 18).unwrap(), ether(2));
		assert_eq!(parse_amount("0", 18).unwrap(), U256::ZERO);
	}

	#[test]
	fn test_parse_rejects_garbage() {
		assert_eq!(parse_amount("", 18), Err(AmountError::Empty));
		assert_eq!(parse_amount("   ", 18), Err(AmountError::Empty));
		assert!(matches!(parse_amount("abc", 18), Err(AmountError::NotNumeric(_))));
		assert!(matches!(parse_amount("1.2.3", 18), Err(AmountError::NotNumeric(_))));
		assert!(matches!(parse_amount(".", 18), Err(AmountError::NotNumeric(_))));
		assert!(matches!(parse_amount("1e18", 18), Err(AmountError::NotNumeric(_))));
		assert!(matches!(parse_amount("-1", 18), Err(AmountError::Negative(_))));
		assert!(matches!(
			parse_amount("0.1234567", 6),
			Err(AmountError::TooPrecise { .. })
		));
	}

	#[test]
	fn test_format_amount_trims() {
		assert_eq!(format_amount(ether(10), 18), "10.0");
		assert_eq!(format_amount(U256::from(250_000_000_000_000_000u64), 18), "0.25");
		assert_eq!(format_amount(U256::ZERO, 18), "0.0");
	}

	#[test]
	fn test_format_fixed_truncates() {
		assert_eq!(format_fixed(ether(5), 18, 6), "5.000000");
		// 1.9999999 must not round up past the balance
		let value = U256::from(1_999_999_900_000_000_000u64);
		assert_eq!(format_fixed(value, 18, 6), "1.999999");
		assert_eq!(format_fixed(U256::from(1u8), 18, 6), "0.000000");
		assert_eq!(format_fixed(ether(3), 18, 0), "3");
	}
}
