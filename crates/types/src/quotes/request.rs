//! Path-finding request model and wire body

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{QuoteValidationError, QuoteValidationResult};

/// Request for the best route for a deposit
///
/// `amount_in` is always expressed in wrapped-asset base units; `is_native`
/// only tells the service which asset the user will attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRequest {
	pub amount_in: U256,
	pub is_native: bool,
}

impl PathRequest {
	pub fn new(amount_in: U256, is_native: bool) -> Self {
		Self {
			amount_in,
			is_native,
		}
	}

	pub fn validate(&self) -> QuoteValidationResult<()> {
		if self.amount_in.is_zero() {
			return Err(QuoteValidationError::InvalidAmount {
				reason: "amountIn must be greater than zero".to_string(),
			});
		}
		Ok(())
	}
}

/// JSON body of `POST /api/findBestPath`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FindBestPathBody {
	#[serde(rename = "amountIn", default, skip_serializing_if = "Option::is_none")]
	pub amount_in: Option<String>,
	#[serde(rename = "isAVAX", default)]
	pub is_avax: bool,
}

impl From<&PathRequest> for FindBestPathBody {
	fn from(request: &PathRequest) -> Self {
		Self {
			amount_in: Some(request.amount_in.to_string()),
			is_avax: request.is_native,
		}
	}
}

impl TryFrom<FindBestPathBody> for PathRequest {
	type Error = QuoteValidationError;

	fn try_from(body: FindBestPathBody) -> Result<Self, Self::Error> {
		let raw = body
			.amount_in
			.filter(|a| !a.trim().is_empty())
			.ok_or(QuoteValidationError::MissingAmount)?;
		let raw = raw.trim();

		if !raw.chars().all(|c| c.is_ascii_digit()) {
			return Err(QuoteValidationError::InvalidAmount {
				reason: format!("'{}' is not a decimal integer in base units", raw),
			});
		}
		let amount_in =
			U256::from_str_radix(raw, 10).map_err(|e| QuoteValidationError::InvalidAmount {
				reason: e.to_string(),
			})?;

		let request = PathRequest::new(amount_in, body.is_avax);
		request.validate()?;
		Ok(request)
	}
}
