//! Path finder client

use std::sync::Arc;

use alloy_primitives::U256;
use tracing::{debug, info};

use vault_types::{parse_amount, DepositIntent, PathRequest, QuoteResult, Route, RouteService};

/// Asks a [`RouteService`] for the conversion route of a deposit
///
/// Amounts are always in wrapped-asset base units; the native flag only
/// changes how the deposit is later submitted. Requests have no on-chain
/// effects and may be retried freely.
#[derive(Debug, Clone)]
pub struct PathFinder {
	service: Arc<dyn RouteService>,
}

impl PathFinder {
	pub fn new(service: Arc<dyn RouteService>) -> Self {
		Self { service }
	}

	pub fn service_name(&self) -> &str {
		self.service.name()
	}

	pub async fn find_best_path(&self, amount_in: U256, is_native: bool) -> QuoteResult<Route> {
		let request = PathRequest::new(amount_in, is_native);
		request.validate()?;

		debug!(
			"Finding best path for {} via {}",
			amount_in,
			self.service.name()
		);
		let route = self.service.find_best_path(&request).await?;

		// At most three hops, with matching path, amount and adapter counts
		route.validate()?;

		info!(
			"Best path found: {} step(s), expected output {}",
			route.steps(),
			route.amount_out().unwrap_or_default()
		);
		Ok(route)
	}

	/// Parse the intent's decimal amount and look up its route
	pub async fn find_for_intent(&self, intent: &DepositIntent) -> QuoteResult<Route> {
		let amount = parse_amount(&intent.amount, intent.asset.decimals())?;
		self.find_best_path(amount, intent.is_native()).await
	}
}
