//! Capability interface of a routing service

use async_trait::async_trait;
use std::fmt::Debug;

use super::{PathRequest, QuoteResult};
use crate::models::Route;

/// Finds the best conversion route for a deposit amount
///
/// Lookups have no on-chain side effects and may be retried freely.
#[async_trait]
pub trait RouteService: Send + Sync + Debug {
	async fn find_best_path(&self, request: &PathRequest) -> QuoteResult<Route>;

	/// Short identifier used in logs
	fn name(&self) -> &str;
}
