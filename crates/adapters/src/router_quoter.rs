//! Route service that asks the on-chain aggregator router directly

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use vault_types::{
	constants::{MAX_ROUTE_STEPS, SAVAX_ADDRESS, WAVAX_ADDRESS, YAK_ROUTER_ADDRESS},
	contracts::{decode_find_best_path, find_best_path_calldata},
	CallRequest, PathRequest, QuoteError, QuoteResult, Route, RouteService,
};

use crate::{global_client_cache, AdapterResult, ClientCache, JsonRpcClient};

/// Resolves routes with an `eth_call` of `findBestPath` on the router contract
///
/// The router only trades ERC20 tokens, so the wrapped asset is the input token
/// for native deposits too; the vault wraps native value itself.
#[derive(Debug, Clone)]
pub struct RouterContractQuoter {
	rpc: JsonRpcClient,
	router: Address,
	token_in: Address,
	token_out: Address,
	max_steps: usize,
}

impl RouterContractQuoter {
	pub fn new(rpc_url: &str, timeout_ms: u64) -> AdapterResult<Self> {
		Self::with_cache(rpc_url, timeout_ms, global_client_cache())
	}

	pub fn with_cache(rpc_url: &str, timeout_ms: u64, cache: &ClientCache) -> AdapterResult<Self> {
		Ok(Self {
			rpc: JsonRpcClient::new(rpc_url, Some(timeout_ms), cache)?,
			router: YAK_ROUTER_ADDRESS,
			token_in: WAVAX_ADDRESS,
			token_out: SAVAX_ADDRESS,
			max_steps: MAX_ROUTE_STEPS,
		})
	}

	pub fn with_contracts(mut self, router: Address, token_in: Address, token_out: Address) -> Self {
		self.router = router;
		self.token_in = token_in;
		self.token_out = token_out;
		self
	}

	pub fn with_max_steps(mut self, max_steps: usize) -> Self {
		self.max_steps = max_steps;
		self
	}
}

#[async_trait]
impl RouteService for RouterContractQuoter {
	async fn find_best_path(&self, request: &PathRequest) -> QuoteResult<Route> {
		request.validate()?;

		let call = CallRequest::new(
			self.router,
			find_best_path_calldata(request.amount_in, self.token_in, self.token_out, self.max_steps),
		);
		debug!(
			"Calling findBestPath({}, {}, {}, {}) on {}",
			request.amount_in, self.token_in, self.token_out, self.max_steps, self.router
		);

		let output: Bytes = self
			.rpc
			.request("eth_call", json!([call, "latest"]))
			.await
			.map_err(QuoteError::from)?;

		let route = decode_find_best_path(&output)
			.map_err(|e| QuoteError::route_unavailable(format!("Undecodable router output: {}", e)))?;
		if route.is_empty() {
			return Err(QuoteError::route_unavailable("Router returned an empty path"));
		}
		route.validate_within(self.max_steps)?;

		info!(
			"Router found a {}-step route for {} base units",
			route.steps(),
			request.amount_in
		);
		Ok(route)
	}

	fn name(&self) -> &str {
		"router-contract"
	}
}
