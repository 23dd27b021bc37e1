//! Route service backed by the HTTP path-finding endpoint

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use vault_types::{
	FindBestPathBody, PathRequest, QuoteError, QuoteResult, Route, RouteResponse, RouteService,
};

use crate::{global_client_cache, AdapterError, AdapterResult, ClientCache, ClientConfig};

#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: String,
}

/// Posts `{ amountIn, isAVAX }` to the path-finding endpoint
#[derive(Debug, Clone)]
pub struct HttpRouteService {
	client: Client,
	endpoint: Url,
}

impl HttpRouteService {
	pub fn new(endpoint: &str, timeout_ms: u64) -> AdapterResult<Self> {
		Self::with_cache(endpoint, timeout_ms, global_client_cache())
	}

	pub fn with_cache(endpoint: &str, timeout_ms: u64, cache: &ClientCache) -> AdapterResult<Self> {
		let url = Url::parse(endpoint).map_err(|e| AdapterError::InvalidEndpoint {
			endpoint: endpoint.to_string(),
			reason: e.to_string(),
		})?;
		let config = ClientConfig::new(url.as_str()).with_timeout_ms(timeout_ms);

		Ok(Self {
			client: cache.get_client(&config)?,
			endpoint: url,
		})
	}

	pub fn endpoint(&self) -> &str {
		self.endpoint.as_str()
	}
}

#[async_trait]
impl RouteService for HttpRouteService {
	async fn find_best_path(&self, request: &PathRequest) -> QuoteResult<Route> {
		request.validate()?;
		debug!(
			"Requesting route for {} base units (native: {}) from {}",
			request.amount_in, request.is_native, self.endpoint
		);

		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&FindBestPathBody::from(request))
			.send()
			.await
			.map_err(|e| QuoteError::from(AdapterError::HttpError(e)))?;

		let status = response.status();
		if !status.is_success() {
			let message = response
				.json::<ErrorBody>()
				.await
				.map(|body| body.message)
				.unwrap_or_else(|_| status.to_string());
			warn!("Path-finding endpoint returned {}: {}", status, message);

			return Err(match status {
				StatusCode::BAD_REQUEST => QuoteError::InvalidAmount { reason: message },
				StatusCode::NOT_FOUND => QuoteError::route_unavailable(message),
				_ => QuoteError::unreachable(format!("HTTP {}: {}", status.as_u16(), message)),
			});
		}

		let wire: RouteResponse = response.json().await.map_err(|e| {
			QuoteError::route_unavailable(format!("Malformed route response: {}", e))
		})?;
		let route = Route::try_from(wire)?;
		route.validate()?;

		debug!("Received {}-step route", route.steps());
		Ok(route)
	}

	fn name(&self) -> &str {
		"http"
	}
}
