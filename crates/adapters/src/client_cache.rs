//! Shared reqwest clients
//!
//! Adapters pointing at the same endpoint with the same timeout share one
//! pooled client instead of opening a new connection pool each.

use dashmap::{mapref::entry::Entry, DashMap};
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, ClientBuilder,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::{AdapterError, AdapterResult};

const USER_AGENT: &str = concat!("vault-deposit/", env!("CARGO_PKG_VERSION"));

/// Connection settings for one upstream endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	pub endpoint: String,
	/// Total request timeout; `None` leaves requests unbounded
	pub timeout_ms: Option<u64>,
	pub max_idle_per_host: usize,
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			timeout_ms: None,
			max_idle_per_host: 10,
			headers: vec![("Content-Type".to_string(), "application/json".to_string())],
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = Some(timeout_ms);
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}
}

#[derive(Clone, Debug, Default)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, Client>>,
}

impl ClientCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Client> {
		if let Some(client) = self.clients.get(config) {
			debug!("Reusing cached client for {}", config.endpoint);
			return Ok(client.value().clone());
		}

		let client = build_client(config)?;
		match self.clients.entry(config.clone()) {
			// Another task built one first
			Entry::Occupied(entry) => Ok(entry.get().clone()),
			Entry::Vacant(entry) => {
				debug!("Cached new client for {}", config.endpoint);
				Ok(entry.insert(client).clone())
			},
		}
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}

fn build_client(config: &ClientConfig) -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	for (name, value) in &config.headers {
		if let (Ok(name), Ok(value)) = (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			headers.insert(name, value);
		}
	}

	let mut builder = ClientBuilder::new()
		.user_agent(USER_AGENT)
		.default_headers(headers)
		.pool_max_idle_per_host(config.max_idle_per_host)
		.tcp_keepalive(Duration::from_secs(60));
	if let Some(timeout_ms) = config.timeout_ms {
		builder = builder.timeout(Duration::from_millis(timeout_ms));
	}

	builder.build().map_err(AdapterError::HttpError)
}

lazy_static::lazy_static! {
	static ref GLOBAL_CLIENT_CACHE: ClientCache = ClientCache::new();
}

/// Process-wide cache used by the adapters' default constructors
pub fn global_client_cache() -> &'static ClientCache {
	&GLOBAL_CLIENT_CACHE
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_same_config_shares_client() {
		let cache = ClientCache::new();
		let config = ClientConfig::new("http://127.0.0.1:3000").with_timeout_ms(500);

		cache.get_client(&config).unwrap();
		cache.get_client(&config).unwrap();
		assert_eq!(cache.len(), 1);

		let other = config.clone().with_header("X-Trace", "1");
		cache.get_client(&other).unwrap();
		assert_eq!(cache.len(), 2);
	}
}
