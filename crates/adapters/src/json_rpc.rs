//! Minimal JSON-RPC 2.0 client over HTTP

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};
use tracing::debug;
use url::Url;

use crate::{AdapterError, AdapterResult, ClientCache, ClientConfig};

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P> {
	jsonrpc: &'static str,
	id: u64,
	method: &'a str,
	params: P,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
	code: i64,
	message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<RpcErrorObject>,
}

/// Cloneable handle to a JSON-RPC endpoint; clones share the request id counter
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
	client: Client,
	endpoint: Url,
	next_id: Arc<AtomicU64>,
}

impl JsonRpcClient {
	pub fn new(endpoint: &str, timeout_ms: Option<u64>, cache: &ClientCache) -> AdapterResult<Self> {
		let url = Url::parse(endpoint).map_err(|e| AdapterError::InvalidEndpoint {
			endpoint: endpoint.to_string(),
			reason: e.to_string(),
		})?;

		let mut config = ClientConfig::new(url.as_str());
		if let Some(timeout_ms) = timeout_ms {
			config = config.with_timeout_ms(timeout_ms);
		}

		Ok(Self {
			client: cache.get_client(&config)?,
			endpoint: url,
			next_id: Arc::new(AtomicU64::new(1)),
		})
	}

	pub fn endpoint(&self) -> &str {
		self.endpoint.as_str()
	}

	/// Call `method` and decode its `result`; a `null` result decodes into `Option::None`
	pub async fn request<P, R>(&self, method: &str, params: P) -> AdapterResult<R>
	where
		P: Serialize + Send,
		R: DeserializeOwned,
	{
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		debug!("JSON-RPC {} #{} -> {}", method, id, self.endpoint);

		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&RpcRequest {
				jsonrpc: "2.0",
				id,
				method,
				params,
			})
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::HttpFailure {
				status: status.as_u16(),
				message: status.canonical_reason().unwrap_or("unknown").to_string(),
			});
		}

		let body: RpcResponse = response.json().await.map_err(|e| {
			AdapterError::invalid_response(format!("Malformed JSON-RPC response to {}: {}", method, e))
		})?;

		if let Some(error) = body.error {
			debug!("JSON-RPC {} #{} failed with code {}", method, id, error.code);
			return Err(AdapterError::Rpc {
				code: error.code,
				message: error.message,
			});
		}

		serde_json::from_value(body.result.unwrap_or(Value::Null)).map_err(|e| {
			AdapterError::invalid_response(format!("Unexpected result for {}: {}", method, e))
		})
	}
}
