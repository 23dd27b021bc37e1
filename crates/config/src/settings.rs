//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use vault_types::constants::{
	AVALANCHE_C_CHAIN_ID, AVALANCHE_C_CHAIN_NAME, DEFAULT_EVENT_POLL_MS, DEFAULT_EXPLORER_URL,
	DEFAULT_PRICE_REFRESH_MS, DEFAULT_RECEIPT_POLL_MS, DEFAULT_ROUTING_TIMEOUT_MS, DEFAULT_RPC_URL,
	MAX_ROUTE_STEPS, MAX_ROUTING_TIMEOUT_MS, MIN_ROUTING_TIMEOUT_MS, SAVAX_ADDRESS, WAVAX_ADDRESS,
	YAK_ROUTER_ADDRESS,
};
use vault_types::{Address, AssetSymbol, Network};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub network: NetworkSettings,
	pub contracts: ContractSettings,
	pub routing: RoutingSettings,
	pub wallet: WalletSettings,
	pub prices: PriceSettings,
	pub logging: LoggingSettings,
}

/// Path-finding server bind configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// The one supported chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NetworkSettings {
	pub chain_id: u64,
	pub name: String,
	/// JSON-RPC endpoint the path-finding service reads the router through
	pub rpc_url: ConfigurableValue,
	/// Block explorer base URL for transaction links
	pub explorer_url: String,
}

/// Deployed contract addresses
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContractSettings {
	/// Vault receiving deposits; deployment specific, no default
	pub vault: Address,
	/// Wrapped native asset (WAVAX)
	pub wrapped_asset: Address,
	/// Aggregator router queried for routes
	pub router: Address,
	/// Asset the vault holds (sAVAX)
	pub target_asset: Address,
}

/// Routing service client configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoutingSettings {
	/// Full URL of the findBestPath endpoint
	pub endpoint: String,
	pub timeout_ms: u64,
	pub max_steps: usize,
}

/// JSON-RPC wallet bridge configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletSettings {
	pub endpoint: String,
	pub receipt_poll_ms: u64,
	pub event_poll_ms: u64,
}

/// Token price refresh configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PriceSettings {
	pub refresh_interval_ms: u64,
	/// Placeholder USD prices keyed by symbol
	pub static_prices: HashMap<String, f64>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Problems found by [`Settings::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid URL for {field}: {reason}")]
	InvalidUrl { field: String, reason: String },

	#[error("{field} must be between {min}ms and {max}ms, got {value}ms")]
	TimeoutOutOfRange {
		field: String,
		value: u64,
		min: u64,
		max: u64,
	},

	#[error("routing.max_steps must be between 1 and {max}, got {value}")]
	InvalidMaxSteps { value: usize, max: usize },

	#[error("{field} must be a non-zero address")]
	ZeroAddress { field: String },

	#[error("network.chain_id must be non-zero")]
	InvalidChainId,

	#[error("{field} must be greater than zero")]
	ZeroInterval { field: String },

	#[error("Unknown price symbol '{0}'")]
	UnknownPriceSymbol(String),

	#[error("RPC URL could not be resolved: {0}")]
	RpcUrl(#[from] ConfigurableValueError),
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			network: NetworkSettings::default(),
			contracts: ContractSettings::default(),
			routing: RoutingSettings::default(),
			wallet: WalletSettings::default(),
			prices: PriceSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

impl Default for NetworkSettings {
	fn default() -> Self {
		Self {
			chain_id: AVALANCHE_C_CHAIN_ID,
			name: AVALANCHE_C_CHAIN_NAME.to_string(),
			rpc_url: ConfigurableValue::from_plain(DEFAULT_RPC_URL),
			explorer_url: DEFAULT_EXPLORER_URL.to_string(),
		}
	}
}

impl Default for ContractSettings {
	fn default() -> Self {
		Self {
			vault: Address::ZERO,
			wrapped_asset: WAVAX_ADDRESS,
			router: YAK_ROUTER_ADDRESS,
			target_asset: SAVAX_ADDRESS,
		}
	}
}

impl Default for RoutingSettings {
	fn default() -> Self {
		Self {
			endpoint: "http://127.0.0.1:3000/api/findBestPath".to_string(),
			timeout_ms: DEFAULT_ROUTING_TIMEOUT_MS,
			max_steps: MAX_ROUTE_STEPS,
		}
	}
}

impl Default for WalletSettings {
	fn default() -> Self {
		Self {
			endpoint: "http://127.0.0.1:1248".to_string(),
			receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
			event_poll_ms: DEFAULT_EVENT_POLL_MS,
		}
	}
}

impl Default for PriceSettings {
	fn default() -> Self {
		let mut static_prices = HashMap::new();
		static_prices.insert("AVAX".to_string(), 34.65);
		static_prices.insert("WAVAX".to_string(), 34.7);
		Self {
			refresh_interval_ms: DEFAULT_PRICE_REFRESH_MS,
			static_prices,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// The supported network as a domain model
	pub fn supported_network(&self) -> Network {
		Network::new(self.network.chain_id, self.network.name.clone())
	}

	/// Resolve the RPC URL (may read an environment variable)
	pub fn rpc_url(&self) -> Result<String, ConfigurableValueError> {
		self.network.rpc_url.resolve()
	}

	/// Placeholder prices keyed by asset
	pub fn static_prices(&self) -> Result<HashMap<AssetSymbol, f64>, ConfigValidationError> {
		self.prices
			.static_prices
			.iter()
			.map(|(symbol, price)| {
				symbol
					.parse::<AssetSymbol>()
					.map(|asset| (asset, *price))
					.map_err(|_| ConfigValidationError::UnknownPriceSymbol(symbol.clone()))
			})
			.collect()
	}

	/// Validate everything the path-finding service needs
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.network.chain_id == 0 {
			return Err(ConfigValidationError::InvalidChainId);
		}
		validate_url("network.explorer_url", &self.network.explorer_url)?;
		validate_url("routing.endpoint", &self.routing.endpoint)?;

		if !(MIN_ROUTING_TIMEOUT_MS..=MAX_ROUTING_TIMEOUT_MS).contains(&self.routing.timeout_ms) {
			return Err(ConfigValidationError::TimeoutOutOfRange {
				field: "routing.timeout_ms".to_string(),
				value: self.routing.timeout_ms,
				min: MIN_ROUTING_TIMEOUT_MS,
				max: MAX_ROUTING_TIMEOUT_MS,
			});
		}
		if self.routing.max_steps == 0 || self.routing.max_steps > MAX_ROUTE_STEPS {
			return Err(ConfigValidationError::InvalidMaxSteps {
				value: self.routing.max_steps,
				max: MAX_ROUTE_STEPS,
			});
		}

		non_zero("contracts.wrapped_asset", self.contracts.wrapped_asset)?;
		non_zero("contracts.router", self.contracts.router)?;
		non_zero("contracts.target_asset", self.contracts.target_asset)?;

		if self.prices.refresh_interval_ms == 0 {
			return Err(ConfigValidationError::ZeroInterval {
				field: "prices.refresh_interval_ms".to_string(),
			});
		}
		self.static_prices()?;
		Ok(())
	}

	/// Validate the additional settings a depositing client needs
	pub fn validate_client(&self) -> Result<(), ConfigValidationError> {
		self.validate()?;
		non_zero("contracts.vault", self.contracts.vault)?;
		validate_url("wallet.endpoint", &self.wallet.endpoint)?;
		if self.wallet.receipt_poll_ms == 0 {
			return Err(ConfigValidationError::ZeroInterval {
				field: "wallet.receipt_poll_ms".to_string(),
			});
		}
		if self.wallet.event_poll_ms == 0 {
			return Err(ConfigValidationError::ZeroInterval {
				field: "wallet.event_poll_ms".to_string(),
			});
		}
		Ok(())
	}
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigValidationError> {
	url::Url::parse(value)
		.map(|_| ())
		.map_err(|e| ConfigValidationError::InvalidUrl {
			field: field.to_string(),
			reason: e.to_string(),
		})
}

fn non_zero(field: &str, address: Address) -> Result<(), ConfigValidationError> {
	if address == Address::ZERO {
		Err(ConfigValidationError::ZeroAddress {
			field: field.to_string(),
		})
	} else {
		Ok(())
	}
}
