//! Vault Configuration
//!
//! Settings, loading and startup logging for the vault deposit workspace.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from};
pub use settings::{
	ConfigValidationError, ContractSettings, LogFormat, LoggingSettings, NetworkSettings,
	PriceSettings, RoutingSettings, ServerSettings, Settings, WalletSettings,
};
pub use startup_logger::{
	log_deployment, log_service_info, log_service_shutdown, log_startup_complete,
};
