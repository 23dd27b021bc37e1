//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Load configuration from `config/config.*`, overlaid with `VAULT__*` environment variables
///
/// `VAULT__ROUTING__ENDPOINT=https://...` overrides `routing.endpoint`.
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

/// Load configuration from an explicit file stem (extension picks the format)
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(Environment::with_prefix("VAULT").separator("__"))
		.build()?;

	s.try_deserialize()
}
