//! Values that can come from the environment or straight from the config file
//!
//! RPC endpoints often embed provider API keys, so they are configured as a
//! `ConfigurableValue` and never printed in full.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A configurable value that can be loaded from an environment variable or used as plain text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	/// "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Either the environment variable name or the actual value
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve an environment value, falling back to `default` when the variable is unset
	pub fn resolve_or(&self, default: &str) -> String {
		self.resolve().unwrap_or_else(|_| default.to_string())
	}
}

/// Errors that can occur when resolving configurable values
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

// Only the scheme and host of a plain URL are shown; paths and queries may carry keys
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => match url::Url::parse(&self.value) {
				Ok(url) => match url.host_str() {
					Some(host) => write!(f, "plain:{}://{}/[REDACTED]", url.scheme(), host),
					None => write!(f, "plain:[REDACTED]"),
				},
				Err(_) => write!(f, "plain:[REDACTED]"),
			},
		}
	}
}

impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	#[test]
	fn test_plain_value() {
		let config = ConfigurableValue::from_plain("https://rpc.example.com");
		assert_eq!(config.resolve().unwrap(), "https://rpc.example.com");
	}

	#[test]
	fn test_env_value() {
		env::set_var("VAULT_TEST_RPC_URL", "https://rpc.from-env.example");

		let config = ConfigurableValue::from_env("VAULT_TEST_RPC_URL");
		assert_eq!(config.resolve().unwrap(), "https://rpc.from-env.example");

		env::remove_var("VAULT_TEST_RPC_URL");
	}

	#[test]
	fn test_env_value_not_found() {
		let config = ConfigurableValue::from_env("VAULT_TEST_MISSING_VAR");
		assert_eq!(
			config.resolve(),
			Err(ConfigurableValueError::EnvironmentVariableNotFound(
				"VAULT_TEST_MISSING_VAR".to_string()
			))
		);
		assert_eq!(config.resolve_or("fallback"), "fallback");
	}

	#[test]
	fn test_from_string_conversion() {
		let plain = ConfigurableValue::from("https://rpc.example.com");
		assert_eq!(plain.value_type, ValueType::Plain);

		let env_config = ConfigurableValue::from("env:AVAX_RPC_URL");
		assert_eq!(env_config.value_type, ValueType::Env);
		assert_eq!(env_config.value, "AVAX_RPC_URL");
	}

	#[test]
	fn test_display_hides_keys() {
		let plain = ConfigurableValue::from_plain("https://rpc.example.com/v1/secret-key?token=abc");
		let shown = plain.to_string();
		assert_eq!(shown, "plain:https://rpc.example.com/[REDACTED]");
		assert!(!shown.contains("secret-key"));

		let env_config = ConfigurableValue::from_env("AVAX_RPC_URL");
		assert_eq!(env_config.to_string(), "env:AVAX_RPC_URL");
	}

	#[test]
	fn test_serde_shape() {
		let config = ConfigurableValue::from_env("AVAX_RPC_URL");
		let json = serde_json::to_string(&config).unwrap();
		assert!(json.contains("\"type\":\"env\""));
		assert!(json.contains("\"value\":\"AVAX_RPC_URL\""));
	}
}
