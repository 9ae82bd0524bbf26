//! Connector configuration blocks and environment expansion.

// std
use std::{env, sync::LazyLock};
// crates.io
use regex_lite::{Captures, Regex};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, config, error::ConfigError};

static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))")
		.expect("Environment reference pattern should compile.")
});

/// Connector entry as it appears in the configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
	/// Registry type name (e.g., `mockCallback`, `ldap`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Human-readable connector name.
	#[serde(default)]
	pub name: String,
	/// Connector identifier.
	#[serde(default)]
	pub id: String,
	/// Opaque, type-specific settings.
	#[serde(default)]
	pub config: JsonValue,
}
impl ConnectorConfig {
	/// Decodes the config block into the factory's settings type.
	///
	/// `$NAME` and `${NAME}` references are expanded from the process environment before
	/// decoding; unset variables expand to an empty string.
	pub fn decode<T>(&self) -> Result<T, ConfigError>
	where
		T: DeserializeOwned,
	{
		let expanded = if self.config.is_null() {
			JsonValue::Object(Default::default())
		} else {
			let text = expand_env(&self.config.to_string());

			serde_json::from_str(&text).map_err(|e| ConfigError::ConnectorOpen {
				id: self.id.clone(),
				reason: format!("config block is not valid JSON after expansion: {e}"),
			})?
		};

		config::decode_block(&expanded)
			.map_err(|source| ConfigError::InvalidConnectorConfig { id: self.id.clone(), source })
	}
}

/// Replaces `$NAME` and `${NAME}` references with values from the process environment.
pub fn expand_env(text: &str) -> String {
	ENV_REFERENCE
		.replace_all(text, |caps: &Captures| {
			let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or_default();

			env::var(name).unwrap_or_default()
		})
		.into_owned()
}
