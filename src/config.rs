//! Top-level configuration: a base connector block plus an ordered list of group sources.
//!
//! ```yaml
//! connector:
//!   type: mockCallback
//!   name: Mock
//!   id: mock
//! groupsources:
//!   - type: mock
//!     prefix: v1-
//!     config:
//!       groups: [one, two]
//!   - type: yaml
//!     config:
//!       filename: /etc/dex/groups.yaml
//! ```

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	augment::{GroupAugmenter, GroupSource},
	connector::{Connector, ConnectorConfig, ConnectorFactory, ConnectorRegistry},
	error::ConfigError,
	groups::{GroupSourceConfig, GroupSourceRegistry},
	obs, wrapper,
};

/// Settings for a connector that adds extra groups to another connector's identities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
	/// The wrapped base connector.
	pub connector: ConnectorConfig,
	/// Group sources, applied in order.
	#[serde(default, rename = "groupsources")]
	pub group_sources: Vec<GroupSourceConfig>,
}
impl Config {
	/// Parses a YAML document.
	pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
		serde_yaml::from_str(text).map_err(ConfigError::document)
	}

	/// Parses a JSON document.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		serde_json::from_str(text).map_err(ConfigError::document)
	}

	/// Builds the augmenter from the configured group sources.
	pub fn build_augmenter(
		&self,
		sources: &GroupSourceRegistry,
	) -> Result<GroupAugmenter, ConfigError> {
		self.group_sources
			.iter()
			.enumerate()
			.map(|(index, gs)| {
				let lookup = sources.open(&gs.kind, &gs.config).map_err(|e| {
					ConfigError::GroupSource { index, kind: gs.kind.clone(), source: Box::new(e) }
				})?;

				Ok(GroupSource::boxed(gs.prefix.clone(), lookup))
			})
			.collect::<Result<Vec<_>, ConfigError>>()
			.map(GroupAugmenter::new)
	}

	/// Opens the base connector, builds the augmenter, and returns the wrapped connector.
	///
	/// Nothing is returned unless every step succeeds.
	pub fn open(
		&self,
		connectors: &ConnectorRegistry,
		sources: &GroupSourceRegistry,
	) -> Result<Connector, ConfigError> {
		let base = connectors.open(&self.connector)?;
		let augmenter = self.build_augmenter(sources)?;

		obs::trace_connector_opened(&self.connector.id, base.kind(), augmenter.len());

		Ok(wrapper::wrap(base, augmenter))
	}
}
impl ConnectorFactory for Config {
	/// Opens with the default registries so the wrapper can itself be registered as a connector
	/// type.
	fn build(self, _id: &str) -> Result<Connector, ConfigError> {
		Config::open(&self, &ConnectorRegistry::default(), &GroupSourceRegistry::default())
	}
}

/// Decodes an opaque config block, treating `null` as an empty object.
pub(crate) fn decode_block<T>(
	block: &JsonValue,
) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	if block.is_null() {
		serde_path_to_error::deserialize(&JsonValue::Object(Default::default()))
	} else {
		serde_path_to_error::deserialize(block)
	}
}
