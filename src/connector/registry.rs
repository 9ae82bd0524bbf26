//! Explicit table from connector type names to factories.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	connector::{
		Connector, ConnectorConfig,
		mock::{MockCallbackConfig, MockPasswordConfig, MockSamlConfig},
	},
	error::ConfigError,
};

type OpenFn = fn(&ConnectorConfig) -> Result<Connector, ConfigError>;

/// Settings type that knows how to open a concrete connector.
///
/// The registry decodes the connector's config block into `Self` and then calls
/// [`build`](Self::build).
pub trait ConnectorFactory
where
	Self: DeserializeOwned,
{
	/// Consumes the decoded settings and returns the opened connector.
	fn build(self, id: &str) -> Result<Connector, ConfigError>;
}

/// Registry of known connector types.
///
/// [`Default`] registers the built-in mock connectors; embedders add real upstream
/// connectors with [`register`](Self::register).
#[derive(Clone)]
pub struct ConnectorRegistry {
	factories: HashMap<String, OpenFn>,
}
impl ConnectorRegistry {
	/// Creates a registry without any entries.
	pub fn empty() -> Self {
		Self { factories: HashMap::new() }
	}

	/// Registers (or replaces) the factory used for `kind`.
	pub fn register<F>(mut self, kind: impl Into<String>) -> Self
	where
		F: ConnectorFactory,
	{
		self.factories.insert(kind.into(), open_with::<F>);

		self
	}

	/// Whether a factory is registered for `kind`.
	pub fn contains(&self, kind: &str) -> bool {
		self.factories.contains_key(kind)
	}

	/// Registered type names, sorted.
	pub fn kinds(&self) -> Vec<&str> {
		let mut kinds: Vec<_> = self.factories.keys().map(String::as_str).collect();

		kinds.sort_unstable();

		kinds
	}

	/// Decodes the config block with the matching factory and opens the connector.
	pub fn open(&self, config: &ConnectorConfig) -> Result<Connector, ConfigError> {
		let open = self
			.factories
			.get(&config.kind)
			.ok_or_else(|| ConfigError::UnknownConnectorType { kind: config.kind.clone() })?;

		open(config)
	}
}
impl Default for ConnectorRegistry {
	fn default() -> Self {
		Self::empty()
			.register::<MockCallbackConfig>("mockCallback")
			.register::<MockPasswordConfig>("mockPassword")
			.register::<MockSamlConfig>("mockSaml")
	}
}
impl Debug for ConnectorRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConnectorRegistry").field("kinds", &self.kinds()).finish()
	}
}

fn open_with<F>(config: &ConnectorConfig) -> Result<Connector, ConfigError>
where
	F: ConnectorFactory,
{
	config.decode::<F>()?.build(&config.id)
}
