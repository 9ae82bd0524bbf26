//! Static group source that hands every identity the same list.

// self
use crate::{
	_prelude::*,
	config,
	connector::Identity,
	error::ConfigError,
	groups::{GroupLookup, LookupFuture},
};

#[derive(Debug, Deserialize)]
struct StaticGroupsConfig {
	#[serde(default)]
	groups: Option<Vec<String>>,
}

/// Returns a fixed list of groups regardless of the identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticGroups {
	groups: Vec<String>,
}
impl StaticGroups {
	/// Registry type name.
	pub const KIND: &'static str = "mock";

	/// Creates a source returning `groups` for every identity.
	pub fn new<I, S>(groups: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { groups: groups.into_iter().map(Into::into).collect() }
	}

	/// Builds the source from a `{ groups: [...] }` block; a missing list means no groups.
	pub fn from_config(block: &JsonValue) -> Result<Self, ConfigError> {
		let settings: StaticGroupsConfig = config::decode_block(block).map_err(|source| {
			ConfigError::InvalidSourceConfig { kind: Self::KIND.into(), source }
		})?;

		Ok(Self { groups: settings.groups.unwrap_or_default() })
	}

	/// Configured groups.
	pub fn groups(&self) -> &[String] {
		&self.groups
	}
}
impl GroupLookup for StaticGroups {
	fn lookup<'a>(&'a self, _identity: &'a Identity) -> LookupFuture<'a> {
		Box::pin(async move { Ok(self.groups.clone()) })
	}
}
