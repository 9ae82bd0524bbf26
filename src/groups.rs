//! Group source plugins: the [`GroupLookup`] contract, the built-in static and file-backed
//! sources, and the registry that opens them from configuration.

pub mod file;
pub mod fixed;
pub mod registry;

pub use file::*;
pub use fixed::*;
pub use registry::*;

// self
use crate::{_prelude::*, connector::Identity, error::LookupError};

/// Boxed future returned by [`GroupLookup::lookup`].
pub type LookupFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<String>, LookupError>> + 'a + Send>>;

/// Maps an identity onto the group names one data source holds for it.
///
/// Lookups may run concurrently for different requests against the same instance.
/// Implementations that keep mutable state (caches, connection pools) must synchronize it
/// themselves.
pub trait GroupLookup
where
	Self: Send + Sync,
{
	/// Returns the groups for `identity`, or an empty list when the source knows nothing about
	/// it.
	fn lookup<'a>(&'a self, identity: &'a Identity) -> LookupFuture<'a>;
}

/// Group source entry as it appears in the configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSourceConfig {
	/// Registry type name (e.g., `mock`, `yaml`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Prepended to every group this source contributes; may be empty.
	#[serde(default)]
	pub prefix: String,
	/// Opaque, type-specific settings.
	#[serde(default)]
	pub config: JsonValue,
}
