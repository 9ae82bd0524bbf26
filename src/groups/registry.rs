//! Explicit table from group source type names to constructors.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	groups::{FileGroups, GroupLookup, StaticGroups},
};

/// Constructor that turns a source-specific config block into a lookup.
pub type OpenSourceFn = fn(&JsonValue) -> Result<Box<dyn GroupLookup>, ConfigError>;

/// Registry of known group source types.
///
/// [`Default`] registers `mock` ([`StaticGroups`]) and `yaml` ([`FileGroups`]). The table is
/// passed explicitly to [`Config::open`](crate::config::Config::open) rather than living in
/// process-wide state.
#[derive(Clone)]
pub struct GroupSourceRegistry {
	constructors: HashMap<String, OpenSourceFn>,
}
impl GroupSourceRegistry {
	/// Creates a registry without any entries.
	pub fn empty() -> Self {
		Self { constructors: HashMap::new() }
	}

	/// Registers (or replaces) the constructor used for `kind`.
	pub fn register(mut self, kind: impl Into<String>, open: OpenSourceFn) -> Self {
		self.constructors.insert(kind.into(), open);

		self
	}

	/// Whether a constructor is registered for `kind`.
	pub fn contains(&self, kind: &str) -> bool {
		self.constructors.contains_key(kind)
	}

	/// Registered type names, sorted.
	pub fn kinds(&self) -> Vec<&str> {
		let mut kinds: Vec<_> = self.constructors.keys().map(String::as_str).collect();

		kinds.sort_unstable();

		kinds
	}

	/// Opens a lookup of type `kind` from its config block.
	pub fn open(&self, kind: &str, block: &JsonValue) -> Result<Box<dyn GroupLookup>, ConfigError> {
		let open = self
			.constructors
			.get(kind)
			.ok_or_else(|| ConfigError::UnknownSourceType { kind: kind.to_owned() })?;

		open(block)
	}
}
impl Default for GroupSourceRegistry {
	fn default() -> Self {
		Self::empty().register(StaticGroups::KIND, open_static).register(FileGroups::KIND, open_file)
	}
}
impl Debug for GroupSourceRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GroupSourceRegistry").field("kinds", &self.kinds()).finish()
	}
}

fn open_static(block: &JsonValue) -> Result<Box<dyn GroupLookup>, ConfigError> {
	Ok(Box::new(StaticGroups::from_config(block)?))
}

fn open_file(block: &JsonValue) -> Result<Box<dyn GroupLookup>, ConfigError> {
	Ok(Box::new(FileGroups::from_config(block)?))
}
