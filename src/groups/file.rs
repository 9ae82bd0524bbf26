//! File-backed group source: an email → groups table read once from a YAML document.

// std
use std::{
	fs::File,
	io::Read,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	config,
	connector::Identity,
	error::ConfigError,
	groups::{GroupLookup, LookupFuture},
};

#[derive(Debug, Deserialize)]
struct FileGroupsConfig {
	#[serde(default)]
	filename: Option<PathBuf>,
}

/// Email address → group names, as loaded from a group file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupTable(HashMap<String, Vec<String>>);
impl GroupTable {
	/// Parses a YAML document whose top level maps email addresses to lists of group names.
	///
	/// An empty (or null) document yields an empty table.
	pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
		if text.trim().is_empty() {
			return Ok(Self::default());
		}

		let table: Option<HashMap<String, Vec<String>>> = serde_yaml::from_str(text)?;

		Ok(Self(table.unwrap_or_default()))
	}

	/// Groups recorded for `email`; matching is exact and case-sensitive.
	pub fn get(&self, email: &str) -> Option<&[String]> {
		self.0.get(email).map(Vec::as_slice)
	}

	/// Number of email entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl<K, V, S> FromIterator<(K, V)> for GroupTable
where
	K: Into<String>,
	V: IntoIterator<Item = S>,
	S: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(
			iter.into_iter()
				.map(|(email, groups)| (email.into(), groups.into_iter().map(Into::into).collect()))
				.collect(),
		)
	}
}

/// Looks identities up by email in a table loaded when the source is opened.
///
/// The file is never re-read; changes on disk take effect when the connector is rebuilt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileGroups {
	table: GroupTable,
}
impl FileGroups {
	/// Registry type name.
	pub const KIND: &'static str = "yaml";

	/// Wraps an already loaded table.
	pub fn from_table(table: GroupTable) -> Self {
		Self { table }
	}

	/// Builds the source from a `{ filename: ... }` block.
	pub fn from_config(block: &JsonValue) -> Result<Self, ConfigError> {
		let settings: FileGroupsConfig = config::decode_block(block).map_err(|source| {
			ConfigError::InvalidSourceConfig { kind: Self::KIND.into(), source }
		})?;

		Self::open(settings.filename.unwrap_or_default())
	}

	/// Reads and parses the group file eagerly.
	///
	/// The handle is released as soon as the content has been consumed, on every path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();

		if path.as_os_str().is_empty() {
			return Err(ConfigError::MissingFileName);
		}

		let file = File::open(path)
			.map_err(|source| ConfigError::GroupFileRead { path: path.to_owned(), source })?;
		let table = load_table(path, file)?;

		Ok(Self { table })
	}

	/// Loaded table.
	pub fn table(&self) -> &GroupTable {
		&self.table
	}
}
impl GroupLookup for FileGroups {
	fn lookup<'a>(&'a self, identity: &'a Identity) -> LookupFuture<'a> {
		Box::pin(async move {
			Ok(self.table.get(&identity.email).map(<[String]>::to_vec).unwrap_or_default())
		})
	}
}

fn load_table(path: &Path, mut src: impl Read) -> Result<GroupTable, ConfigError> {
	let mut text = String::new();

	src.read_to_string(&mut text)
		.map_err(|source| ConfigError::GroupFileRead { path: path.to_owned(), source })?;
	drop(src);

	GroupTable::parse(&text)
		.map_err(|source| ConfigError::GroupFileParse { path: path.to_owned(), source })
}
