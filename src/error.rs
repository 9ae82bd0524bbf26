//! Crate-level error types shared by connectors, group sources, and the augmenter.

// std
use std::{io, path::PathBuf};
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Open-time configuration problem; the connector was not built.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A group source failed while serving a request.
	#[error(transparent)]
	Lookup(#[from] LookupError),
	/// The wrapped connector rejected or failed the authentication step.
	#[error(transparent)]
	Connector(#[from] ConnectorError),
}

/// Failures raised while parsing configuration and opening connectors or group sources.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The top-level document could not be decoded.
	#[error("Configuration document is malformed.")]
	Document {
		/// Underlying decoding failure.
		#[source]
		source: BoxError,
	},
	/// No factory is registered for the connector type.
	#[error("Unknown connector type `{kind}`.")]
	UnknownConnectorType {
		/// Requested connector type name.
		kind: String,
	},
	/// No constructor is registered for the group source type.
	#[error("Unknown group source type `{kind}`.")]
	UnknownSourceType {
		/// Requested group source type name.
		kind: String,
	},
	/// The connector's config block could not be decoded into the factory's config type.
	#[error("Connector `{id}` has an invalid config block.")]
	InvalidConnectorConfig {
		/// Connector identifier.
		id: String,
		/// Field-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The group source's config block could not be decoded.
	#[error("Group source `{kind}` has an invalid config block.")]
	InvalidSourceConfig {
		/// Group source type name.
		kind: String,
		/// Field-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The connector factory refused to open.
	#[error("Failed to open connector `{id}`: {reason}.")]
	ConnectorOpen {
		/// Connector identifier.
		id: String,
		/// Factory-supplied reason string.
		reason: String,
	},
	/// One entry of the group source list failed to open.
	#[error("Group source #{index} (`{kind}`) failed to open.")]
	GroupSource {
		/// Position of the entry in the configured list.
		index: usize,
		/// Group source type name.
		kind: String,
		/// Failure reported while opening the entry.
		#[source]
		source: Box<ConfigError>,
	},
	/// A file-backed group source was configured without a file name.
	#[error("File-backed group source must specify a filename.")]
	MissingFileName,
	/// The group file could not be opened or read.
	#[error("Cannot read group file {}.", path.display())]
	GroupFileRead {
		/// Configured file path.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: io::Error,
	},
	/// The group file is not a mapping from email to a list of group names.
	#[error("Cannot decode group file {}.", path.display())]
	GroupFileParse {
		/// Configured file path.
		path: PathBuf,
		/// Underlying YAML failure.
		#[source]
		source: serde_yaml::Error,
	},
}
impl ConfigError {
	/// Wraps a document decoding failure (YAML or JSON) inside [`ConfigError`].
	pub fn document(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Document { source: Box::new(src) }
	}
}

/// Request-time failure surfaced by a [`GroupLookup`](crate::groups::GroupLookup).
///
/// Only the current augmentation call is aborted; the connector stays usable.
#[derive(Debug, ThisError)]
pub enum LookupError {
	/// The backing system failed to answer.
	#[error("Group source backend failed: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
		/// Underlying failure, when available.
		#[source]
		source: Option<BoxError>,
	},
}
impl LookupError {
	/// Builds a backend failure from a message alone.
	pub fn backend(message: impl Into<String>) -> Self {
		Self::Backend { message: message.into(), source: None }
	}

	/// Builds a backend failure that keeps the original error as its source.
	pub fn backend_with_source(
		message: impl Into<String>,
		src: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::Backend { message: message.into(), source: Some(Box::new(src)) }
	}
}

/// Authentication failure reported by a base connector.
///
/// Wrappers pass these through untouched.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConnectorError {
	/// The upstream identity provider rejected the request.
	#[error("Upstream rejected the request: {reason}.")]
	Rejected {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// The connector could not reach or understand its upstream.
	#[error("Connector backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
