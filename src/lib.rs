//! Decorate any identity connector with extra group memberships pulled from pluggable sources,
//! then hand back a connector with exactly the capability the original one exposed.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod augment;
pub mod config;
pub mod connector;
pub mod error;
pub mod groups;
pub mod obs;
pub mod wrapper;

mod _prelude {
	pub use std::{
		collections::{HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
	};

	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use augment::{GroupAugmenter, GroupSource};
pub use config::Config;
pub use connector::{
	CallbackConnector, CapabilityKind, Connector, ConnectorRegistry, Identity,
	PasswordConnector, SamlConnector, Scopes,
};
pub use error::{ConfigError, ConnectorError, LookupError};
pub use groups::{GroupLookup, GroupSourceRegistry};
pub use url;
#[cfg(test)] use color_eyre as _;
