//! Connector-facing boundary: identities, capability contracts, configuration, and the
//! type-name registry used to open base connectors.
//!
//! `capability` defines the three interaction shapes a connector may expose and the closed
//! [`Connector`] sum type over them. `registry` maps connector type names onto
//! [`ConnectorFactory`] implementations, and `mock` ships the built-in test connectors.

pub mod capability;
pub mod config;
pub mod identity;
pub mod mock;
pub mod registry;

pub use capability::*;
pub use config::*;
pub use identity::*;
pub use registry::*;
