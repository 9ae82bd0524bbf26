//! Identity claims produced by connectors.

// self
use crate::_prelude::*;

/// Additional data requested by the downstream client about the end user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scopes {
	/// The client requested a refresh token.
	pub offline_access: bool,
	/// The client requested group information.
	pub groups: bool,
}

/// Authenticated user record passed between connectors and their callers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	/// Stable user identifier at the upstream provider.
	pub user_id: String,
	/// Display name.
	pub username: String,
	/// Email address; group tables are keyed on this value.
	pub email: String,
	/// Whether the upstream verified the email address.
	pub email_verified: bool,
	/// Group memberships in caller-visible order.
	pub groups: Vec<String>,
	/// Connector-private state for subsequent requests, never shared with clients.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub connector_data: Vec<u8>,
}
impl Identity {
	/// Replaces the group list, leaving every other claim untouched.
	pub fn with_groups(mut self, groups: Vec<String>) -> Self {
		self.groups = groups;

		self
	}
}
