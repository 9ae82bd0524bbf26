//! Capability contracts implemented by connectors.
//!
//! A connector exposes exactly one of three interaction shapes: a redirect callback flow, a
//! SAML POST binding, or a direct username/password login. [`Connector`] is the closed sum type
//! over those shapes; callers match on it (or use the `as_*` views) the same way they would
//! for any other connector.

// self
use crate::{
	_prelude::*,
	connector::{Identity, Scopes},
};

/// Boxed future returned by the I/O-bound connector hooks.
pub type ConnectorFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Connector that drives an OAuth-style redirect flow.
pub trait CallbackConnector
where
	Self: Send + Sync,
{
	/// Builds the upstream URL the user is redirected to.
	///
	/// Implementations should request upstream scopes based on what the downstream client
	/// asked for (e.g., ask for a refresh token only when `offline_access` is set).
	fn login_url(&self, scopes: Scopes, callback_url: &Url, state: &str) -> Result<Url>;

	/// Handles the redirect back from the upstream provider and returns the identity.
	fn handle_callback<'a>(
		&'a self,
		scopes: Scopes,
		request: &'a CallbackRequest,
	) -> ConnectorFuture<'a, Identity>;
}

/// Connector that implements the SAML 2.0 HTTP POST binding.
///
/// RelayState is handled by the caller.
pub trait SamlConnector
where
	Self: Send + Sync,
{
	/// Returns the SSO URL and the encoded SAML request the caller renders into a POST form.
	///
	/// The request ID must be embedded in the serialized request.
	fn post_data(&self, scopes: Scopes, request_id: &str) -> Result<SamlRequest>;

	/// Decodes, verifies, and maps attributes from the SAML response.
	///
	/// `in_response_to` is the expected value of the response's `InResponseTo` field.
	fn handle_post<'a>(
		&'a self,
		scopes: Scopes,
		saml_response: &'a str,
		in_response_to: &'a str,
	) -> ConnectorFuture<'a, Identity>;
}

/// Connector that verifies a username and password directly.
pub trait PasswordConnector
where
	Self: Send + Sync,
{
	/// Checks the credentials and returns the identity when they are valid.
	fn login<'a>(
		&'a self,
		scopes: Scopes,
		username: &'a str,
		password: &'a str,
	) -> ConnectorFuture<'a, LoginOutcome>;
}

/// Inbound redirect request handed to [`CallbackConnector::handle_callback`].
///
/// Only the request URL is carried so connectors stay independent of any HTTP server crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackRequest {
	/// Full request URL including the query string.
	pub url: Url,
}
impl CallbackRequest {
	/// Wraps the callback URL received by the server.
	pub fn new(url: Url) -> Self {
		Self { url }
	}

	/// Returns the first value of the named query parameter.
	pub fn query(&self, key: &str) -> Option<String> {
		self.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
	}
}

/// Values required to render a SAML POST form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamlRequest {
	/// Identity provider SSO endpoint.
	pub sso_url: Url,
	/// Encoded `SAMLRequest` form value.
	pub saml_request: String,
}

/// Result of a password login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
	/// Credentials were accepted.
	Authenticated(Identity),
	/// Credentials were rejected; not an error.
	InvalidPassword,
}
impl LoginOutcome {
	/// Returns the identity when the credentials were accepted.
	pub fn identity(&self) -> Option<&Identity> {
		match self {
			LoginOutcome::Authenticated(identity) => Some(identity),
			LoginOutcome::InvalidPassword => None,
		}
	}
}

/// Capability variants a connector can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
	/// Redirect callback flow.
	Callback,
	/// SAML POST binding.
	Saml,
	/// Direct username/password login.
	Password,
}
impl CapabilityKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CapabilityKind::Callback => "callback",
			CapabilityKind::Saml => "saml",
			CapabilityKind::Password => "password",
		}
	}
}
impl Display for CapabilityKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// An opened connector, tagged with the single capability it exposes.
pub enum Connector {
	/// Redirect callback flow.
	Callback(Box<dyn CallbackConnector>),
	/// SAML POST binding.
	Saml(Box<dyn SamlConnector>),
	/// Direct username/password login.
	Password(Box<dyn PasswordConnector>),
}
impl Connector {
	/// Boxes a callback-capable connector.
	pub fn callback(connector: impl 'static + CallbackConnector) -> Self {
		Self::Callback(Box::new(connector))
	}

	/// Boxes a SAML-capable connector.
	pub fn saml(connector: impl 'static + SamlConnector) -> Self {
		Self::Saml(Box::new(connector))
	}

	/// Boxes a password-capable connector.
	pub fn password(connector: impl 'static + PasswordConnector) -> Self {
		Self::Password(Box::new(connector))
	}

	/// Capability exposed by this connector.
	pub fn kind(&self) -> CapabilityKind {
		match self {
			Connector::Callback(_) => CapabilityKind::Callback,
			Connector::Saml(_) => CapabilityKind::Saml,
			Connector::Password(_) => CapabilityKind::Password,
		}
	}

	/// Returns the callback view when this connector drives a redirect flow.
	pub fn as_callback(&self) -> Option<&dyn CallbackConnector> {
		match self {
			Connector::Callback(c) => Some(c.as_ref()),
			_ => None,
		}
	}

	/// Returns the SAML view when this connector implements the POST binding.
	pub fn as_saml(&self) -> Option<&dyn SamlConnector> {
		match self {
			Connector::Saml(c) => Some(c.as_ref()),
			_ => None,
		}
	}

	/// Returns the password view when this connector verifies credentials directly.
	pub fn as_password(&self) -> Option<&dyn PasswordConnector> {
		match self {
			Connector::Password(c) => Some(c.as_ref()),
			_ => None,
		}
	}
}
impl Debug for Connector {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Connector({})", self.kind())
	}
}
