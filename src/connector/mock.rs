//! Built-in mock connectors for tests, demos, and fixed-identity deployments.

// self
use crate::{
	_prelude::*,
	connector::{
		CallbackConnector, CallbackRequest, Connector, ConnectorFactory, ConnectorFuture,
		Identity, LoginOutcome, PasswordConnector, SamlConnector, SamlRequest, Scopes,
	},
	error::{ConfigError, ConnectorError},
};

const MOCK_USER_ID: &str = "0-385-28089-0";
const MOCK_USERNAME: &str = "Kilgore Trout";
const MOCK_EMAIL: &str = "kilgore@kilgore.trout";
const MOCK_SSO_URL: &str = "https://idp.example.com/sso";

fn mock_identity(groups: &[&str]) -> Identity {
	Identity {
		user_id: MOCK_USER_ID.into(),
		username: MOCK_USERNAME.into(),
		email: MOCK_EMAIL.into(),
		email_verified: true,
		groups: groups.iter().map(|g| (*g).to_owned()).collect(),
		connector_data: b"foobar".to_vec(),
	}
}

/// Settings for the `mockCallback` connector; accepts no fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockCallbackConfig {}
impl ConnectorFactory for MockCallbackConfig {
	fn build(self, _id: &str) -> Result<Connector, ConfigError> {
		Ok(Connector::callback(MockCallback::default()))
	}
}

/// Redirect connector that always authenticates the same user.
///
/// A callback carrying an `error` query parameter is rejected with that value.
#[derive(Clone, Debug)]
pub struct MockCallback {
	identity: Identity,
}
impl MockCallback {
	/// Overrides the identity returned from every callback.
	pub fn with_identity(identity: Identity) -> Self {
		Self { identity }
	}
}
impl Default for MockCallback {
	fn default() -> Self {
		Self { identity: mock_identity(&["authors"]) }
	}
}
impl CallbackConnector for MockCallback {
	fn login_url(&self, _scopes: Scopes, callback_url: &Url, state: &str) -> Result<Url> {
		let mut url = callback_url.clone();

		url.query_pairs_mut().append_pair("state", state);

		Ok(url)
	}

	fn handle_callback<'a>(
		&'a self,
		_scopes: Scopes,
		request: &'a CallbackRequest,
	) -> ConnectorFuture<'a, Identity> {
		Box::pin(async move {
			match request.query("error") {
				Some(reason) => Err(ConnectorError::Rejected { reason }.into()),
				None => Ok(self.identity.clone()),
			}
		})
	}
}

/// Settings for the `mockPassword` connector.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MockPasswordConfig {
	/// Accepted username.
	#[serde(default)]
	pub username: String,
	/// Accepted password.
	#[serde(default)]
	pub password: String,
}
impl ConnectorFactory for MockPasswordConfig {
	fn build(self, id: &str) -> Result<Connector, ConfigError> {
		if self.username.is_empty() {
			return Err(ConfigError::ConnectorOpen {
				id: id.to_owned(),
				reason: "no username supplied".into(),
			});
		}
		if self.password.is_empty() {
			return Err(ConfigError::ConnectorOpen {
				id: id.to_owned(),
				reason: "no password supplied".into(),
			});
		}

		Ok(Connector::password(MockPassword { username: self.username, password: self.password }))
	}
}

/// Password connector that accepts exactly one username/password pair.
#[derive(Clone)]
pub struct MockPassword {
	username: String,
	password: String,
}
impl MockPassword {
	/// Creates a connector accepting the provided credentials.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: password.into() }
	}
}
impl Debug for MockPassword {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MockPassword").field("username", &self.username).finish()
	}
}
impl PasswordConnector for MockPassword {
	fn login<'a>(
		&'a self,
		_scopes: Scopes,
		username: &'a str,
		password: &'a str,
	) -> ConnectorFuture<'a, LoginOutcome> {
		Box::pin(async move {
			if username == self.username && password == self.password {
				let mut identity = mock_identity(&[]);

				identity.connector_data.clear();

				Ok(LoginOutcome::Authenticated(identity))
			} else {
				Ok(LoginOutcome::InvalidPassword)
			}
		})
	}
}

/// Settings for the `mockSaml` connector.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MockSamlConfig {
	/// SSO endpoint advertised in the POST form; defaults to `https://idp.example.com/sso`.
	#[serde(default)]
	pub sso_url: Option<String>,
}
impl ConnectorFactory for MockSamlConfig {
	fn build(self, id: &str) -> Result<Connector, ConfigError> {
		let raw = self.sso_url.as_deref().unwrap_or(MOCK_SSO_URL);
		let sso_url = Url::parse(raw).map_err(|e| ConfigError::ConnectorOpen {
			id: id.to_owned(),
			reason: format!("invalid SSO URL `{raw}`: {e}"),
		})?;

		Ok(Connector::saml(MockSaml { sso_url }))
	}
}

/// SAML connector that accepts any response answering a known request.
#[derive(Clone, Debug)]
pub struct MockSaml {
	sso_url: Url,
}
impl MockSaml {
	/// Creates a connector advertising the provided SSO endpoint.
	pub fn new(sso_url: Url) -> Self {
		Self { sso_url }
	}
}
impl SamlConnector for MockSaml {
	fn post_data(&self, _scopes: Scopes, request_id: &str) -> Result<SamlRequest> {
		Ok(SamlRequest { sso_url: self.sso_url.clone(), saml_request: format!("mock:{request_id}") })
	}

	fn handle_post<'a>(
		&'a self,
		_scopes: Scopes,
		saml_response: &'a str,
		in_response_to: &'a str,
	) -> ConnectorFuture<'a, Identity> {
		Box::pin(async move {
			if in_response_to.is_empty() {
				return Err(ConnectorError::Rejected { reason: "missing InResponseTo".into() }.into());
			}
			if saml_response.is_empty() {
				return Err(ConnectorError::Rejected { reason: "empty SAML response".into() }.into());
			}

			Ok(mock_identity(&["saml-users"]))
		})
	}
}
