//! Connector wrappers that augment the identity produced by a base connector.
//!
//! [`wrap`] inspects which capability the base connector exposes and returns a wrapper with the
//! same single capability. Non-authenticating hooks (`login_url`, `post_data`) delegate
//! untouched; authenticating hooks delegate and then run the [`GroupAugmenter`]. Failures from
//! the base connector, and rejected passwords, come back exactly as the base produced them.

// self
use crate::{
	_prelude::*,
	augment::GroupAugmenter,
	connector::{
		CallbackConnector, CallbackRequest, CapabilityKind, Connector, ConnectorFuture, Identity,
		LoginOutcome, PasswordConnector, SamlConnector, SamlRequest, Scopes,
	},
	obs::{self, AugmentOutcome, AugmentSpan},
};

/// Wraps `base` so every identity it produces gains the augmenter's groups.
///
/// The returned connector exposes the same capability as `base`.
pub fn wrap(base: Connector, augmenter: GroupAugmenter) -> Connector {
	match base {
		Connector::Callback(base) => Connector::callback(CallbackGroups { base, augmenter }),
		Connector::Saml(base) => Connector::saml(SamlGroups { base, augmenter }),
		Connector::Password(base) => Connector::password(PasswordGroups { base, augmenter }),
	}
}

async fn augment(
	augmenter: &GroupAugmenter,
	kind: CapabilityKind,
	identity: Identity,
) -> Result<Identity> {
	obs::record_augment_outcome(kind, AugmentOutcome::Attempt);

	match augmenter.add_groups(identity).await {
		Ok(identity) => {
			obs::record_augment_outcome(kind, AugmentOutcome::Success);

			Ok(identity)
		},
		Err(e) => {
			obs::record_augment_outcome(kind, AugmentOutcome::Failure);

			Err(e.into())
		},
	}
}

fn skipped<T>(kind: CapabilityKind, result: Result<T>) -> Result<T> {
	obs::record_augment_outcome(kind, AugmentOutcome::Skipped);

	result
}

/// Callback-flow wrapper.
pub struct CallbackGroups {
	base: Box<dyn CallbackConnector>,
	augmenter: GroupAugmenter,
}
impl CallbackGroups {
	/// Wraps a callback connector directly.
	pub fn new(base: impl 'static + CallbackConnector, augmenter: GroupAugmenter) -> Self {
		Self { base: Box::new(base), augmenter }
	}

	/// Augmenter applied after each successful callback.
	pub fn augmenter(&self) -> &GroupAugmenter {
		&self.augmenter
	}
}
impl CallbackConnector for CallbackGroups {
	fn login_url(&self, scopes: Scopes, callback_url: &Url, state: &str) -> Result<Url> {
		self.base.login_url(scopes, callback_url, state)
	}

	fn handle_callback<'a>(
		&'a self,
		scopes: Scopes,
		request: &'a CallbackRequest,
	) -> ConnectorFuture<'a, Identity> {
		const KIND: CapabilityKind = CapabilityKind::Callback;

		let span = AugmentSpan::new(KIND, "handle_callback");

		Box::pin(span.instrument(async move {
			match self.base.handle_callback(scopes, request).await {
				Ok(identity) => augment(&self.augmenter, KIND, identity).await,
				Err(e) => skipped(KIND, Err(e)),
			}
		}))
	}
}
impl Debug for CallbackGroups {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackGroups").field("augmenter", &self.augmenter).finish_non_exhaustive()
	}
}

/// SAML POST-binding wrapper.
pub struct SamlGroups {
	base: Box<dyn SamlConnector>,
	augmenter: GroupAugmenter,
}
impl SamlGroups {
	/// Wraps a SAML connector directly.
	pub fn new(base: impl 'static + SamlConnector, augmenter: GroupAugmenter) -> Self {
		Self { base: Box::new(base), augmenter }
	}

	/// Augmenter applied after each accepted SAML response.
	pub fn augmenter(&self) -> &GroupAugmenter {
		&self.augmenter
	}
}
impl SamlConnector for SamlGroups {
	fn post_data(&self, scopes: Scopes, request_id: &str) -> Result<SamlRequest> {
		self.base.post_data(scopes, request_id)
	}

	fn handle_post<'a>(
		&'a self,
		scopes: Scopes,
		saml_response: &'a str,
		in_response_to: &'a str,
	) -> ConnectorFuture<'a, Identity> {
		const KIND: CapabilityKind = CapabilityKind::Saml;

		let span = AugmentSpan::new(KIND, "handle_post");

		Box::pin(span.instrument(async move {
			match self.base.handle_post(scopes, saml_response, in_response_to).await {
				Ok(identity) => augment(&self.augmenter, KIND, identity).await,
				Err(e) => skipped(KIND, Err(e)),
			}
		}))
	}
}
impl Debug for SamlGroups {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SamlGroups").field("augmenter", &self.augmenter).finish_non_exhaustive()
	}
}

/// Password-login wrapper.
pub struct PasswordGroups {
	base: Box<dyn PasswordConnector>,
	augmenter: GroupAugmenter,
}
impl PasswordGroups {
	/// Wraps a password connector directly.
	pub fn new(base: impl 'static + PasswordConnector, augmenter: GroupAugmenter) -> Self {
		Self { base: Box::new(base), augmenter }
	}

	/// Augmenter applied after each accepted login.
	pub fn augmenter(&self) -> &GroupAugmenter {
		&self.augmenter
	}
}
impl PasswordConnector for PasswordGroups {
	fn login<'a>(
		&'a self,
		scopes: Scopes,
		username: &'a str,
		password: &'a str,
	) -> ConnectorFuture<'a, LoginOutcome> {
		const KIND: CapabilityKind = CapabilityKind::Password;

		let span = AugmentSpan::new(KIND, "login");

		Box::pin(span.instrument(async move {
			match self.base.login(scopes, username, password).await {
				Ok(LoginOutcome::Authenticated(identity)) => augment(&self.augmenter, KIND, identity)
					.await
					.map(LoginOutcome::Authenticated),
				other => skipped(KIND, other),
			}
		}))
	}
}
impl Debug for PasswordGroups {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PasswordGroups").field("augmenter", &self.augmenter).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		augment::GroupSource,
		connector::mock::{MockCallback, MockPassword, MockSaml},
		error::{ConnectorError, LookupError},
		groups::{GroupLookup, LookupFuture, StaticGroups},
	};

	struct Failing;
	impl GroupLookup for Failing {
		fn lookup<'a>(&'a self, _identity: &'a Identity) -> LookupFuture<'a> {
			Box::pin(async { Err(LookupError::backend("groups backend offline")) })
		}
	}

	struct Broken;
	impl PasswordConnector for Broken {
		fn login<'a>(
			&'a self,
			_scopes: Scopes,
			_username: &'a str,
			_password: &'a str,
		) -> ConnectorFuture<'a, LoginOutcome> {
			Box::pin(async { Err(ConnectorError::Backend { message: "ldap down".into() }.into()) })
		}
	}

	fn augmenter() -> GroupAugmenter {
		GroupAugmenter::default()
			.with_source(GroupSource::new("v1-", StaticGroups::new(["one", "two"])))
			.with_source(GroupSource::new("v2-", StaticGroups::new(["one", "two"])))
	}

	fn callback_url() -> Url {
		Url::parse("https://dex.example.com/callback").expect("Callback URL fixture should parse.")
	}

	#[tokio::test]
	async fn callback_wrapper_augments_identity() {
		let wrapped = wrap(Connector::callback(MockCallback::default()), augmenter());
		let callback = wrapped.as_callback().expect("Wrapper should keep the callback capability.");
		let request = CallbackRequest::new(callback_url());
		let identity = callback
			.handle_callback(Scopes::default(), &request)
			.await
			.expect("Mock callback should authenticate.");

		assert!(wrapped.as_saml().is_none());
		assert!(wrapped.as_password().is_none());
		assert_eq!(identity.groups, ["authors", "v1-one", "v1-two", "v2-one", "v2-two"]);
		assert_eq!(identity.email, "kilgore@kilgore.trout");
		assert_eq!(identity.connector_data, b"foobar");
	}

	#[test]
	fn callback_wrapper_delegates_login_url() {
		let base = MockCallback::default();
		let wrapped = CallbackGroups::new(MockCallback::default(), augmenter());
		let expected = base
			.login_url(Scopes::default(), &callback_url(), "state-1")
			.expect("Base login URL should build.");
		let got = wrapped
			.login_url(Scopes::default(), &callback_url(), "state-1")
			.expect("Wrapped login URL should build.");

		assert_eq!(got, expected);
		assert_eq!(wrapped.augmenter().len(), 2);
	}

	#[tokio::test]
	async fn callback_failure_passes_through() {
		let wrapped = CallbackGroups::new(MockCallback::default(), augmenter());
		let mut url = callback_url();

		url.set_query(Some("error=access_denied"));

		let err = wrapped
			.handle_callback(Scopes::default(), &CallbackRequest::new(url))
			.await
			.expect_err("Base callback failures should surface.");

		assert!(matches!(
			err,
			Error::Connector(ConnectorError::Rejected { reason }) if reason == "access_denied"
		));
	}

	#[tokio::test]
	async fn lookup_failure_fails_the_request() {
		let wrapped = CallbackGroups::new(
			MockCallback::default(),
			GroupAugmenter::default().with_source(GroupSource::new("", Failing)),
		);
		let err = wrapped
			.handle_callback(Scopes::default(), &CallbackRequest::new(callback_url()))
			.await
			.expect_err("A failing group source should fail the request.");

		assert!(matches!(err, Error::Lookup(_)));

		// The connector remains usable; a later request fails the same way rather than panicking.
		assert!(
			wrapped
				.handle_callback(Scopes::default(), &CallbackRequest::new(callback_url()))
				.await
				.is_err()
		);
	}

	#[tokio::test]
	async fn saml_wrapper_augments_identity() {
		let sso = Url::parse("https://idp.example.com/sso").expect("SSO URL fixture should parse.");
		let wrapped = wrap(Connector::saml(MockSaml::new(sso.clone())), augmenter());
		let saml = wrapped.as_saml().expect("Wrapper should keep the SAML capability.");
		let data = saml.post_data(Scopes::default(), "req-9").expect("POST data should build.");
		let identity = saml
			.handle_post(Scopes::default(), "<Response/>", "req-9")
			.await
			.expect("Mock SAML response should be accepted.");

		assert!(wrapped.as_callback().is_none());
		assert_eq!(data.sso_url, sso);
		assert_eq!(data.saml_request, "mock:req-9");
		assert_eq!(identity.groups, ["saml-users", "v1-one", "v1-two", "v2-one", "v2-two"]);

		let err = saml
			.handle_post(Scopes::default(), "<Response/>", "")
			.await
			.expect_err("A response without InResponseTo should be rejected.");

		assert!(matches!(
			err,
			Error::Connector(ConnectorError::Rejected { reason }) if reason == "missing InResponseTo"
		));
	}

	#[tokio::test]
	async fn saml_lookup_failure_fails_the_request() {
		let sso = Url::parse("https://idp.example.com/sso").expect("SSO URL fixture should parse.");
		let wrapped = SamlGroups::new(
			MockSaml::new(sso),
			GroupAugmenter::default().with_source(GroupSource::new("", Failing)),
		);
		let err = wrapped
			.handle_post(Scopes::default(), "<Response/>", "req-9")
			.await
			.expect_err("A failing group source should fail the SAML request.");

		assert!(matches!(err, Error::Lookup(LookupError::Backend { message, .. }) if message == "groups backend offline"));
	}

	#[tokio::test]
	async fn password_wrapper_augments_only_valid_logins() {
		let wrapped = wrap(Connector::password(MockPassword::new("kilgore", "trout")), augmenter());

		assert_eq!(wrapped.kind(), CapabilityKind::Password);
		assert!(wrapped.as_callback().is_none(), "Password wrapper must not look callback-capable.");

		let password = wrapped.as_password().expect("Wrapper should keep the password capability.");
		let valid = password
			.login(Scopes::default(), "kilgore", "trout")
			.await
			.expect("Valid login should succeed.");
		let invalid = password
			.login(Scopes::default(), "kilgore", "salmon")
			.await
			.expect("Invalid password is not an error.");

		assert_eq!(
			valid.identity().map(|i| i.groups.clone()),
			Some(vec!["v1-one".into(), "v1-two".into(), "v2-one".into(), "v2-two".into()])
		);
		assert_eq!(invalid, LoginOutcome::InvalidPassword);
	}

	#[tokio::test]
	async fn password_lookup_failure_fails_valid_login() {
		let wrapped = PasswordGroups::new(
			MockPassword::new("kilgore", "trout"),
			GroupAugmenter::default().with_source(GroupSource::new("v1-", Failing)),
		);
		let err = wrapped
			.login(Scopes::default(), "kilgore", "trout")
			.await
			.expect_err("A failing group source should fail an accepted login.");

		assert!(matches!(err, Error::Lookup(LookupError::Backend { .. })));

		let invalid = wrapped
			.login(Scopes::default(), "kilgore", "salmon")
			.await
			.expect("Rejected passwords never reach the group sources.");

		assert_eq!(invalid, LoginOutcome::InvalidPassword);
	}

	#[tokio::test]
	async fn password_backend_failure_passes_through() {
		let wrapped = PasswordGroups::new(Broken, augmenter());
		let err = wrapped
			.login(Scopes::default(), "kilgore", "trout")
			.await
			.expect_err("Base login failures should surface.");

		assert!(matches!(err, Error::Connector(ConnectorError::Backend { .. })));
	}
}
