//! Credential Exchange—OAuth 2.0 grants against the institution's token endpoint.
//!
//! Two grant variants are used: `client_credentials` (phase 1) and `authorization_code`
//! (phase 2). Both post a form-encoded request authenticated with the configured Basic
//! credential over the mutually authenticated channel and expect an `access_token` in the JSON
//! reply. Tokens are never cached or refreshed; each flow mints its own and drops it when the
//! request finishes.

// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	flows::{Relay, common},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Scope requested alongside the client-credentials grant.
pub const CLIENT_CREDENTIALS_SCOPE: &str = "payments openid";
/// Scope requested alongside the authorization-code grant.
pub const AUTHORIZATION_CODE_SCOPE: &str = "payments";

/// Grant variants exchanged by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantRequest {
	/// `client_credentials` grant used before creating a consent.
	ClientCredentials,
	/// `authorization_code` grant used before submitting a payment.
	AuthorizationCode {
		/// User-granted authorization code.
		code: String,
	},
}
impl GrantRequest {
	/// Returns a stable label suitable for span fields.
	pub(crate) const fn label(&self) -> &'static str {
		match self {
			Self::ClientCredentials => "client_credentials",
			Self::AuthorizationCode { .. } => "authorization_code",
		}
	}

	/// Builds the form-encoded token request for this grant.
	pub(crate) fn form(&self, redirect_url: &Url) -> Vec<(&'static str, String)> {
		match self {
			Self::ClientCredentials => vec![
				("grant_type", "client_credentials".into()),
				("scope", CLIENT_CREDENTIALS_SCOPE.into()),
			],
			Self::AuthorizationCode { code } => vec![
				("grant_type", "authorization_code".into()),
				("scope", AUTHORIZATION_CODE_SCOPE.into()),
				("code", code.clone()),
				("redirect_uri", redirect_url.to_string()),
			],
		}
	}
}

/// Redacted bearer credential scoped to a single relay request.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a freshly issued token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[derive(Deserialize)]
struct TokenReply {
	access_token: String,
}

impl Relay {
	/// Exchanges the configured Basic credential for a bearer token under the given grant.
	pub async fn exchange_credentials(&self, grant: GrantRequest) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::CredentialExchange;
		const CALL: &str = "token endpoint";

		let span = FlowSpan::new(KIND, grant.label());

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let form = grant.form(&self.config.redirect_url);
				let response = self
					.http_client
					.post(self.config.token_endpoint.clone())
					.header(AUTHORIZATION, format!("Basic {}", self.config.basic_credential))
					.form(&form)
					.send()
					.await
					.map_err(TransportError::from)?;

				common::ensure_success(CALL, &response)?;

				let body = response.bytes().await.map_err(TransportError::from)?;
				let reply: TokenReply = common::parse_json(CALL, &body)?;

				Ok(AccessToken::new(reply.access_token))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
