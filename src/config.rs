//! Environment-backed relay configuration.
//!
//! Everything the relay needs is resolved once at startup: the institution's token endpoint, the
//! pre-encoded Basic credential (or a client id/secret pair to derive it from), the resource
//! server base, the participant identifier, the redirect URL for the authorization-code grant,
//! the mutual-TLS material paths, and the inbound listen address. Lookups go through an
//! injectable source so tests never touch process environment.

// std
use std::{net::SocketAddr, path::PathBuf};
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, error::ConfigError};

const DEFAULT_LISTEN_PORT: u16 = 3000;

/// File-system locations of the mutual-TLS client material.
///
/// The files are read exactly once while building the HTTP client; the resulting identity is
/// immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct TlsPaths {
	/// Client certificate (PEM).
	pub certificate: PathBuf,
	/// Client private key (PEM).
	pub private_key: PathBuf,
	/// CA chain used to validate the institution (PEM bundle).
	pub ca_chain: PathBuf,
}

/// Process-wide relay configuration loaded once at startup.
#[derive(Clone)]
pub struct RelayConfig {
	/// OAuth token endpoint of the institution.
	pub token_endpoint: Url,
	/// Pre-encoded Basic credential sent on token and lookup calls.
	pub basic_credential: String,
	/// Base URL of the payment-initiation resource server.
	pub resource_server: Url,
	/// Participant/financial identifier sent as `x-fapi-financial-id`.
	pub participant_id: String,
	/// Redirect URL registered for the authorization-code grant.
	pub redirect_url: Url,
	/// Mutual-TLS material locations.
	pub tls: TlsPaths,
	/// Inbound listen address for the relay surface.
	pub listen_addr: SocketAddr,
}
impl RelayConfig {
	/// Loads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads the configuration from an arbitrary lookup source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let token_endpoint = parse_url("TOKEN_ENDPOINT", &require(&lookup, "TOKEN_ENDPOINT")?)?;
		let basic_credential = match lookup("BASIC_TOKEN").filter(|value| !value.trim().is_empty())
		{
			Some(token) => token,
			None => {
				let id = require(&lookup, "CLIENT_ID")?;
				let secret = require(&lookup, "CLIENT_SECRET")?;

				STANDARD.encode(format!("{id}:{secret}"))
			},
		};
		let resource_server = parse_url("RS_ENDPOINT", &require(&lookup, "RS_ENDPOINT")?)?;
		let participant_id = require(&lookup, "PARTICIPANT_ID")?;
		let redirect_url = parse_url("REDIRECT_URL", &require(&lookup, "REDIRECT_URL")?)?;
		let tls = TlsPaths {
			certificate: require(&lookup, "CLIENT_CERTIFICATE_FILE")?.into(),
			private_key: require(&lookup, "CLIENT_PRIVATE_KEY_FILE")?.into(),
			ca_chain: require(&lookup, "CA_CHAIN_FILE")?.into(),
		};
		let listen_addr = match lookup("LISTEN_ADDR").filter(|value| !value.trim().is_empty()) {
			Some(value) =>
				value.parse().map_err(|source| ConfigError::InvalidListenAddr { source })?,
			None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_LISTEN_PORT)),
		};

		Ok(Self {
			token_endpoint,
			basic_credential,
			resource_server,
			participant_id,
			redirect_url,
			tls,
			listen_addr,
		})
	}

	/// Consent-creation endpoint under the Open Banking path scheme.
	pub fn consents_url(&self) -> String {
		format!("{}/open-banking/v3.1/pisp/domestic-payment-consents", self.resource_base())
	}

	/// Payment-submission endpoint under the Open Banking path scheme.
	pub fn payments_url(&self) -> String {
		format!("{}/open-banking/v3.1/pisp/domestic-payments", self.resource_base())
	}

	/// Authorization-URL lookup endpoint for a created consent.
	pub fn auth_code_url(&self, consent_id: &str) -> String {
		format!("{}/ozone/v1.0/auth-code-url/{consent_id}?scope=payments&alg=none", self.resource_base())
	}

	fn resource_base(&self) -> &str {
		self.resource_server.as_str().trim_end_matches('/')
	}
}
impl Debug for RelayConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RelayConfig")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("basic_credential", &"<redacted>")
			.field("resource_server", &self.resource_server.as_str())
			.field("participant_id", &self.participant_id)
			.field("redirect_url", &self.redirect_url.as_str())
			.field("tls", &self.tls)
			.field("listen_addr", &self.listen_addr)
			.finish()
	}
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	lookup(name)
		.filter(|value| !value.trim().is_empty())
		.ok_or(ConfigError::MissingVariable { name })
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { name, source })
}
