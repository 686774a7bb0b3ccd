//! Relay-level error types shared across flows, configuration, and the inbound surface.
//!
//! The taxonomy is deliberately two tier: business rejections (the institution answered with a
//! well-formed payload whose status misses the expected sentinel) and everything else
//! (configuration, transport, or unexpected upstream shapes). The inbound surface maps the first
//! tier to HTTP 400 and the second to HTTP 500.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream answered outside the expected protocol shape.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),

	/// Consent was created but is not awaiting end-user authorisation.
	#[error("Consent is not awaiting authorisation (status: {status}).")]
	ConsentNotAwaitingAuthorisation {
		/// Status value returned by the institution.
		status: String,
	},
	/// Payment was submitted but did not reach completed settlement.
	#[error("Payment did not reach settlement (status: {status}).")]
	PaymentNotSettled {
		/// Status value returned by the institution.
		status: String,
	},
}
impl Error {
	/// Returns whether the error is a business rejection rather than a relay failure.
	pub const fn is_rejection(&self) -> bool {
		matches!(
			self,
			Self::ConsentNotAwaitingAuthorisation { .. } | Self::PaymentNotSettled { .. }
		)
	}

	/// Renders the error together with its source chain.
	///
	/// The inbound surface echoes this string back to callers on generic failures, preserving
	/// the original relay's diagnostic leakage; see the crate documentation for the contract.
	pub fn render_chain(&self) -> String {
		let mut rendered = self.to_string();
		let mut source = StdError::source(self);

		while let Some(cause) = source {
			rendered.push_str(": ");
			rendered.push_str(&cause.to_string());

			source = cause.source();
		}

		rendered
	}
}

/// Configuration and validation failures raised while assembling the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is absent or blank.
	#[error("Missing required environment variable `{name}`.")]
	MissingVariable {
		/// Variable name that was looked up.
		name: &'static str,
	},
	/// Environment variable holds an unparsable URL.
	#[error("Environment variable `{name}` is not a valid URL.")]
	InvalidUrl {
		/// Variable name that was looked up.
		name: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Listen address cannot be parsed.
	#[error("Environment variable `LISTEN_ADDR` is not a valid socket address.")]
	InvalidListenAddr {
		/// Underlying parsing failure.
		#[source]
		source: std::net::AddrParseError,
	},
	/// On-disk TLS material could not be read.
	#[error("TLS material at {path:?} could not be read.")]
	TlsMaterial {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// TLS material was read but rejected by the HTTP stack.
	#[error("TLS material could not be loaded into the HTTP client.")]
	InvalidTlsMaterial {
		/// Underlying transport failure.
		#[source]
		source: BoxError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's TLS material rejection inside [`ConfigError`].
	pub fn invalid_tls_material(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidTlsMaterial { source: Box::new(src) }
	}

	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the institution.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced while serving or calling out.
	#[error("I/O error occurred while serving or calling the institution.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Unexpected responses from the institution's endpoints.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Endpoint answered with a non-2xx status.
	#[error("The {call} call returned HTTP {status}.")]
	Status {
		/// Outbound call that failed.
		call: &'static str,
		/// HTTP status code returned upstream.
		status: u16,
	},
	/// Endpoint answered with a body that could not be parsed.
	#[error("The {call} response body could not be parsed.")]
	BodyParse {
		/// Outbound call that failed.
		call: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Endpoint answered without a field the protocol requires.
	#[error("The {call} response is missing the {field} field.")]
	MissingField {
		/// Outbound call that failed.
		call: &'static str,
		/// Dotted path of the absent field.
		field: &'static str,
	},
}
