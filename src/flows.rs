//! The relay's two-phase flow orchestrators.
//!
//! Phase 1 ([`Relay::initiate_consent`]) obtains a client-credentials token, creates the payment
//! consent, and derives the authorization URL. Phase 2 ([`Relay::execute_payment`]) exchanges
//! the user's authorization code and submits the consented payment. The phases are independent
//! linear sequences: the caller carries the consent identifier and initiation between them, and
//! the first failure at any step aborts the whole operation with no retry or rollback.

pub mod consent;
pub mod payment;
pub mod token;

mod common;

pub use token::{AccessToken, GrantRequest};

// self
use crate::{_prelude::*, config::RelayConfig, http::RelayHttpClient};

/// Coordinates the domestic-payment flow against a single institution.
///
/// The relay owns the HTTP client and configuration so individual flow implementations can focus
/// on protocol-specific logic. Concurrent inbound calls clone the relay freely; the only shared
/// material is the immutable TLS-backed transport built once at startup.
#[derive(Clone)]
pub struct Relay {
	/// HTTP client used for every outbound institution call.
	pub http_client: RelayHttpClient,
	/// Immutable configuration loaded once at startup.
	pub config: RelayConfig,
}
impl Relay {
	/// Builds a relay whose transport presents the configured mutual-TLS material.
	pub fn connect(config: RelayConfig) -> Result<Self> {
		let http_client = RelayHttpClient::mutual_tls(&config.tls)?;

		Ok(Self { http_client, config })
	}

	/// Builds a relay over a caller-provided transport.
	pub fn with_http_client(config: RelayConfig, http_client: RelayHttpClient) -> Self {
		Self { http_client, config }
	}
}
impl Debug for Relay {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("config", &self.config).finish()
	}
}
