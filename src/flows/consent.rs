//! Consent Initiation—phase 1 of the domestic-payment flow.
//!
//! Obtains a client-credentials token, creates the payment consent with freshly generated
//! instruction identifiers, requires the `AwaitingAuthorisation` status, and looks up the
//! authorization URL the end user must visit. The returned [`ConsentGrant`] carries everything
//! the caller needs to complete phase 2 later; the relay stores nothing.

// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	flows::{GrantRequest, Relay, common},
	model::{
		self, ConsentData, ConsentEnvelope, ConsentGrant, ConsentOrder, ConsentReply, Initiation,
		Risk,
	},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl Relay {
	/// Creates a payment consent and derives its authorization URL.
	pub async fn initiate_consent(&self, order: ConsentOrder) -> Result<ConsentGrant> {
		const KIND: FlowKind = FlowKind::ConsentInitiation;

		let span = FlowSpan::new(KIND, "initiate_consent");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				const CREATE: &str = "consent creation";
				const LOOKUP: &str = "authorization URL lookup";

				let token = self.exchange_credentials(GrantRequest::ClientCredentials).await?;
				let initiation = Initiation::new(&order.amount, order.identification, order.name);
				let response = common::fapi_headers(
					self.http_client
						.post(self.config.consents_url())
						.bearer_auth(token.expose()),
					&self.config.participant_id,
				)
				.json(&ConsentEnvelope {
					data: ConsentData { initiation: &initiation },
					risk: Risk {},
				})
				.send()
				.await
				.map_err(TransportError::from)?;

				common::ensure_success(CREATE, &response)?;

				let body = response.bytes().await.map_err(TransportError::from)?;
				let reply: ConsentReply = common::parse_json(CREATE, &body)?;
				let consent = reply.data;

				if consent.status != model::CONSENT_AWAITING_AUTHORISATION {
					return Err(Error::ConsentNotAwaitingAuthorisation { status: consent.status });
				}

				let response = self
					.http_client
					.get(self.config.auth_code_url(&consent.consent_id))
					.header(AUTHORIZATION, format!("Basic {}", self.config.basic_credential))
					.send()
					.await
					.map_err(TransportError::from)?;

				common::ensure_success(LOOKUP, &response)?;

				let body = response.text().await.map_err(TransportError::from)?;
				// The lookup endpoint answers with either a bare URL or a JSON-encoded string.
				let url = serde_json::from_str::<String>(&body).unwrap_or(body);

				Ok(ConsentGrant { url, initiation, consent_id: consent.consent_id })
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
