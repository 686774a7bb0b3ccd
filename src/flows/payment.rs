//! Payment Execution—phase 2 of the domestic-payment flow.
//!
//! Exchanges the caller's authorization code for a bearer token, submits the payment referencing
//! the phase-1 consent identifier and the unmodified initiation, and requires the
//! `AcceptedSettlementCompleted` status before handing the raw result back. A created consent is
//! never cleaned up when this phase fails; the contract keeps the institution authoritative.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{TransportError, UpstreamError},
	flows::{GrantRequest, Relay, common},
	model::{self, PaymentData, PaymentEnvelope, PaymentOrder, Risk},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl Relay {
	/// Exchanges the authorization code and submits the consented payment.
	///
	/// Returns the institution's raw payment-result payload on success.
	pub async fn execute_payment(&self, order: PaymentOrder) -> Result<Value> {
		const KIND: FlowKind = FlowKind::PaymentExecution;

		let span = FlowSpan::new(KIND, "execute_payment");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				const SUBMIT: &str = "payment submission";

				let PaymentOrder { code, initiation, consent_id } = order;
				let token =
					self.exchange_credentials(GrantRequest::AuthorizationCode { code }).await?;
				let response = common::fapi_headers(
					self.http_client
						.post(self.config.payments_url())
						.bearer_auth(token.expose()),
					&self.config.participant_id,
				)
				.json(&PaymentEnvelope {
					data: PaymentData { consent_id: &consent_id, initiation: &initiation },
					risk: Risk {},
				})
				.send()
				.await
				.map_err(TransportError::from)?;

				common::ensure_success(SUBMIT, &response)?;

				let body = response.bytes().await.map_err(TransportError::from)?;
				let payload: Value = common::parse_json(SUBMIT, &body)?;
				let status = payload
					.get("Data")
					.and_then(|data| data.get("Status"))
					.and_then(Value::as_str)
					.ok_or(UpstreamError::MissingField { call: SUBMIT, field: "Data.Status" })?;

				if status != model::PAYMENT_ACCEPTED_SETTLEMENT_COMPLETED {
					return Err(Error::PaymentNotSettled { status: status.to_owned() });
				}

				Ok(payload)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
