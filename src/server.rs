//! Inbound HTTP surface of the relay.
//!
//! Both phases live under `/payment/token`: `GET` runs consent initiation from query
//! parameters, `POST` runs payment execution from a JSON body. Errors follow the two-tier
//! contract—business rejections answer `400` with a localized body, everything else answers
//! `500` with the raw error chain echoed back.

// crates.io
use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	flows::Relay,
	model::{ConsentGrant, ConsentOrder, PaymentOrder},
};

/// Localized body returned on business rejections.
pub const REJECTION_BODY: &str = "Operação inválida";

/// Builds the relay router exposing both phases under `/payment/token`.
pub fn router(relay: Relay) -> Router {
	Router::new()
		.route("/payment/token", get(initiate_consent).post(execute_payment))
		.with_state(relay)
}

/// Binds the configured listen address and serves the relay until the process stops.
pub async fn serve(relay: Relay) -> Result<()> {
	let addr = relay.config.listen_addr;
	let listener = tokio::net::TcpListener::bind(addr).await.map_err(TransportError::from)?;

	tracing::info!(%addr, "Payment relay listening.");

	axum::serve(listener, router(relay)).await.map_err(TransportError::from)?;

	Ok(())
}

async fn initiate_consent(
	State(relay): State<Relay>,
	Query(order): Query<ConsentOrder>,
) -> Result<Json<ConsentGrant>, RelayRejection> {
	Ok(Json(relay.initiate_consent(order).await?))
}

async fn execute_payment(
	State(relay): State<Relay>,
	Json(order): Json<PaymentOrder>,
) -> Result<Json<Value>, RelayRejection> {
	Ok(Json(relay.execute_payment(order).await?))
}

/// Maps relay errors onto the two-tier HTTP contract.
struct RelayRejection(Error);
impl From<Error> for RelayRejection {
	fn from(e: Error) -> Self {
		Self(e)
	}
}
impl IntoResponse for RelayRejection {
	fn into_response(self) -> Response {
		if self.0.is_rejection() {
			return (StatusCode::BAD_REQUEST, Json(REJECTION_BODY)).into_response();
		}

		tracing::error!(error = %self.0, "Relay call failed.");

		// The raw chain is echoed deliberately; see the crate-level contract notes.
		(StatusCode::INTERNAL_SERVER_ERROR, self.0.render_chain()).into_response()
	}
}
