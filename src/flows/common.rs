//! Shared helpers for flow implementations (status checks, body parsing, FAPI headers).

// crates.io
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::UpstreamError, ident, model};

/// Fails with an [`UpstreamError::Status`] when the response is not 2xx.
pub(crate) fn ensure_success(call: &'static str, response: &Response) -> Result<()> {
	let status = response.status();

	if status.is_success() {
		Ok(())
	} else {
		Err(UpstreamError::Status { call, status: status.as_u16() }.into())
	}
}

/// Parses a JSON body, preserving the failing path in the error.
pub(crate) fn parse_json<T>(call: &'static str, bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| UpstreamError::BodyParse { call, source }.into())
}

/// Attaches the FAPI metadata headers, minting a fresh interaction id per call.
pub(crate) fn fapi_headers(request: RequestBuilder, participant_id: &str) -> RequestBuilder {
	request
		.header("x-fapi-financial-id", participant_id)
		.header("x-fapi-customer-ip-address", model::CUSTOMER_IP_ADDRESS)
		.header("x-fapi-interaction-id", ident::interaction_id())
}
