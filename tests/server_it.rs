// crates.io
use axum::{
	body::{Body, to_bytes},
	http::{Request, StatusCode, header},
};
use httpmock::prelude::*;
use tower::ServiceExt;
// self
use payment_relay::{
	config::{RelayConfig, TlsPaths},
	flows::Relay,
	http::RelayHttpClient,
	reqwest::Client,
	server,
	url::Url,
};

const BASIC_CREDENTIAL: &str = "dGVzdDpzZWNyZXQ=";

fn build_relay(server: &MockServer) -> Relay {
	let config = RelayConfig {
		token_endpoint: Url::parse(&server.url("/token"))
			.expect("Mock token endpoint should parse successfully."),
		basic_credential: BASIC_CREDENTIAL.into(),
		resource_server: Url::parse(&server.base_url())
			.expect("Mock resource server should parse successfully."),
		participant_id: "participant-001".into(),
		redirect_url: Url::parse("https://relay.example/callback")
			.expect("Redirect URL should parse successfully."),
		tls: TlsPaths {
			certificate: "certs/client_certificate.crt".into(),
			private_key: "certs/client_private_key.key".into(),
			ca_chain: "certs/chain.crt".into(),
		},
		listen_addr: "127.0.0.1:0".parse().expect("Listen address should parse successfully."),
	};

	Relay::with_http_client(config, RelayHttpClient::with_client(Client::new()))
}

fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = format!(
		"{{\"access_token\":\"{token}\",\"token_type\":\"bearer\",\"expires_in\":900}}"
	);

	server.mock(move |when, then| {
		when.method(POST).path("/token");
		then.status(200).header("content-type", "application/json").body(body.clone());
	})
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
	to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be readable.")
		.to_vec()
}

#[tokio::test]
async fn get_returns_the_grant_payload() {
	let server = MockServer::start_async().await;
	let app = server::router(build_relay(&server));
	let _token_mock = mock_token(&server, "cc-token");
	let _consent_mock = server.mock(|when, then| {
		when.method(POST).path("/open-banking/v3.1/pisp/domestic-payment-consents");
		then.status(201)
			.header("content-type", "application/json")
			.body(r#"{"Data":{"ConsentId":"consent-123","Status":"AwaitingAuthorisation"}}"#);
	});
	let _url_mock = server.mock(|when, then| {
		when.method(GET).path("/ozone/v1.0/auth-code-url/consent-123");
		then.status(200).body("https://auth.institution.example/authorize?request=abc");
	});
	let response = app
		.oneshot(
			Request::builder()
				.uri("/payment/token?amount=10&identification=12345678901234&name=Acme")
				.body(Body::empty())
				.expect("Request should build."),
		)
		.await
		.expect("Router should answer.");

	assert_eq!(response.status(), StatusCode::OK);

	let payload: serde_json::Value = serde_json::from_slice(&read_body(response).await)
		.expect("Grant payload should be JSON.");

	assert_eq!(payload["url"], "https://auth.institution.example/authorize?request=abc");
	assert_eq!(payload["ConsentId"], "consent-123");
	assert_eq!(payload["Initiation"]["InstructedAmount"]["Amount"], "10.00");
	assert_eq!(payload["Initiation"]["InstructedAmount"]["Currency"], "BRL");
}

#[tokio::test]
async fn rejected_consent_maps_to_400_with_the_localized_body() {
	let server = MockServer::start_async().await;
	let app = server::router(build_relay(&server));
	let _token_mock = mock_token(&server, "cc-token");
	let _consent_mock = server.mock(|when, then| {
		when.method(POST).path("/open-banking/v3.1/pisp/domestic-payment-consents");
		then.status(201)
			.header("content-type", "application/json")
			.body(r#"{"Data":{"ConsentId":"consent-456","Status":"Rejected"}}"#);
	});
	let response = app
		.oneshot(
			Request::builder()
				.uri("/payment/token?amount=10&identification=12345678901234&name=Acme")
				.body(Body::empty())
				.expect("Request should build."),
		)
		.await
		.expect("Router should answer.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(read_body(response).await, "\"Operação inválida\"".as_bytes());
}

#[tokio::test]
async fn upstream_failure_maps_to_500_with_the_raw_error() {
	let server = MockServer::start_async().await;
	let app = server::router(build_relay(&server));
	let _token_mock = server.mock(|when, then| {
		when.method(POST).path("/token");
		then.status(502).body("bad gateway");
	});
	let response = app
		.oneshot(
			Request::builder()
				.uri("/payment/token?amount=10&identification=12345678901234&name=Acme")
				.body(Body::empty())
				.expect("Request should build."),
		)
		.await
		.expect("Router should answer.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = String::from_utf8(read_body(response).await).expect("Body should be UTF-8.");

	assert!(body.contains("HTTP 502"));
}

#[tokio::test]
async fn post_executes_the_payment() {
	let server = MockServer::start_async().await;
	let app = server::router(build_relay(&server));
	let _token_mock = mock_token(&server, "code-token");
	let payment_mock = server.mock(|when, then| {
		when.method(POST)
			.path("/open-banking/v3.1/pisp/domestic-payments")
			.json_body_includes(
				r#"{"Data":{"ConsentId":"consent-123","Initiation":{"InstructionIdentification":"PMT.abc123xyz"}}}"#,
			);
		then.status(201).header("content-type", "application/json").body(
			r#"{"Data":{"DomesticPaymentId":"payment-1","Status":"AcceptedSettlementCompleted"}}"#,
		);
	});
	let order = serde_json::json!({
		"code": "auth-code-1",
		"initiation": {
			"InstructionIdentification": "PMT.abc123xyz",
			"EndToEndIdentification": "TRX.xyz321abc",
			"InstructedAmount": { "Amount": "10.00", "Currency": "BRL" },
			"CreditorAccount": {
				"SchemeName": "BR.CNPJ",
				"Identification": "12345678901234",
				"Name": "Acme",
			},
		},
		"consentId": "consent-123",
	});
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/payment/token")
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(order.to_string()))
				.expect("Request should build."),
		)
		.await
		.expect("Router should answer.");

	assert_eq!(response.status(), StatusCode::OK);

	let payload: serde_json::Value = serde_json::from_slice(&read_body(response).await)
		.expect("Payment payload should be JSON.");

	assert_eq!(payload["Data"]["DomesticPaymentId"], "payment-1");
	assert_eq!(payload["Data"]["Status"], "AcceptedSettlementCompleted");

	payment_mock.assert();
}
