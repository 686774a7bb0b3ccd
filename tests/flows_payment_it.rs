// crates.io
use httpmock::prelude::*;
// self
use payment_relay::{
	config::{RelayConfig, TlsPaths},
	error::{Error, UpstreamError},
	flows::Relay,
	http::RelayHttpClient,
	model::{CreditorAccount, Initiation, InstructedAmount, PaymentOrder},
	reqwest::Client,
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

fn phase_one_initiation() -> Initiation {
	Initiation {
		instruction_identification: "PMT.abc123xyz".into(),
		end_to_end_identification: "TRX.xyz321abc".into(),
		instructed_amount: InstructedAmount { amount: "10.00".into(), currency: "BRL".into() },
		creditor_account: CreditorAccount {
			scheme_name: "BR.CNPJ".into(),
			identification: "12345678901234".into(),
			name: "Acme".into(),
		},
	}
}

fn order() -> PaymentOrder {
	PaymentOrder {
		code: "auth-code-1".into(),
		initiation: phase_one_initiation(),
		consent_id: "consent-123".into(),
	}
}

#[tokio::test]
async fn payment_execution_submits_the_initiation_verbatim() {
	let server = MockServer::start_async().await;
	let relay = build_relay(&server);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("authorization", format!("Basic {BASIC_CREDENTIAL}"))
				.body_includes("grant_type=authorization_code")
				.body_includes("code=auth-code-1")
				.body_includes("redirect_uri=");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"code-token\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let payment_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/open-banking/v3.1/pisp/domestic-payments")
				.header("authorization", "Bearer code-token")
				.header("x-fapi-financial-id", "participant-001")
				.header("x-fapi-customer-ip-address", "10.1.1.10")
				.header_exists("x-fapi-interaction-id")
				.json_body_includes(
					r#"{"Data":{"ConsentId":"consent-123","Initiation":{"InstructionIdentification":"PMT.abc123xyz","EndToEndIdentification":"TRX.xyz321abc","InstructedAmount":{"Amount":"10.00","Currency":"BRL"},"CreditorAccount":{"SchemeName":"BR.CNPJ","Identification":"12345678901234","Name":"Acme"}}}}"#,
				);
			then.status(201).header("content-type", "application/json").body(
				r#"{"Data":{"DomesticPaymentId":"payment-1","ConsentId":"consent-123","Status":"AcceptedSettlementCompleted"}}"#,
			);
		})
		.await;
	let payload = relay.execute_payment(order()).await.expect("Payment execution should succeed.");

	assert_eq!(payload["Data"]["DomesticPaymentId"], "payment-1");
	assert_eq!(payload["Data"]["Status"], "AcceptedSettlementCompleted");

	token_mock.assert_async().await;
	payment_mock.assert_async().await;
}

#[tokio::test]
async fn unexpected_payment_status_is_rejected() {
	let server = MockServer::start_async().await;
	let relay = build_relay(&server);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"code-token\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _payment_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-banking/v3.1/pisp/domestic-payments");
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"Data":{"ConsentId":"consent-123","Status":"Pending"}}"#);
		})
		.await;
	let err = relay
		.execute_payment(order())
		.await
		.expect_err("Unexpected payment status should be rejected.");

	assert!(matches!(
		err,
		Error::PaymentNotSettled { ref status } if status.as_str() == "Pending"
	));
	assert!(err.is_rejection());
}

#[tokio::test]
async fn missing_payment_status_is_an_upstream_error() {
	let server = MockServer::start_async().await;
	let relay = build_relay(&server);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"code-token\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _payment_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-banking/v3.1/pisp/domestic-payments");
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"Data":{"ConsentId":"consent-123"}}"#);
		})
		.await;
	let err = relay
		.execute_payment(order())
		.await
		.expect_err("Missing status field should propagate.");

	assert!(matches!(
		err,
		Error::Upstream(UpstreamError::MissingField { field: "Data.Status", .. })
	));
	assert!(!err.is_rejection());
}

#[tokio::test]
async fn code_exchange_failure_skips_the_submission() {
	let server = MockServer::start_async().await;
	let relay = build_relay(&server);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(400)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_grant"}"#);
		})
		.await;
	let payment_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-banking/v3.1/pisp/domestic-payments");
			then.status(201).body("{}");
		})
		.await;
	let err = relay
		.execute_payment(order())
		.await
		.expect_err("Code exchange failure should propagate.");

	assert!(matches!(
		err,
		Error::Upstream(UpstreamError::Status { call: "token endpoint", status: 400 })
	));

	payment_mock.assert_calls_async(0).await;
}
