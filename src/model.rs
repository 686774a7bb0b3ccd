//! Wire payloads exchanged with callers and with the institution.
//!
//! Outbound bodies follow the Open Banking v3.1 PascalCase casing; inbound caller payloads keep
//! the relay's original camelCase keys. Nothing here survives past the request that created it:
//! the caller carries the [`Initiation`] and consent identifier from phase 1 into phase 2.

// self
use crate::{_prelude::*, ident};

/// Currency applied to every instructed amount.
pub const INSTRUCTED_CURRENCY: &str = "BRL";
/// Creditor-account scheme applied to every initiation.
pub const CREDITOR_SCHEME: &str = "BR.CNPJ";
/// Consent status required before redirecting the end user.
pub const CONSENT_AWAITING_AUTHORISATION: &str = "AwaitingAuthorisation";
/// Payment status required for a successful execution.
pub const PAYMENT_ACCEPTED_SETTLEMENT_COMPLETED: &str = "AcceptedSettlementCompleted";
/// Fixed customer-IP metadata sent as `x-fapi-customer-ip-address`.
pub const CUSTOMER_IP_ADDRESS: &str = "10.1.1.10";

/// Payment instruction embedded in a consent and later in its execution.
///
/// Immutable once constructed; phase 2 must submit the phase-1 value verbatim rather than
/// recompute it, so the identifiers and amount survive the round trip through the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Initiation {
	/// Locally generated instruction identifier (`PMT.` prefixed).
	pub instruction_identification: String,
	/// Locally generated end-to-end identifier (`TRX.` prefixed).
	pub end_to_end_identification: String,
	/// Amount and currency of the instruction.
	pub instructed_amount: InstructedAmount,
	/// Creditor account receiving the payment.
	pub creditor_account: CreditorAccount,
}
impl Initiation {
	/// Builds a fresh initiation for the given amount and creditor.
	pub fn new(amount: &str, identification: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			instruction_identification: ident::instruction_id(),
			end_to_end_identification: ident::end_to_end_id(),
			instructed_amount: InstructedAmount::in_brl(amount),
			creditor_account: CreditorAccount {
				scheme_name: CREDITOR_SCHEME.into(),
				identification: identification.into(),
				name: name.into(),
			},
		}
	}
}

/// Instructed amount of a payment initiation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstructedAmount {
	/// Decimal amount rendered with two fraction digits.
	pub amount: String,
	/// ISO currency code.
	pub currency: String,
}
impl InstructedAmount {
	/// Renders `amount` with the fixed `.00` fraction in [`INSTRUCTED_CURRENCY`].
	pub fn in_brl(amount: &str) -> Self {
		Self { amount: format!("{amount}.00"), currency: INSTRUCTED_CURRENCY.into() }
	}
}

/// Creditor account referenced by an initiation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreditorAccount {
	/// Account scheme, fixed to [`CREDITOR_SCHEME`].
	pub scheme_name: String,
	/// Scheme-specific account identification.
	pub identification: String,
	/// Account holder name.
	pub name: String,
}

/// Consent resource returned by the institution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
	/// Server-issued consent identifier.
	#[serde(rename = "ConsentId")]
	pub consent_id: String,
	/// Server-supplied consent status.
	#[serde(rename = "Status")]
	pub status: String,
}

/// Successful phase-1 payload returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsentGrant {
	/// Authorization URL the end user must be redirected to.
	pub url: String,
	/// Initiation the caller must round-trip into phase 2 unchanged.
	#[serde(rename = "Initiation")]
	pub initiation: Initiation,
	/// Consent identifier the caller must round-trip into phase 2.
	#[serde(rename = "ConsentId")]
	pub consent_id: String,
}

/// Caller input for phase 1 (consent initiation).
#[derive(Clone, Debug, Deserialize)]
pub struct ConsentOrder {
	/// Whole-unit amount; the relay appends the `.00` fraction.
	pub amount: String,
	/// Creditor account identification.
	pub identification: String,
	/// Creditor account name.
	pub name: String,
}

/// Caller input for phase 2 (payment execution).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentOrder {
	/// User-granted authorization code.
	pub code: String,
	/// Initiation produced by phase 1, unchanged.
	pub initiation: Initiation,
	/// Consent identifier produced by phase 1.
	#[serde(rename = "consentId")]
	pub consent_id: String,
}

/// Empty risk section required by the consent and payment schemas.
#[derive(Clone, Debug, Default, Serialize)]
pub(crate) struct Risk {}

/// Consent-creation request envelope.
#[derive(Serialize)]
pub(crate) struct ConsentEnvelope<'a> {
	#[serde(rename = "Data")]
	pub data: ConsentData<'a>,
	#[serde(rename = "Risk")]
	pub risk: Risk,
}

/// Data section of a consent-creation request.
#[derive(Serialize)]
pub(crate) struct ConsentData<'a> {
	#[serde(rename = "Initiation")]
	pub initiation: &'a Initiation,
}

/// Consent-creation response envelope.
#[derive(Deserialize)]
pub(crate) struct ConsentReply {
	#[serde(rename = "Data")]
	pub data: Consent,
}

/// Payment-submission request envelope.
#[derive(Serialize)]
pub(crate) struct PaymentEnvelope<'a> {
	#[serde(rename = "Data")]
	pub data: PaymentData<'a>,
	#[serde(rename = "Risk")]
	pub risk: Risk,
}

/// Data section of a payment-submission request.
#[derive(Serialize)]
pub(crate) struct PaymentData<'a> {
	#[serde(rename = "ConsentId")]
	pub consent_id: &'a str,
	#[serde(rename = "Initiation")]
	pub initiation: &'a Initiation,
}
