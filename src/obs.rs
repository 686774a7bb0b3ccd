//! Observability helpers for relay flows.
//!
//! Flows emit structured spans named `payment_relay.flow` carrying the `flow` (phase) and
//! `stage` (call site) fields, plus attempt/success/failure outcome events. The binary installs
//! the process-wide subscriber through [`init_tracing`].

// std
use std::future::Future;
// crates.io
use tracing::{Instrument, instrument::Instrumented};
use tracing_subscriber::EnvFilter;
// self
use crate::_prelude::*;

/// Relay flow phases observed by spans and outcome events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// OAuth credential exchange against the token endpoint.
	CredentialExchange,
	/// Consent creation plus authorization-URL lookup (phase 1).
	ConsentInitiation,
	/// Code exchange plus payment submission (phase 2).
	PaymentExecution,
}
impl FlowKind {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::CredentialExchange => "credential_exchange",
			FlowKind::ConsentInitiation => "consent_initiation",
			FlowKind::PaymentExecution => "payment_execution",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a relay flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A span builder used by relay flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("payment_relay.flow", flow = kind.as_str(), stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}

/// Emits an outcome event for the given flow.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	tracing::debug!(flow = kind.as_str(), outcome = outcome.as_str(), "Flow outcome recorded.");
}

/// Installs the process-wide subscriber (env-filtered, `info` by default).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
