//! Transport primitives for the relay's outbound calls.
//!
//! [`RelayHttpClient`] wraps a [`ReqwestClient`] so shared HTTP behavior lives in one place.
//! Production relays build it with [`RelayHttpClient::mutual_tls`], which reads the client
//! certificate, private key, and CA chain once at startup; the resulting client is immutable and
//! cheap to clone across concurrent inbound calls. No timeout policy is applied, matching the
//! relay's documented contract.

// std
use std::{
	fs,
	ops::Deref,
	path::Path,
};
// crates.io
use reqwest::{Certificate, Identity};
// self
use crate::{_prelude::*, config::TlsPaths, error::ConfigError};

/// Thin wrapper around [`ReqwestClient`] carrying the relay's TLS identity.
#[derive(Clone, Debug, Default)]
pub struct RelayHttpClient(pub ReqwestClient);
impl RelayHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client presenting the on-disk mutual-TLS material.
	///
	/// The certificate and private key are concatenated into a single PEM identity; every
	/// certificate in the CA chain is installed as an additional root.
	pub fn mutual_tls(paths: &TlsPaths) -> Result<Self, ConfigError> {
		let certificate = read_pem(&paths.certificate)?;
		let private_key = read_pem(&paths.private_key)?;
		let ca_chain = read_pem(&paths.ca_chain)?;
		let mut identity_pem = certificate;

		identity_pem.push(b'\n');
		identity_pem.extend_from_slice(&private_key);

		let identity =
			Identity::from_pem(&identity_pem).map_err(ConfigError::invalid_tls_material)?;
		let roots =
			Certificate::from_pem_bundle(&ca_chain).map_err(ConfigError::invalid_tls_material)?;
		let mut builder = ReqwestClient::builder().use_rustls_tls().identity(identity);

		for root in roots {
			builder = builder.add_root_certificate(root);
		}

		Ok(Self(builder.build()?))
	}
}
impl AsRef<ReqwestClient> for RelayHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for RelayHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

fn read_pem(path: &Path) -> Result<Vec<u8>, ConfigError> {
	fs::read(path).map_err(|source| ConfigError::TlsMaterial { path: path.to_owned(), source })
}
