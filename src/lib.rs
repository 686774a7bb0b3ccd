//! Thin HTTP relay mediating an Open Banking domestic-payment flow—exchange OAuth 2.0 client
//! credentials, create a payment consent with its authorization URL, then trade the user's
//! authorization code for a payment execution, all over a mutually authenticated channel.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod ident;
pub mod model;
pub mod obs;
pub mod server;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tower as _};
