//! Relay binary: loads the environment configuration, builds the mutually authenticated
//! transport, and serves the inbound surface.

// self
use payment_relay::{config::RelayConfig, error::Result, flows::Relay, obs, server};

#[tokio::main]
async fn main() -> Result<()> {
	obs::init_tracing();

	let config = RelayConfig::from_env()?;
	let relay = Relay::connect(config)?;

	server::serve(relay).await
}
