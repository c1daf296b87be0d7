use std::env;
use std::net::{IpAddr, Ipv4Addr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;

/// Bind settings, read from the environment so deployments can override
/// the Rocket defaults without a Rocket.toml.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("VOTING_ADDR") {
            match raw.parse() {
                Ok(address) => config.address = address,
                Err(_) => warn!("ignoring unparsable VOTING_ADDR: {}", raw),
            }
        }
        if let Ok(raw) = env::var("VOTING_PORT") {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring unparsable VOTING_PORT: {}", raw),
            }
        }

        config
    }
}
