//! Server configuration, read once at startup and passed down immutably.

use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9999";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address (host and port) on which to listen.
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("PODDECK_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self { bind_addr }
    }
}
