use std::net::{AddrParseError, SocketAddr};

const DEFAULT_DATABASE_URL: &str = "sqlite:data/flowery.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read settings from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys fall back to defaults.
    /// An unparsable `BIND_ADDR` is an error, never silently defaulted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
