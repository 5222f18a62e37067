//! Process configuration, read from the environment at startup.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `REVIEWS_ADDR` | `0.0.0.0:8081` | listen address |
//! | `RUST_LOG` | `info` | `tracing` filter directives |

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::error::Error;

pub const ADDR_VAR: &str = "REVIEWS_ADDR";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let raw = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = raw
            .parse::<SocketAddr>()
            .map_err(|source| Error::InvalidAddr { addr: raw.clone(), source })?;
        Ok(Self { addr })
    }
}

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_listen_address() {
        let config = Config::from_lookup(|key| {
            (key == ADDR_VAR).then(|| "127.0.0.1:9000".to_owned())
        })
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
    }

    #[test]
    fn rejects_bad_address() {
        let err = Config::from_lookup(|_| Some("not-an-addr".to_owned())).unwrap_err();
        assert!(matches!(err, Error::InvalidAddr { .. }));
        assert!(err.to_string().contains("not-an-addr"));
    }
}
