//! Process configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{Coordinate, ParseCoordinateError};

/// Default origin of the route catalog (Hsinchu HSR station).
const DEFAULT_ORIGIN: (f64, f64) = (24.80818, 121.0405);

/// Configuration error at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },

    #[error("ROUTE_ORIGIN: {0}")]
    Origin(#[from] ParseCoordinateError),
}

/// Settings for the server process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the route catalog JSON (`ROUTE_CATALOG`).
    pub catalog_path: PathBuf,

    /// Shared origin of every catalog route (`ROUTE_ORIGIN`, "lat,lng").
    pub origin: Coordinate,

    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: IpAddr,

    /// Port to listen on (`PORT`).
    pub port: u16,

    /// Directory served under `/static` (`STATIC_DIR`).
    pub static_dir: PathBuf,

    /// Upper bound on one route lookup (`REQUEST_BUDGET_MS`).
    pub request_budget: Duration,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("ROUTE_CATALOG") {
            config.catalog_path = path.into();
        }
        if let Some(origin) = lookup("ROUTE_ORIGIN") {
            config.origin = origin.parse()?;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = parse_var("BIND_ADDR", &addr)?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = dir.into();
        }
        if let Some(ms) = lookup("REQUEST_BUDGET_MS") {
            let ms: u64 = parse_var("REQUEST_BUDGET_MS", &ms)?;
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    var: "REQUEST_BUDGET_MS",
                    message: "must be greater than zero".to_string(),
                });
            }
            config.request_budget = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// The socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_ORIGIN;
        Self {
            catalog_path: PathBuf::from("data/routes.json"),
            origin: Coordinate::new(lat, lng).expect("default origin is in range"),
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            static_dir: PathBuf::from("static"),
            request_budget: Duration::from_secs(2),
        }
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        message: format!("{value:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_map(&[]).unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("data/routes.json"));
        assert_eq!(config.origin.lat(), 24.80818);
        assert_eq!(config.origin.lng(), 121.0405);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.request_budget, Duration::from_secs(2));
    }

    #[test]
    fn overrides() {
        let config = from_map(&[
            ("ROUTE_CATALOG", "/srv/routes.json"),
            ("ROUTE_ORIGIN", "25.0478, 121.5170"),
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("STATIC_DIR", "/srv/static"),
            ("REQUEST_BUDGET_MS", "500"),
        ])
        .unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("/srv/routes.json"));
        assert_eq!(config.origin.lat(), 25.0478);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.request_budget, Duration::from_millis(500));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_map(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
        assert!(matches!(
            from_map(&[("BIND_ADDR", "localhost:80")]),
            Err(ConfigError::Invalid {
                var: "BIND_ADDR",
                ..
            })
        ));
        assert!(matches!(
            from_map(&[("REQUEST_BUDGET_MS", "0")]),
            Err(ConfigError::Invalid {
                var: "REQUEST_BUDGET_MS",
                ..
            })
        ));
        assert!(matches!(
            from_map(&[("ROUTE_ORIGIN", "100,121")]),
            Err(ConfigError::Origin(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = from_map(&[("PORT", "x")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT: \"x\": invalid digit found in string");
    }
}
