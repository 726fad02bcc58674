//! Server settings read from the environment.

use std::path::PathBuf;

use crate::error::{CalendarError, CalendarResult};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port.
pub const DEFAULT_PORT: u16 = 3000;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of holiday tables; the built-in table is used when unset.
    pub holidays_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            holidays_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `HOLIDAYS_DIR` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidSetting`] if `PORT` is not a valid port.
    pub fn from_env() -> CalendarResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> CalendarResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| CalendarError::InvalidSetting {
                    name: "PORT".to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            holidays_dir: var("HOLIDAYS_DIR").map(PathBuf::from),
        })
    }

    /// Returns the host and port to bind.
    ///
    /// `HOST` may be an IP literal or a hostname such as `localhost`; names
    /// are resolved when the listener binds.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), ("0.0.0.0", 3000));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("HOLIDAYS_DIR", "./config/holidays"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.holidays_dir, Some(PathBuf::from("./config/holidays")));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("HOLIDAYS_DIR", "")]))
            .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.holidays_dir.is_none());
    }

    #[test]
    fn test_bad_port_is_an_error() {
        match ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])) {
            Err(CalendarError::InvalidSetting { name, value, .. }) => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("Expected InvalidSetting error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hostname_binds() {
        let config = ServerConfig::from_lookup(lookup(&[("HOST", "localhost"), ("PORT", "0")]))
            .unwrap();
        assert_eq!(config.bind_addr(), ("localhost", 0));

        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
