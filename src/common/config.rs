//! Settings for the passthru client.
//!
//! These come from the command line.  There is no settings file; the values
//! are only checked here so that a bad port count never reaches the daemon.
use simple_error::bail;
use std::path::Path;

use crate::common::box_error::BoxError;

/// number of input/output pairs registered when nothing else is asked for
pub const DEFAULT_PORT_PAIRS: usize = 4;
/// fallback client name when the executable name cannot be worked out
pub const DEFAULT_CLIENT_NAME: &str = "jack_passthru";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    name: String,
    ports: usize,
    start_server: bool,
    connect_system: bool,
}

impl ClientConfig {
    pub fn build(
        name: Option<String>,
        ports: usize,
        start_server: bool,
        connect_system: bool,
    ) -> Result<ClientConfig, BoxError> {
        let name = match name {
            Some(n) => n,
            None => default_client_name(),
        };
        if name.trim().is_empty() {
            bail!("client name must not be empty");
        }
        if name.contains(':') {
            bail!("client name '{}' must not contain ':'", name);
        }
        if ports == 0 {
            bail!("port count must be at least 1");
        }
        Ok(ClientConfig {
            name,
            ports,
            start_server,
            connect_system,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn ports(&self) -> usize {
        self.ports
    }
    pub fn start_server(&self) -> bool {
        self.start_server
    }
    pub fn connect_system(&self) -> bool {
        self.connect_system
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            name: default_client_name(),
            ports: DEFAULT_PORT_PAIRS,
            start_server: true,
            connect_system: false,
        }
    }
}

/// Name of the running executable, the same thing a C client gets from argv[0]
pub fn default_client_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .unwrap_or_else(|| String::from(DEFAULT_CLIENT_NAME))
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn build_keeps_values() {
        let config = ClientConfig::build(Some(String::from("thru")), 8, false, true).unwrap();
        assert_eq!(config.name(), "thru");
        assert_eq!(config.ports(), 8);
        assert!(!config.start_server());
        assert!(config.connect_system());
    }

    #[test]
    fn default_has_four_pairs() {
        let config = ClientConfig::default();
        assert_eq!(config.ports(), DEFAULT_PORT_PAIRS);
        assert!(config.start_server());
        assert!(!config.connect_system());
        assert!(!config.name().is_empty());
    }

    #[test]
    fn missing_name_uses_executable() {
        let config = ClientConfig::build(None, 2, true, false).unwrap();
        assert_eq!(config.name(), default_client_name());
    }

    #[test]
    fn zero_ports_rejected() {
        let result = ClientConfig::build(Some(String::from("thru")), 0, true, false);
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "port count must be at least 1"
        );
    }

    #[test]
    fn bad_names_rejected() {
        assert!(ClientConfig::build(Some(String::from("  ")), 4, true, false).is_err());
        assert!(ClientConfig::build(Some(String::from("a:b")), 4, true, false).is_err());
    }
}
