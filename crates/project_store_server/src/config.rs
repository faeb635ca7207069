//! Process configuration read from environment variables.
//!
//! Unset or unparsable values fall back to defaults; only the bind address is
//! validated strictly, at startup.

use project_store_core::{default_log_level, ReadFailurePolicy};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_FILE: &str = "data/projects.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub seed_on_start: bool,
    pub read_policy: ReadFailurePolicy,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed_on_start: true,
            read_policy: ReadFailurePolicy::Degrade,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `PROJECT_STORE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let flag = |name: &str, default: bool| {
            text(name).and_then(|v| parse_bool(&v)).unwrap_or(default)
        };

        Self {
            host: text("PROJECT_STORE_HOST").unwrap_or(defaults.host),
            port: text("PROJECT_STORE_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            data_file: text("PROJECT_STORE_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            seed_on_start: flag("PROJECT_STORE_SEED", defaults.seed_on_start),
            read_policy: if flag("PROJECT_STORE_STRICT_READS", false) {
                ReadFailurePolicy::Strict
            } else {
                ReadFailurePolicy::Degrade
            },
            log_level: text("PROJECT_STORE_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: text("PROJECT_STORE_LOG_DIR"),
        }
    }

    /// Resolves `host:port` into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|err| format!("invalid PROJECT_STORE_HOST `{}`: {err}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_PORT};
    use project_store_core::ReadFailurePolicy;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("PROJECT_STORE_HOST", "127.0.0.1"),
            ("PROJECT_STORE_PORT", "8080"),
            ("PROJECT_STORE_DATA_FILE", "/srv/projects.json"),
            ("PROJECT_STORE_SEED", "no"),
            ("PROJECT_STORE_STRICT_READS", "TRUE"),
            ("PROJECT_STORE_LOG_LEVEL", "warn"),
            ("PROJECT_STORE_LOG_DIR", "/var/log/project-store"),
        ]);

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/srv/projects.json"));
        assert!(!config.seed_on_start);
        assert_eq!(config.read_policy, ReadFailurePolicy::Strict);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/project-store"));
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[
            ("PROJECT_STORE_PORT", "seventy"),
            ("PROJECT_STORE_SEED", "maybe"),
            ("PROJECT_STORE_LOG_DIR", "   "),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed_on_start);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_host_is_reported() {
        let config = config_from(&[("PROJECT_STORE_HOST", "not-an-ip")]);
        let err = config.bind_addr().unwrap_err();
        assert!(err.contains("PROJECT_STORE_HOST"));
    }
}
