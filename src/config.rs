//! Hub configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparsable tuning values fall back to defaults;
//! only an invalid `LISTEN_ADDR` is fatal.

use std::net::SocketAddr;

use crate::error::HubError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Log line format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`HubConfig::from_env`].
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Bound of the hub's event mailbox. Producers wait when it is full.
    pub hub_intake_capacity: usize,

    /// Per-connection outbound frame buffer. Frames for a client whose
    /// buffer is full are dropped for that client only.
    pub client_outbound_capacity: usize,

    /// Drop a room's roster once its last member leaves.
    pub prune_empty_rooms: bool,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            hub_intake_capacity: 1024,
            client_outbound_capacity: 64,
            prune_empty_rooms: false,
            log_format: LogFormat::Text,
        }
    }
}

impl HubConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`] if `LISTEN_ADDR` is set but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, HubError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, applying the
    /// same defaults and fallbacks as [`HubConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`] if `LISTEN_ADDR` is present but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HubError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| HubError::InvalidConfig(format!("LISTEN_ADDR {raw_addr:?}: {e}")))?;

        let defaults = Self::default();
        let hub_intake_capacity =
            parse_env(&lookup, "HUB_INTAKE_CAPACITY", defaults.hub_intake_capacity).max(1);
        let client_outbound_capacity = parse_env(
            &lookup,
            "CLIENT_OUTBOUND_CAPACITY",
            defaults.client_outbound_capacity,
        )
        .max(1);
        let prune_empty_rooms =
            parse_env_bool(&lookup, "HUB_PRUNE_EMPTY_ROOMS", defaults.prune_empty_rooms);
        let log_format = match lookup("LOG_FORMAT").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            hub_intake_capacity,
            client_outbound_capacity,
            prune_empty_rooms,
            log_format,
        })
    }
}

/// Parses the value under `key` as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses the value under `key` as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = HubConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert!(!config.prune_empty_rooms);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.hub_intake_capacity >= 1);
        assert!(config.client_outbound_capacity >= 1);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let Ok(config) = HubConfig::from_lookup(lookup_from(&[])) else {
            panic!("defaults should load");
        };
        let defaults = HubConfig::default();
        assert_eq!(config.listen_addr, defaults.listen_addr);
        assert_eq!(config.hub_intake_capacity, defaults.hub_intake_capacity);
        assert_eq!(config.client_outbound_capacity, defaults.client_outbound_capacity);
        assert_eq!(config.prune_empty_rooms, defaults.prune_empty_rooms);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_every_setting() {
        let lookup = lookup_from(&[
            ("LISTEN_ADDR", "127.0.0.1:4000"),
            ("HUB_INTAKE_CAPACITY", "16"),
            ("CLIENT_OUTBOUND_CAPACITY", "8"),
            ("HUB_PRUNE_EMPTY_ROOMS", "TRUE"),
            ("LOG_FORMAT", "Json"),
        ]);
        let Ok(config) = HubConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 4000)));
        assert_eq!(config.hub_intake_capacity, 16);
        assert_eq!(config.client_outbound_capacity, 8);
        assert!(config.prune_empty_rooms);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_listen_addr_is_rejected() {
        let result = HubConfig::from_lookup(lookup_from(&[("LISTEN_ADDR", "not-an-addr")]));
        assert!(matches!(result, Err(HubError::InvalidConfig(msg)) if msg.contains("LISTEN_ADDR")));
    }

    #[test]
    fn zero_capacities_clamp_to_one() {
        let lookup = lookup_from(&[
            ("HUB_INTAKE_CAPACITY", "0"),
            ("CLIENT_OUTBOUND_CAPACITY", "0"),
        ]);
        let Ok(config) = HubConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        assert_eq!(config.hub_intake_capacity, 1);
        assert_eq!(config.client_outbound_capacity, 1);
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        let lookup = lookup_from(&[
            ("HUB_INTAKE_CAPACITY", "lots"),
            ("CLIENT_OUTBOUND_CAPACITY", "-3"),
            ("HUB_PRUNE_EMPTY_ROOMS", "maybe"),
            ("LOG_FORMAT", "yaml"),
        ]);
        let Ok(config) = HubConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        let defaults = HubConfig::default();
        assert_eq!(config.hub_intake_capacity, defaults.hub_intake_capacity);
        assert_eq!(config.client_outbound_capacity, defaults.client_outbound_capacity);
        assert!(!config.prune_empty_rooms);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn parse_env_reads_set_values() {
        let lookup = lookup_from(&[("BID_HUB_CFG_NUM", " 42 "), ("BID_HUB_CFG_BAD", "4x")]);
        assert_eq!(parse_env(&lookup, "BID_HUB_CFG_NUM", 7usize), 42);
        assert_eq!(parse_env(&lookup, "BID_HUB_CFG_BAD", 7usize), 7);
        assert_eq!(parse_env(&lookup, "BID_HUB_CFG_UNSET", 7usize), 7);
    }

    #[test]
    fn parse_env_bool_is_case_insensitive() {
        let lookup = lookup_from(&[
            ("BID_HUB_CFG_UPPER", "TRUE"),
            ("BID_HUB_CFG_ZERO", "0"),
            ("BID_HUB_CFG_ONE", "1"),
            ("BID_HUB_CFG_FALSE", "False"),
            ("BID_HUB_CFG_JUNK", "yes"),
        ]);
        assert!(parse_env_bool(&lookup, "BID_HUB_CFG_UPPER", false));
        assert!(!parse_env_bool(&lookup, "BID_HUB_CFG_ZERO", true));
        assert!(parse_env_bool(&lookup, "BID_HUB_CFG_ONE", false));
        assert!(!parse_env_bool(&lookup, "BID_HUB_CFG_FALSE", true));
        assert!(parse_env_bool(&lookup, "BID_HUB_CFG_JUNK", true));
        assert!(!parse_env_bool(&lookup, "BID_HUB_CFG_UNSET", false));
    }
}
