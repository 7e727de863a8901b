//! Resolver configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{IpamError, IpamResult};

/// Environment variable naming the snapshot file
pub const ENV_SNAPSHOT: &str = "IPAM_SNAPSHOT";
/// Environment variable toggling reference validation
pub const ENV_STRICT: &str = "IPAM_STRICT";
/// Environment variable toggling pretty JSON output
pub const ENV_PRETTY: &str = "IPAM_PRETTY";

/// Configuration for loading a snapshot and building the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Path to the JSON snapshot
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Validate every reference in the snapshot before building indexes
    #[serde(default = "default_strict")]
    pub strict_references: bool,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty_output: bool,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("ipam-snapshot.json")
}

fn default_strict() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            strict_references: default_strict(),
            pretty_output: false,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> IpamResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> IpamResult<Self> {
        let defaults = Self::default();

        let snapshot_path = lookup(ENV_SNAPSHOT)
            .map(PathBuf::from)
            .unwrap_or(defaults.snapshot_path);

        let strict_references = match lookup(ENV_STRICT) {
            Some(value) => parse_bool(ENV_STRICT, &value)?,
            None => defaults.strict_references,
        };

        let pretty_output = match lookup(ENV_PRETTY) {
            Some(value) => parse_bool(ENV_PRETTY, &value)?,
            None => defaults.pretty_output,
        };

        Ok(Self {
            snapshot_path,
            strict_references,
            pretty_output,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> IpamResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(IpamError::Configuration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
