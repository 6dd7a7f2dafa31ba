//! Resolver configuration and the persisted cache key namespace.

use serde::{Deserialize, Serialize};

/// Persisted cache key namespace.
///
/// Four fixed logical keys make up the entire persisted state layout. Their
/// ttls (see [`CacheConfig`]) encode the relative volatility of each fact.
pub mod keys {
    /// Resolved coordinator host address.
    pub const COORDINATOR: &str = "coordinator";
    /// Explicit group selection; no ttl, persists until changed or cleared.
    pub const ACTIVE_GROUP: &str = "active-group";
    /// Last playback snapshot fetched from the coordinator.
    pub const STATE: &str = "state";
    /// Device host addresses from the last full discovery pass.
    pub const AVAILABLE_DEVICES: &str = "available-devices";
}

/// Staleness policy for the cache slots, in seconds.
///
/// The `active-group` slot intentionally has no ttl and therefore no entry
/// here: a user's selection holds until they change it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Ttl for the resolved coordinator address.
    pub coordinator_ttl_secs: u64,

    /// Ttl for the playback snapshot.
    pub state_ttl_secs: u64,

    /// Ttl for the discovered device address list.
    pub devices_ttl_secs: u64,
}

impl CacheConfig {
    /// Validates the ttl values.
    pub fn validate(&self) -> Result<(), String> {
        if self.coordinator_ttl_secs == 0 {
            return Err("coordinator_ttl_secs must be >= 1".to_string());
        }
        if self.state_ttl_secs == 0 {
            return Err("state_ttl_secs must be >= 1".to_string());
        }
        if self.devices_ttl_secs == 0 {
            return Err("devices_ttl_secs must be >= 1".to_string());
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            coordinator_ttl_secs: 20,
            state_ttl_secs: 5,
            devices_ttl_secs: 10,
        }
    }
}

/// Configuration for the topology resolver.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// How long a full network discovery pass may wait for answers (seconds).
    pub discovery_timeout_secs: u64,

    /// Per-slot staleness policy.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl ResolverConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.discovery_timeout_secs == 0 {
            return Err("discovery_timeout_secs must be >= 1".to_string());
        }
        self.cache.validate()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_secs: 3,
            cache: CacheConfig::default(),
        }
    }
}
