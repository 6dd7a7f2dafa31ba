//! Tiered coordinator and playback-state resolution.
//!
//! Resolving "which device do I talk to" walks an ordered chain from
//! cheapest to most expensive: cached coordinator address, explicit group
//! selection, cached device addresses, topology load from a known device,
//! full network discovery. Every successful resolution writes its findings
//! back into the cache slots so the next call short-circuits earlier in the
//! chain.
//!
//! Absence and failure stay distinct throughout: "nothing is configured and
//! nothing could be implied" is a `None` the caller turns into a prompt,
//! while "a selected group matches no coordinator" is a real error.

pub mod format;
pub mod policy;

pub use format::format_playing_state;
pub use policy::resolve_implicit_group;

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheSlot;
use crate::config::{keys, CacheConfig, ResolverConfig};
use crate::error::{BatonError, BatonResult};
use crate::sonos::{DeviceDescriptor, PlaybackSnapshot, SonosGateway};
use crate::storage::StorageBackend;

/// Handle to a resolved group coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinator {
    host: String,
}

impl Coordinator {
    /// Address of the coordinating device.
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Options for [`TopologyResolver::latest_state`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StateOptions {
    /// Skip the cached snapshot for this one call. The freshly fetched
    /// snapshot is still written back; nothing is cleared.
    pub ignore_cache: bool,
}

/// The cache slots backing a resolver, one per persisted key.
pub struct ResolverCaches {
    coordinator: CacheSlot<String>,
    active_group: CacheSlot<String>,
    state: CacheSlot<PlaybackSnapshot>,
    devices: CacheSlot<Vec<String>>,
}

impl ResolverCaches {
    /// Builds the slot set on `backend` with the ttls from `config`.
    pub fn new(backend: Arc<dyn StorageBackend>, config: &CacheConfig) -> Self {
        Self {
            coordinator: CacheSlot::new(backend.clone(), keys::COORDINATOR)
                .with_ttl(Duration::from_secs(config.coordinator_ttl_secs)),
            active_group: CacheSlot::new(backend.clone(), keys::ACTIVE_GROUP),
            state: CacheSlot::new(backend.clone(), keys::STATE)
                .with_ttl(Duration::from_secs(config.state_ttl_secs)),
            devices: CacheSlot::new(backend, keys::AVAILABLE_DEVICES)
                .with_ttl(Duration::from_secs(config.devices_ttl_secs)),
        }
    }
}

/// Cache-first topology resolution over a [`SonosGateway`].
///
/// Holds no interior mutability: construct once at startup and share by
/// reference. Calls are expected to arrive sequentially (one user action at
/// a time); overlapping calls are safe but the slots then follow
/// last-write-wins per key.
pub struct TopologyResolver {
    gateway: Arc<dyn SonosGateway>,
    caches: ResolverCaches,
    config: ResolverConfig,
}

impl TopologyResolver {
    /// Creates a resolver over `gateway` with externally built cache slots.
    pub fn new(
        gateway: Arc<dyn SonosGateway>,
        caches: ResolverCaches,
        config: ResolverConfig,
    ) -> Self {
        Self {
            gateway,
            caches,
            config,
        }
    }

    /// Convenience constructor wiring the slots onto `backend` with the
    /// ttls from `config`.
    pub fn with_backend(
        gateway: Arc<dyn SonosGateway>,
        backend: Arc<dyn StorageBackend>,
        config: ResolverConfig,
    ) -> Self {
        let caches = ResolverCaches::new(backend, &config.cache);
        Self::new(gateway, caches, config)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Devices and groups
    // ─────────────────────────────────────────────────────────────────────

    /// Current device list.
    ///
    /// Any cached address lets the gateway load the household topology from
    /// that device instead of sweeping the network. A full discovery pass
    /// runs only when no address is cached, and its resulting addresses are
    /// cached for next time.
    pub async fn available_devices(&self) -> BatonResult<Vec<DeviceDescriptor>> {
        if let Some(hosts) = self.caches.devices.get().await {
            if let Some(first) = hosts.first() {
                log::debug!("[Resolver] loading topology from known device {}", first);
                let devices = self.gateway.initialize_from_known_host(first).await?;
                return Ok(devices);
            }
            // An empty cached list cannot seed a topology load; treat it as
            // a miss and rediscover.
        }

        log::info!(
            "[Resolver] no cached device addresses, discovering (up to {}s)",
            self.config.discovery_timeout_secs
        );
        let devices = self
            .gateway
            .initialize_via_discovery(self.config.discovery_timeout_secs)
            .await?;
        let hosts: Vec<String> = devices.iter().map(|device| device.host.clone()).collect();
        self.caches.devices.set(&hosts).await?;
        log::debug!("[Resolver] discovery found {} device(s)", devices.len());
        Ok(devices)
    }

    /// Distinct group names across the current device list, in first-seen
    /// order.
    pub async fn available_groups(&self) -> BatonResult<Vec<String>> {
        let devices = self.available_devices().await?;
        Ok(distinct_groups(&devices))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Coordinator resolution
    // ─────────────────────────────────────────────────────────────────────

    /// Resolves the coordinator of the active group.
    ///
    /// Walks the fallback chain described in the module docs. `Ok(None)`
    /// means nothing is configured and no single group could be implied, a
    /// normal state the caller surfaces as "pick a group".
    ///
    /// # Errors
    ///
    /// [`BatonError::NoCoordinator`] when the selected group matches no
    /// device's coordinator; transport and cache-write failures propagate.
    pub async fn active_coordinator(&self) -> BatonResult<Option<Coordinator>> {
        if let Some(host) = self.caches.coordinator.get().await {
            log::debug!("[Resolver] coordinator {} served from cache", host);
            return Ok(Some(Coordinator { host }));
        }

        let explicit = self.caches.active_group.get().await;
        let devices = self.available_devices().await?;
        let groups = distinct_groups(&devices);

        let Some(target) = resolve_implicit_group(&groups, explicit.as_deref()) else {
            log::info!(
                "[Resolver] no active group configured and {} group(s) visible",
                groups.len()
            );
            return Ok(None);
        };

        let member = devices
            .iter()
            .find(|device| device.group_name.as_deref() == Some(target));
        let coordinator_ref = member
            .and_then(|device| device.coordinator_ref.as_deref())
            .ok_or_else(|| BatonError::NoCoordinator(target.to_string()))?;

        // The member names its coordinator by reference; ask that device for
        // its canonical address before caching.
        let identity = self.gateway.get_identity(coordinator_ref).await?;
        self.caches.coordinator.set(&identity.host).await?;
        log::info!(
            "[Resolver] group \"{}\" coordinated by {}",
            target,
            identity.host
        );
        Ok(Some(Coordinator {
            host: identity.host,
        }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Playback state
    // ─────────────────────────────────────────────────────────────────────

    /// Latest playback snapshot from the active coordinator.
    ///
    /// Cache-first unless `options.ignore_cache`. `Ok(None)` mirrors
    /// [`active_coordinator`](Self::active_coordinator) resolving to none:
    /// nothing is configured, so there is no state to report, and that is
    /// not an error.
    pub async fn latest_state(
        &self,
        options: StateOptions,
    ) -> BatonResult<Option<PlaybackSnapshot>> {
        if !options.ignore_cache {
            if let Some(snapshot) = self.caches.state.get().await {
                log::debug!("[Resolver] playback state served from cache");
                return Ok(Some(snapshot));
            }
        }

        let Some(coordinator) = self.active_coordinator().await? else {
            log::info!("[Resolver] no coordinator available, returning no state");
            return Ok(None);
        };

        let snapshot = self.gateway.get_state(coordinator.host()).await?;
        self.caches.state.set(&snapshot).await?;
        Ok(Some(snapshot))
    }

    /// Toggles play/pause on the active coordinator.
    ///
    /// Returns the coordinator that was toggled, or `None` when nothing is
    /// configured. The cached snapshot is dropped so the next
    /// [`latest_state`](Self::latest_state) reports the post-toggle truth.
    pub async fn toggle_playback(&self) -> BatonResult<Option<Coordinator>> {
        let Some(coordinator) = self.active_coordinator().await? else {
            return Ok(None);
        };
        self.gateway.toggle_playback(coordinator.host()).await?;
        self.caches.state.clear().await?;
        log::info!("[Resolver] toggled playback on {}", coordinator.host());
        Ok(Some(coordinator))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Group selection
    // ─────────────────────────────────────────────────────────────────────

    /// Currently selected group, if any.
    pub async fn active_group(&self) -> Option<String> {
        self.caches.active_group.get().await
    }

    /// Selects `group` as the active group.
    ///
    /// Also drops the cached coordinator and snapshot: they described the
    /// previous selection and must not win the next resolution's first tier.
    pub async fn set_active_group(&self, group: impl Into<String>) -> BatonResult<()> {
        let group = group.into();
        self.caches.active_group.set(&group).await?;
        self.caches.coordinator.clear().await?;
        self.caches.state.clear().await?;
        log::info!("[Resolver] active group set to \"{}\"", group);
        Ok(())
    }

    /// Clears the group selection along with the cached coordinator and
    /// snapshot.
    pub async fn clear_active_group(&self) -> BatonResult<()> {
        self.caches.active_group.clear().await?;
        self.caches.coordinator.clear().await?;
        self.caches.state.clear().await?;
        log::info!("[Resolver] active group cleared");
        Ok(())
    }
}

/// Distinct non-null group names in first-seen order.
fn distinct_groups(devices: &[DeviceDescriptor]) -> Vec<String> {
    let mut groups = Vec::new();
    for device in devices {
        if let Some(name) = &device.group_name {
            if !groups.contains(name) {
                groups.push(name.clone());
            }
        }
    }
    groups
}
