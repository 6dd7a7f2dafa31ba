//! Shared fixtures for the integration suite.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use baton::{
    DeviceDescriptor, DeviceIdentity, MemoryStorage, Metadata, PlaybackSnapshot, ResolverConfig,
    SonosGateway, TopologyResolver, TrackInfo, TransportError, TransportResult, TransportState,
};

/// Gateway that serves a fixed device list and counts every call.
pub struct ScriptedGateway {
    devices: Vec<DeviceDescriptor>,
    snapshot: PlaybackSnapshot,
    fail_discovery: bool,
    known_host_calls: AtomicUsize,
    discovery_calls: AtomicUsize,
    state_calls: AtomicUsize,
    toggle_calls: AtomicUsize,
    identity_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            devices,
            snapshot: playing("Daydreaming", "Radiohead"),
            fail_discovery: false,
            known_host_calls: AtomicUsize::new(0),
            discovery_calls: AtomicUsize::new(0),
            state_calls: AtomicUsize::new(0),
            toggle_calls: AtomicUsize::new(0),
            identity_calls: AtomicUsize::new(0),
        }
    }

    /// Gateway whose discovery always fails.
    pub fn failing() -> Self {
        let mut gateway = Self::new(Vec::new());
        gateway.fail_discovery = true;
        gateway
    }

    #[must_use]
    pub fn with_snapshot(mut self, snapshot: PlaybackSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn known_host_calls(&self) -> usize {
        self.known_host_calls.load(Ordering::SeqCst)
    }

    pub fn discovery_calls(&self) -> usize {
        self.discovery_calls.load(Ordering::SeqCst)
    }

    pub fn state_calls(&self) -> usize {
        self.state_calls.load(Ordering::SeqCst)
    }

    pub fn toggle_calls(&self) -> usize {
        self.toggle_calls.load(Ordering::SeqCst)
    }

    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SonosGateway for ScriptedGateway {
    async fn initialize_from_known_host(
        &self,
        _host: &str,
    ) -> TransportResult<Vec<DeviceDescriptor>> {
        self.known_host_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.devices.clone())
    }

    async fn initialize_via_discovery(
        &self,
        _timeout_secs: u64,
    ) -> TransportResult<Vec<DeviceDescriptor>> {
        self.discovery_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_discovery {
            return Err(TransportError::Discovery("scripted failure".into()));
        }
        Ok(self.devices.clone())
    }

    async fn get_state(&self, _host: &str) -> TransportResult<PlaybackSnapshot> {
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }

    async fn toggle_playback(&self, _host: &str) -> TransportResult<()> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_identity(&self, host: &str) -> TransportResult<DeviceIdentity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DeviceIdentity {
            host: host.to_string(),
            uuid: None,
            zone_name: None,
        })
    }
}

pub fn device(host: &str, group: &str, coordinator: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        host: host.into(),
        group_name: Some(group.into()),
        coordinator_ref: Some(coordinator.into()),
    }
}

/// Two devices, one group, coordinated by `192.168.1.10`.
pub fn household() -> Vec<DeviceDescriptor> {
    vec![
        device("192.168.1.10", "Living Room", "192.168.1.10"),
        device("192.168.1.11", "Living Room", "192.168.1.10"),
    ]
}

/// Three devices across two groups.
pub fn two_group_household() -> Vec<DeviceDescriptor> {
    let mut devices = household();
    devices.push(device("192.168.1.20", "Office", "192.168.1.20"));
    devices
}

pub fn playing(title: &str, artist: &str) -> PlaybackSnapshot {
    PlaybackSnapshot {
        transport_state: TransportState::Playing,
        media: None,
        track: Some(Metadata::Track(TrackInfo {
            title: title.into(),
            artist: Some(artist.into()),
        })),
    }
}

/// Resolver over a memory backend with default configuration.
pub fn resolver_over(gateway: Arc<ScriptedGateway>) -> (TopologyResolver, Arc<MemoryStorage>) {
    let backend = Arc::new(MemoryStorage::new());
    let resolver =
        TopologyResolver::with_backend(gateway, backend.clone(), ResolverConfig::default());
    (resolver, backend)
}
