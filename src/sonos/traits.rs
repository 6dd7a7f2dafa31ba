//! Transport seam between the resolver and the physical system.

use async_trait::async_trait;

use super::types::{DeviceDescriptor, DeviceIdentity, PlaybackSnapshot, TransportResult};

/// Remote operations the resolver needs from a Sonos household.
///
/// The crate ships no network implementation of this trait; embedders bring
/// their own, tests bring a scripted one. Every method is a suspension point
/// and may fail with a transport-level error, which the resolver propagates
/// without retrying.
#[async_trait]
pub trait SonosGateway: Send + Sync {
    /// Loads the current device list by asking one already-known device for
    /// the household topology.
    ///
    /// Much cheaper than a network-wide pass; preferred whenever any
    /// previously seen address is available.
    async fn initialize_from_known_host(
        &self,
        host: &str,
    ) -> TransportResult<Vec<DeviceDescriptor>>;

    /// Runs a full network discovery pass, waiting up to `timeout_secs` for
    /// devices to answer.
    async fn initialize_via_discovery(
        &self,
        timeout_secs: u64,
    ) -> TransportResult<Vec<DeviceDescriptor>>;

    /// Fetches the playback snapshot from the device at `host`.
    async fn get_state(&self, host: &str) -> TransportResult<PlaybackSnapshot>;

    /// Toggles play/pause on the device at `host`.
    async fn toggle_playback(&self, host: &str) -> TransportResult<()>;

    /// Asks the device at `host` who it is.
    ///
    /// The returned identity's host is the canonical address for caching;
    /// `host` itself may be any reference that reaches the device.
    async fn get_identity(&self, host: &str) -> TransportResult<DeviceIdentity>;
}
