//! Device and playback types shared across the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a [`SonosGateway`](super::SonosGateway) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network discovery could not complete.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// A device did not answer or refused the connection.
    #[error("device {host} unreachable: {reason}")]
    Unreachable { host: String, reason: String },

    /// A device answered with something the gateway could not interpret.
    #[error("protocol error from {host}: {reason}")]
    Protocol { host: String, reason: String },
}

/// Convenient Result alias for gateway operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A device as reported by one discovery or topology pass.
///
/// Descriptors are ephemeral; the resolver caches only the lightweight
/// projections it needs from them (host addresses, group names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Network address, the primary key across all caches.
    pub host: String,

    /// Group this device currently belongs to, if any.
    pub group_name: Option<String>,

    /// Address of the device coordinating this device's group. A device may
    /// coordinate itself.
    pub coordinator_ref: Option<String>,
}

/// Identity facts a device reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Canonical network address; this is what gets cached.
    pub host: String,

    /// Device UUID (RINCON_xxx format), when reported.
    pub uuid: Option<String>,

    /// Room name the device is assigned to, when reported.
    pub zone_name: Option<String>,
}

/// Transport status of a device, the closed set it can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportState {
    Playing,
    Transitioning,
    Paused,
    Stopped,
}

impl TransportState {
    /// True when the device is audibly playing (or about to be).
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing | Self::Transitioning)
    }
}

/// Track or stream metadata in either of its wire forms.
///
/// Devices report metadata as either a structured record or an opaque
/// display string; the untagged representation lets both forms round-trip
/// through the cache envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metadata {
    /// Structured track record.
    Track(TrackInfo),
    /// Free-form display string.
    Opaque(String),
}

/// Structured track metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track or stream title.
    pub title: String,

    /// Performing artist; radio and stream sources usually omit it.
    pub artist: Option<String>,
}

/// Snapshot of what a device is playing right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Transport status reported by the device.
    pub transport_state: TransportState,

    /// Stream-level metadata (radio and line-in sources), when reported.
    pub media: Option<Metadata>,

    /// Current track metadata, when reported.
    pub track: Option<Metadata>,
}
