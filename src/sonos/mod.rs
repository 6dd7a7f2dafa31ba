//! Sonos-facing types and the transport seam.

pub mod traits;
pub mod types;

pub use traits::SonosGateway;
pub use types::{
    DeviceDescriptor, DeviceIdentity, Metadata, PlaybackSnapshot, TrackInfo, TransportError,
    TransportResult, TransportState,
};
