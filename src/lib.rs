//! Baton - cached topology resolution for multi-room Sonos control.
//!
//! Controlling a Sonos household starts with a question that is surprisingly
//! expensive to answer: which device currently coordinates the group being
//! controlled? Discovering that from scratch is a multi-second network pass,
//! far too slow to sit in front of every play/pause keystroke. This crate
//! answers it through a small layered cache with a per-fact staleness
//! policy, falling back to live discovery only when the caches run dry.
//!
//! # Architecture
//!
//! - [`storage`]: persistence backends behind the [`StorageBackend`] trait
//! - [`cache`]: expiring single-key cache slots over a backend
//! - [`sonos`]: device/playback types and the [`SonosGateway`] seam
//! - [`resolver`]: tiered coordinator and playback-state resolution
//! - [`config`]: staleness policy and the persisted key namespace
//! - [`error`]: crate-level error type
//!
//! The crate deliberately ships no network code. The transport protocol is a
//! collaborator, not part of this core: bring a [`SonosGateway`]
//! implementation and pick a [`StorageBackend`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use baton::{MemoryStorage, ResolverConfig, SonosGateway, StateOptions, TopologyResolver};
//! # async fn example(gateway: Arc<dyn SonosGateway>) -> baton::BatonResult<()> {
//! let backend = Arc::new(MemoryStorage::new());
//! let resolver = TopologyResolver::with_backend(gateway, backend, ResolverConfig::default());
//!
//! if let Some(coordinator) = resolver.active_coordinator().await? {
//!     println!("talk to {}", coordinator.host());
//! }
//! let state = resolver.latest_state(StateOptions::default()).await?;
//! println!("{}", baton::format_playing_state(state.as_ref()).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod resolver;
pub mod sonos;
pub mod storage;

// Re-export commonly used types at the crate root
pub use cache::{CacheSlot, Codec};
pub use config::{keys, CacheConfig, ResolverConfig};
pub use error::{BatonError, BatonResult};
pub use resolver::{
    format_playing_state, resolve_implicit_group, Coordinator, ResolverCaches, StateOptions,
    TopologyResolver,
};
pub use sonos::{
    DeviceDescriptor, DeviceIdentity, Metadata, PlaybackSnapshot, SonosGateway, TrackInfo,
    TransportError, TransportResult, TransportState,
};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError, StorageResult};
