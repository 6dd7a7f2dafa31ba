//! Expiring single-key cache slots.
//!
//! A [`CacheSlot`] binds one logical key on a [`StorageBackend`] to one value
//! type, with an optional time-to-live and a choice of payload codec. Values
//! are persisted as a JSON envelope carrying the write timestamp:
//!
//! ```text
//! { "timestamp": 1724580000000, "data": <payload> }
//! ```
//!
//! Reads are fail-open: a missing entry, an unreadable backend, a malformed
//! envelope, an expired timestamp, and an undecodable payload all come back
//! as `None`. Absence always has a legal handling in the layers above (fall
//! through to live resolution), so the cache never turns a read problem into
//! a hard error. Writes are the opposite: a value the caller asked to
//! persist failing to persist is a real error and propagates.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{StorageBackend, StorageResult};

/// Current wall-clock time in milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// How a value is written into the envelope's `data` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// Store the value's own JSON form directly.
    #[default]
    Verbatim,
    /// Store a JSON string containing the serialized value, for media that
    /// only accept string-like payloads.
    Encoded,
}

/// Persisted wrapper around a cached value.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    timestamp: u64,
    data: Value,
}

/// A cache slot bound to a single key.
///
/// Construction follows the builder style: [`new`](CacheSlot::new) yields a
/// slot with no ttl and the verbatim codec, [`with_ttl`](CacheSlot::with_ttl)
/// and [`encoded`](CacheSlot::encoded) refine it.
pub struct CacheSlot<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    ttl: Option<Duration>,
    codec: Codec,
    _value: PhantomData<fn() -> T>,
}

impl<T> CacheSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a slot for `key` with no expiry and the verbatim codec.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            ttl: None,
            codec: Codec::Verbatim,
            _value: PhantomData,
        }
    }

    /// Entries older than `ttl` read as absent.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Switches the slot to the encoded payload form.
    #[must_use]
    pub fn encoded(mut self) -> Self {
        self.codec = Codec::Encoded;
        self
    }

    /// Key this slot reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the cached value.
    ///
    /// Returns `None` when no entry exists, the entry has outlived the
    /// slot's ttl, or the entry cannot be read or decoded. Read problems are
    /// logged at debug level and never surface as errors.
    pub async fn get(&self) -> Option<T> {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::debug!("[Cache] {}: backend read failed: {}", self.key, err);
                return None;
            }
        };

        let envelope: Envelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                log::debug!("[Cache] {}: malformed envelope: {}", self.key, err);
                return None;
            }
        };

        if let Some(ttl) = self.ttl {
            let age_ms = now_millis().saturating_sub(envelope.timestamp);
            if age_ms >= ttl.as_millis() as u64 {
                log::debug!("[Cache] {}: entry expired ({} ms old)", self.key, age_ms);
                return None;
            }
        }

        let decoded = match self.codec {
            Codec::Verbatim => serde_json::from_value(envelope.data),
            Codec::Encoded => match envelope.data {
                Value::String(encoded) => serde_json::from_str(&encoded),
                other => {
                    log::debug!(
                        "[Cache] {}: expected string payload in encoded slot, got {}",
                        self.key,
                        other
                    );
                    return None;
                }
            },
        };

        match decoded {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("[Cache] {}: payload did not decode: {}", self.key, err);
                None
            }
        }
    }

    /// Writes `value` under a fresh timestamp, replacing any prior entry.
    pub async fn set(&self, value: &T) -> StorageResult<()> {
        let data = match self.codec {
            Codec::Verbatim => serde_json::to_value(value)?,
            Codec::Encoded => Value::String(serde_json::to_string(value)?),
        };
        let envelope = Envelope {
            timestamp: now_millis(),
            data,
        };
        self.backend
            .set(&self.key, serde_json::to_string(&envelope)?)
            .await
    }

    /// Removes the entry outright, regardless of ttl state.
    pub async fn clear(&self) -> StorageResult<()> {
        self.backend.remove(&self.key).await
    }
}
