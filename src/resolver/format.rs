//! Playback snapshot to display text.

use crate::sonos::{Metadata, PlaybackSnapshot, TransportState};

const PLAYING_MARKER: &str = "▶︎";
const PAUSED_MARKER: &str = "⏸";

/// Renders a snapshot as a one-line display string.
///
/// Returns `None` when there is no snapshot or the transport is stopped: a
/// stopped system shows nothing rather than a frozen last track. Stream
/// metadata (radio and line-in sources) takes precedence over track
/// metadata, and a structured record renders its title (plus artist for
/// tracks) while the opaque form passes through as-is.
pub fn format_playing_state(state: Option<&PlaybackSnapshot>) -> Option<String> {
    let state = state?;
    if state.transport_state == TransportState::Stopped {
        return None;
    }
    let marker = if state.transport_state.is_playing() {
        PLAYING_MARKER
    } else {
        PAUSED_MARKER
    };

    match &state.media {
        Some(Metadata::Track(info)) => Some(format!("{marker}{}", info.title)),
        Some(Metadata::Opaque(text)) => Some(format!("{marker}{text}")),
        None => match &state.track {
            Some(Metadata::Track(info)) => match &info.artist {
                Some(artist) => Some(format!("{marker}{} - {}", info.title, artist)),
                None => Some(format!("{marker}{}", info.title)),
            },
            Some(Metadata::Opaque(text)) => Some(format!("{marker}{text}")),
            None => None,
        },
    }
}
