//! Playback state machine shared by the transport buttons and the frame loop.

/// A transport button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportAction {
    Play,
    Pause,
    Stop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Paused,
    Playing,
}

/// Playback state plus per-track mute flags.
///
/// The scene only animates while playing; pausing freezes the orbit and the
/// control values where they are, stopping additionally rewinds the tracks
/// (the front end owns the actual media elements).
pub struct Transport {
    state: TransportState,
    muted: Vec<bool>,
}

impl Transport {
    pub fn new(track_count: usize) -> Self {
        Self {
            state: TransportState::Stopped,
            muted: vec![false; track_count],
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn track_count(&self) -> usize {
        self.muted.len()
    }

    /// Apply a button press. Pause is only meaningful while playing; a pause
    /// from stopped stays stopped rather than inventing a paused-at-zero
    /// state.
    pub fn apply(&mut self, action: TransportAction) {
        self.state = match (self.state, action) {
            (_, TransportAction::Play) => TransportState::Playing,
            (TransportState::Playing, TransportAction::Pause) => TransportState::Paused,
            (s, TransportAction::Pause) => s,
            (_, TransportAction::Stop) => TransportState::Stopped,
        };
    }

    /// Flip a track's mute flag and return the gain the front end should set,
    /// or `None` for an out-of-range track index.
    pub fn toggle_mute(&mut self, track: usize) -> Option<f32> {
        let slot = self.muted.get_mut(track)?;
        *slot = !*slot;
        Some(if *slot { 0.0 } else { 1.0 })
    }

    pub fn is_muted(&self, track: usize) -> bool {
        self.muted.get(track).copied().unwrap_or(false)
    }
}
