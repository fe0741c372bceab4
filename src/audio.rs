//! Sound cue dispatch
//!
//! The simulation raises events; the host turns some of them into sound
//! cues. Playback is fire-and-forget: a backend that fails (device missing,
//! autoplay blocked, decode error) is logged and otherwise ignored.

use std::fmt;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flapped
    Flap,
    /// Bird hit something
    Hit,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Crashed { .. } => Some(SoundEffect::Hit),
            GameEvent::Scored { .. } | GameEvent::Reset => None,
        }
    }
}

/// Why a backend could not play a cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No output device or the sample never loaded
    Unavailable,
    /// The platform refused playback
    Rejected(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Unavailable => write!(f, "audio unavailable"),
            PlaybackError::Rejected(reason) => write!(f, "playback rejected: {}", reason),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), PlaybackError>;
}

/// Backend for headless runs: logs each cue at trace level
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), PlaybackError> {
        log::trace!("cue {:?} at volume {:.2}", effect, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Never fails.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect, vol) {
            log::debug!("Sound cue {:?} dropped: {}", effect, e);
        }
    }

    /// Play the cue (if any) for each event
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
