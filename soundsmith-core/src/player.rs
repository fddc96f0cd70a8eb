use crate::sound::Sound;
use crate::time::DurationExt;
use serde::Serialize;
use std::time::Duration;

/// Playback rate on a fresh player
pub const DEFAULT_RATE: f32 = 1.0;

/// Volume on a fresh player
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Current "now playing" transport state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// Sound loaded into the player; need not be in the library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_sound: Option<Sound>,
    /// Whether the sound is currently playing
    pub is_playing: bool,
    /// Length reported by the playback driver
    pub duration: Duration,
    /// Position reported by the playback driver, never past `duration`
    pub position: Duration,
    /// Speed multiplier
    pub rate: f32,
    /// Output volume in [0.0, 1.0]
    pub volume: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_sound: None,
            is_playing: false,
            duration: Duration::ZERO,
            position: Duration::ZERO,
            rate: DEFAULT_RATE,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlayerState {
    /// Load `sound` and start playing. Position and duration are left as they were.
    pub fn play(&mut self, sound: Sound) {
        self.current_sound = Some(sound);
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Record a progress report, clamping the position to the duration
    pub fn set_progress(&mut self, position: Duration, duration: Duration) {
        self.duration = duration;
        self.position = position.min(duration);
    }

    /// Set the rate, clamped to the bounds given in either order.
    /// Non-finite rates are ignored, as are non-finite bounds.
    pub fn set_rate(&mut self, rate: f32, min: f32, max: f32) {
        if !rate.is_finite() {
            return;
        }
        let (low, high) = if min <= max { (min, max) } else { (max, min) };

        let mut rate = rate;
        if low.is_finite() {
            rate = rate.max(low);
        }
        if high.is_finite() {
            rate = rate.min(high);
        }
        self.rate = rate;
    }

    /// Set the volume, clamped to [0.0, 1.0]. Non-finite volumes are ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Length to show for the loaded sound: the reported duration, or the
    /// sound's own length before any report arrives
    #[must_use]
    pub fn effective_duration(&self) -> Duration {
        if !self.duration.is_zero() {
            return self.duration;
        }
        self.current_sound
            .as_ref()
            .map_or(Duration::ZERO, Sound::duration)
    }

    /// Position as a fraction of the effective duration
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        self.position.fraction_of(self.effective_duration())
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.effective_duration().saturating_sub(self.position)
    }

    /// Whether the loaded sound has the given id
    #[must_use]
    pub fn is_current(&self, sound_id: &str) -> bool {
        self.current_sound.as_ref().is_some_and(|s| s.id == sound_id)
    }
}
