use crate::clock::Clock;
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::library::Library;
use crate::onboarding::{OnboardingPatch, OnboardingState};
use crate::player::PlayerState;
use crate::sound::Sound;
use crate::user::{User, UserPatch};
use serde::Serialize;
use std::time::Duration;

/// Everything the app knows about the current user session.
///
/// Mutation methods are total: unknown ids are no-ops reported through the
/// returned `bool`, except [`AppState::add_to_playlist`], which reports the
/// missing side as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub user: User,
    pub onboarding: OnboardingState,
    pub library: Library,
    pub player: PlayerState,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_user(&mut self, patch: UserPatch) {
        self.user.apply(patch);
    }

    /// Move the wizard to `step`, clamped onto its page range
    pub fn set_onboarding_step(&mut self, step: i32) {
        self.onboarding.set_step(step);
    }

    pub fn update_onboarding(&mut self, patch: OnboardingPatch) {
        self.onboarding.apply(patch);
    }

    /// Discard the wizard session unconditionally
    pub fn reset_onboarding(&mut self) {
        self.onboarding = OnboardingState::default();
    }

    /// Commit the wizard's generated sound into the library and return it.
    /// The session itself is left for the caller to reset.
    pub fn commit_generated_sound(&mut self) -> Option<Sound> {
        let sound = self.onboarding.generated_sound.clone()?;
        self.library.add_sound(sound.clone());
        Some(sound)
    }

    pub fn add_sound(&mut self, sound: Sound) {
        self.library.add_sound(sound);
    }

    pub fn remove_sound(&mut self, id: &str) -> bool {
        self.library.remove_sound(id)
    }

    pub fn update_sound_progress(&mut self, id: &str, progress: f32) -> bool {
        self.library.update_sound_progress(id, progress)
    }

    /// Append an empty playlist stamped with the clock's time; returns its id
    pub fn create_playlist(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        clock: &dyn Clock,
    ) -> String {
        self.library
            .create_playlist(name, description, clock.now(), clock.now_millis())
    }

    /// # Errors
    ///
    /// Returns `SoundNotFound` or `PlaylistNotFound`; the state is unchanged on error.
    pub fn add_to_playlist(&mut self, playlist_id: &str, sound_id: &str) -> Result<()> {
        self.library.add_to_playlist(playlist_id, sound_id)
    }

    pub fn remove_from_playlist(&mut self, playlist_id: &str, sound_id: &str) -> bool {
        self.library.remove_from_playlist(playlist_id, sound_id)
    }

    pub fn delete_playlist(&mut self, playlist_id: &str) -> bool {
        self.library.delete_playlist(playlist_id)
    }

    pub fn play_sound(&mut self, sound: Sound) {
        self.player.play(sound);
    }

    pub fn pause_sound(&mut self) {
        self.player.pause();
    }

    pub fn update_player_progress(&mut self, position: Duration, duration: Duration) {
        self.player.set_progress(position, duration);
    }

    pub fn set_player_rate(&mut self, rate: f32, limits: &PlayerConfig) {
        self.player.set_rate(rate, limits.min_rate, limits.max_rate);
    }

    pub fn set_player_volume(&mut self, volume: f32) {
        self.player.set_volume(volume);
    }
}
