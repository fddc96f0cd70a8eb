use crate::catalog::SoundPreset;
use crate::clock::{Clock, SystemClock};
use crate::config::{GenerationConfig, PlayerConfig, SoundsmithConfig};
use crate::error::Result;
use crate::explore::ExploreFilters;
use crate::generation::GenerationTask;
use crate::generator::{generate_random_sound, GenerationRequest};
use crate::onboarding::{OnboardingPatch, OnboardingState};
use crate::player::PlayerState;
use crate::sound::{Playlist, Sound};
use crate::state::AppState;
use crate::user::{User, UserPatch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const LOG_TARGET: &str = "soundsmith::store";

/// Events emitted by the store, one per effective mutation, in invocation order
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// User profile fields changed
    UserUpdated,
    /// Onboarding session changed; carries the resulting step
    OnboardingUpdated { step: u8 },
    /// Onboarding session was reset to its initial value
    OnboardingReset,
    /// A sound was prepended to the library
    SoundAdded { sound_id: String },
    /// A sound was removed from the library and all playlists
    SoundRemoved { sound_id: String },
    /// Listening progress was recorded on a library sound
    SoundProgressUpdated { sound_id: String, progress: f32 },
    PlaylistCreated { playlist_id: String },
    /// A playlist's sound list changed
    PlaylistUpdated { playlist_id: String },
    PlaylistDeleted { playlist_id: String },
    /// A sound was loaded into the player and started
    PlaybackStarted { sound_id: String },
    PlaybackPaused { position: Duration },
    /// The playback driver reported a new position
    ProgressUpdated { position: Duration, duration: Duration },
    RateChanged { rate: f32 },
    VolumeChanged { volume: f32 },
    /// A sound generation was scheduled
    GenerationStarted,
    /// Periodic tick while a generation is pending
    GenerationProgress { elapsed: Duration, total: Duration },
    /// A pending generation was cancelled before completing
    GenerationCancelled,
    /// A generation completed; the sound is now the onboarding result
    SoundGenerated { sound_id: String },
}

/// Store state guarded by the lock
struct StoreInner {
    state: AppState,
    rng: StdRng,
    /// Bumped on every onboarding reset; generations from an older epoch are stale
    onboarding_epoch: u64,
    pending_generation: Option<CancellationToken>,
}

/// Shared application state store.
///
/// Owned by the application root and handed to consumers as `Arc<AppStore>`.
/// Every mutation takes the write lock and emits its [`StoreEvent`] before
/// releasing it, so subscribers see mutations in the order they were made.
pub struct AppStore {
    inner: RwLock<StoreInner>,
    event_tx: broadcast::Sender<StoreEvent>,
    clock: Arc<dyn Clock>,
    player_limits: PlayerConfig,
    generation: GenerationConfig,
}

impl AppStore {
    /// Create a store with the initial state and the given time and randomness sources
    #[must_use]
    pub fn new(config: &SoundsmithConfig, clock: Arc<dyn Clock>, rng: StdRng) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(256);

        Arc::new(Self {
            inner: RwLock::new(StoreInner {
                state: AppState::new(),
                rng,
                onboarding_epoch: 0,
                pending_generation: None,
            }),
            event_tx,
            clock,
            player_limits: config.player.clone(),
            generation: config.generation.clone(),
        })
    }

    /// Create a store using the system clock and an entropy-seeded rng
    #[must_use]
    pub fn with_system_sources(config: &SoundsmithConfig) -> Arc<Self> {
        Self::new(config, Arc::new(SystemClock), StdRng::from_entropy())
    }

    /// Subscribe to store events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[must_use]
    pub const fn player_limits(&self) -> &PlayerConfig {
        &self.player_limits
    }

    fn emit(&self, event: StoreEvent) {
        let _ = self.event_tx.send(event);
    }

    // ---- reads ----

    /// Live read access to the whole state. Hold the guard briefly: writers wait on it.
    pub async fn state(&self) -> RwLockReadGuard<'_, AppState> {
        RwLockReadGuard::map(self.inner.read().await, |inner| &inner.state)
    }

    pub async fn snapshot(&self) -> AppState {
        self.state().await.clone()
    }

    pub async fn user(&self) -> User {
        self.state().await.user.clone()
    }

    pub async fn onboarding(&self) -> OnboardingState {
        self.state().await.onboarding.clone()
    }

    pub async fn sounds(&self) -> Vec<Sound> {
        self.state().await.library.sounds.clone()
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.state().await.library.playlists.clone()
    }

    pub async fn sound(&self, id: &str) -> Option<Sound> {
        self.state().await.library.sound(id).cloned()
    }

    pub async fn playlist(&self, id: &str) -> Option<Playlist> {
        self.state().await.library.playlist(id).cloned()
    }

    pub async fn player(&self) -> PlayerState {
        self.state().await.player.clone()
    }

    /// Library sounds passing `filters`, in library order
    pub async fn explore(&self, filters: &ExploreFilters) -> Vec<Sound> {
        let state = self.state().await;
        filters
            .apply(&state.library.sounds)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn recent_sounds(&self) -> Vec<Sound> {
        let state = self.state().await;
        state.library.recent_sounds().into_iter().cloned().collect()
    }

    pub async fn in_progress_sounds(&self) -> Vec<Sound> {
        let state = self.state().await;
        state.library.in_progress_sounds().into_iter().cloned().collect()
    }

    // ---- user ----

    /// Merge `patch` into the profile. An empty patch changes nothing.
    pub async fn update_user(&self, patch: UserPatch) {
        if patch.is_empty() {
            return;
        }
        let mut inner = self.inner.write().await;
        inner.state.update_user(patch);
        self.emit(StoreEvent::UserUpdated);
    }

    // ---- onboarding ----

    /// Move the wizard to `step`, clamped onto its page range
    pub async fn set_onboarding_step(&self, step: i32) {
        let mut inner = self.inner.write().await;
        inner.state.set_onboarding_step(step);
        let step = inner.state.onboarding.step;
        self.emit(StoreEvent::OnboardingUpdated { step });
    }

    pub async fn update_onboarding(&self, patch: OnboardingPatch) {
        let mut inner = self.inner.write().await;
        inner.state.update_onboarding(patch);
        let step = inner.state.onboarding.step;
        self.emit(StoreEvent::OnboardingUpdated { step });
    }

    /// Go to the next wizard page; returns the resulting step
    pub async fn advance_onboarding(&self) -> u8 {
        let mut inner = self.inner.write().await;
        let next = i32::from(inner.state.onboarding.step) + 1;
        inner.state.set_onboarding_step(next);
        let step = inner.state.onboarding.step;
        self.emit(StoreEvent::OnboardingUpdated { step });
        step
    }

    /// Go to the previous wizard page; returns the resulting step
    pub async fn retreat_onboarding(&self) -> u8 {
        let mut inner = self.inner.write().await;
        let previous = i32::from(inner.state.onboarding.step) - 1;
        inner.state.set_onboarding_step(previous);
        let step = inner.state.onboarding.step;
        self.emit(StoreEvent::OnboardingUpdated { step });
        step
    }

    /// Select `preference_id`, or deselect it if already selected
    pub async fn toggle_onboarding_preference(&self, preference_id: &str) {
        let mut inner = self.inner.write().await;
        let preferences = inner.state.onboarding.toggled_preferences(preference_id);
        inner
            .state
            .update_onboarding(OnboardingPatch::new().preferences(preferences));
        let step = inner.state.onboarding.step;
        self.emit(StoreEvent::OnboardingUpdated { step });
    }

    /// Replace the selected preferences with a preset's
    pub async fn apply_onboarding_preset(&self, preset: &SoundPreset) {
        self.update_onboarding(
            OnboardingPatch::new().preferences(OnboardingState::preset_preferences(preset)),
        )
        .await;
    }

    /// Discard the wizard session and cancel any pending generation
    pub async fn reset_onboarding(&self) {
        let mut inner = self.inner.write().await;
        inner.onboarding_epoch = inner.onboarding_epoch.wrapping_add(1);

        if let Some(token) = inner.pending_generation.take() {
            if !token.is_cancelled() {
                token.cancel();
                info!(target: LOG_TARGET, "Cancelled pending generation on onboarding reset");
                self.emit(StoreEvent::GenerationCancelled);
            }
        }

        inner.state.reset_onboarding();
        self.emit(StoreEvent::OnboardingReset);
    }

    /// Add the wizard's generated sound to the library and return it
    pub async fn commit_generated_sound(&self) -> Option<Sound> {
        let mut inner = self.inner.write().await;
        let sound = inner.state.commit_generated_sound()?;
        info!(target: LOG_TARGET, "Saved generated sound {} ({})", sound.title, sound.id);
        self.emit(StoreEvent::SoundAdded {
            sound_id: sound.id.clone(),
        });
        Some(sound)
    }

    // ---- generation ----

    /// Schedule generation of a sound from the current onboarding selections.
    ///
    /// Any generation still pending is cancelled first. Dropping the returned
    /// task cancels it as well.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::OnboardingIncomplete`] if goal, mood or age
    /// range has not been selected.
    pub async fn start_generation(self: &Arc<Self>) -> Result<GenerationTask> {
        let mut inner = self.inner.write().await;
        let request = inner.state.onboarding.generation_request()?;

        if let Some(previous) = inner.pending_generation.take() {
            if !previous.is_cancelled() {
                previous.cancel();
                self.emit(StoreEvent::GenerationCancelled);
            }
        }

        let token = CancellationToken::new();
        inner.pending_generation = Some(token.clone());
        let epoch = inner.onboarding_epoch;

        info!(
            target: LOG_TARGET,
            "Generating sound (goal: {}, mood: {}, age: {}, preferences: {:?})",
            request.goal_id,
            request.mood_id,
            request.age_range_id,
            request.preferences
        );
        self.emit(StoreEvent::GenerationStarted);

        Ok(GenerationTask::spawn(
            Arc::clone(self),
            epoch,
            request,
            token,
            self.generation.delay(),
            self.generation.progress_tick(),
        ))
    }

    /// Drop the current result and generate again
    ///
    /// # Errors
    ///
    /// Same as [`AppStore::start_generation`].
    pub async fn regenerate(self: &Arc<Self>) -> Result<GenerationTask> {
        self.update_onboarding(OnboardingPatch::new().clear_generated_sound())
            .await;
        self.start_generation().await
    }

    pub(crate) async fn report_generation_progress(
        &self,
        epoch: u64,
        token: &CancellationToken,
        elapsed: Duration,
        total: Duration,
    ) {
        let inner = self.inner.read().await;
        if token.is_cancelled() || inner.onboarding_epoch != epoch {
            return;
        }
        self.emit(StoreEvent::GenerationProgress { elapsed, total });
    }

    /// Finish a generation unless it was cancelled or its session was reset
    pub(crate) async fn complete_generation(
        &self,
        epoch: u64,
        token: &CancellationToken,
        request: &GenerationRequest,
    ) -> Option<Sound> {
        let mut inner = self.inner.write().await;
        if token.is_cancelled() || inner.onboarding_epoch != epoch {
            debug!(target: LOG_TARGET, "Discarding stale generation result");
            return None;
        }

        let StoreInner { state, rng, .. } = &mut *inner;
        let sound = generate_random_sound(request, self.clock.as_ref(), rng);
        state.update_onboarding(OnboardingPatch::new().generated_sound(sound.clone()));
        state.play_sound(sound.clone());
        inner.pending_generation = None;

        info!(
            target: LOG_TARGET,
            "Generated \"{}\" ({}s, id {})", sound.title, sound.duration_secs, sound.id
        );
        self.emit(StoreEvent::SoundGenerated {
            sound_id: sound.id.clone(),
        });
        self.emit(StoreEvent::PlaybackStarted {
            sound_id: sound.id.clone(),
        });
        Some(sound)
    }

    // ---- library ----

    /// Prepend `sound` to the library. Ids are not checked for uniqueness.
    pub async fn add_sound(&self, sound: Sound) {
        let mut inner = self.inner.write().await;
        let sound_id = sound.id.clone();
        inner.state.add_sound(sound);
        self.emit(StoreEvent::SoundAdded { sound_id });
    }

    /// Remove a sound from the library and every playlist. Unknown ids are a no-op.
    pub async fn remove_sound(&self, sound_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.state.remove_sound(sound_id) {
            debug!(target: LOG_TARGET, "remove_sound: no sound with id {}", sound_id);
            return false;
        }
        self.emit(StoreEvent::SoundRemoved {
            sound_id: sound_id.to_string(),
        });
        true
    }

    /// Record listening progress on the library copy of a sound
    pub async fn update_sound_progress(&self, sound_id: &str, progress: f32) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.state.update_sound_progress(sound_id, progress) {
            return false;
        }
        let progress = inner
            .state
            .library
            .sound(sound_id)
            .and_then(|s| s.progress)
            .unwrap_or_default();
        self.emit(StoreEvent::SoundProgressUpdated {
            sound_id: sound_id.to_string(),
            progress,
        });
        true
    }

    /// Append an empty playlist and return its id
    pub async fn create_playlist(&self, name: impl Into<String>, description: Option<String>) -> String {
        let mut inner = self.inner.write().await;
        let playlist_id = inner
            .state
            .create_playlist(name, description, self.clock.as_ref());
        self.emit(StoreEvent::PlaylistCreated {
            playlist_id: playlist_id.clone(),
        });
        playlist_id
    }

    /// Append a copy of a library sound to a playlist
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::SoundNotFound`] or
    /// [`crate::CoreError::PlaylistNotFound`]; nothing changes on error.
    pub async fn add_to_playlist(&self, playlist_id: &str, sound_id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.state.add_to_playlist(playlist_id, sound_id)?;
        self.emit(StoreEvent::PlaylistUpdated {
            playlist_id: playlist_id.to_string(),
        });
        Ok(())
    }

    /// Remove a sound from one playlist; the library is untouched
    pub async fn remove_from_playlist(&self, playlist_id: &str, sound_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.state.remove_from_playlist(playlist_id, sound_id) {
            return false;
        }
        self.emit(StoreEvent::PlaylistUpdated {
            playlist_id: playlist_id.to_string(),
        });
        true
    }

    pub async fn delete_playlist(&self, playlist_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.state.delete_playlist(playlist_id) {
            return false;
        }
        self.emit(StoreEvent::PlaylistDeleted {
            playlist_id: playlist_id.to_string(),
        });
        true
    }

    // ---- player ----

    /// Load `sound` and start playing. Position and duration are not reset.
    pub async fn play_sound(&self, sound: Sound) {
        let mut inner = self.inner.write().await;
        let sound_id = sound.id.clone();
        inner.state.play_sound(sound);
        self.emit(StoreEvent::PlaybackStarted { sound_id });
    }

    pub async fn pause_sound(&self) {
        let mut inner = self.inner.write().await;
        inner.state.pause_sound();
        let position = inner.state.player.position;
        self.emit(StoreEvent::PlaybackPaused { position });
    }

    /// Pause if playing; otherwise play `sound`, or resume the loaded sound
    pub async fn toggle_playback(&self, sound: Option<Sound>) {
        let mut inner = self.inner.write().await;
        if inner.state.player.is_playing {
            inner.state.pause_sound();
            let position = inner.state.player.position;
            self.emit(StoreEvent::PlaybackPaused { position });
            return;
        }

        let Some(sound) = sound.or_else(|| inner.state.player.current_sound.clone()) else {
            debug!(target: LOG_TARGET, "toggle_playback: nothing loaded");
            return;
        };
        let sound_id = sound.id.clone();
        inner.state.play_sound(sound);
        self.emit(StoreEvent::PlaybackStarted { sound_id });
    }

    /// Record the driver's position report; the position is clamped to the duration
    pub async fn update_player_progress(&self, position: Duration, duration: Duration) {
        let mut inner = self.inner.write().await;
        inner.state.update_player_progress(position, duration);
        let player = &inner.state.player;
        self.emit(StoreEvent::ProgressUpdated {
            position: player.position,
            duration: player.duration,
        });
    }

    /// Set the playback rate, clamped to the configured bounds
    pub async fn set_player_rate(&self, rate: f32) {
        let mut inner = self.inner.write().await;
        inner.state.set_player_rate(rate, &self.player_limits);
        let rate = inner.state.player.rate;
        self.emit(StoreEvent::RateChanged { rate });
    }

    /// Set the volume, clamped to [0.0, 1.0]
    pub async fn set_player_volume(&self, volume: f32) {
        let mut inner = self.inner.write().await;
        inner.state.set_player_volume(volume);
        let volume = inner.state.player.volume;
        self.emit(StoreEvent::VolumeChanged { volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use crate::explore::FilterField;

    fn store() -> Arc<AppStore> {
        AppStore::new(
            &SoundsmithConfig::default(),
            Arc::new(FixedClock::from_millis(1_700_000_000_000)),
            StdRng::seed_from_u64(11),
        )
    }

    fn sound(id: &str, goal: &str) -> Sound {
        Sound::new(id, "Test", chrono::DateTime::default(), 600, goal, "calm", "adult", "u")
    }

    fn drain(rx: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_initial_state() {
        let store = store();
        let state = store.snapshot().await;
        assert_eq!(state, AppState::new());
    }

    #[tokio::test]
    async fn test_events_follow_invocation_order() {
        let store = store();
        let mut rx = store.subscribe();

        let playlist_id = store.create_playlist("Focus", None).await;
        store.add_sound(sound("x1", "focus")).await;
        store.add_to_playlist(&playlist_id, "x1").await.unwrap();
        store.remove_sound("x1").await;

        assert_eq!(
            drain(&mut rx),
            vec![
                StoreEvent::PlaylistCreated {
                    playlist_id: playlist_id.clone()
                },
                StoreEvent::SoundAdded {
                    sound_id: "x1".into()
                },
                StoreEvent::PlaylistUpdated { playlist_id },
                StoreEvent::SoundRemoved {
                    sound_id: "x1".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_focus_playlist_scenario() {
        let store = store();
        let playlist_id = store.create_playlist("Focus", None).await;
        let x1 = Sound::new("x1", "Test", store.clock().now(), 600, "focus", "energetic", "adult", "u");

        store.add_sound(x1.clone()).await;
        store.add_to_playlist(&playlist_id, "x1").await.unwrap();
        assert_eq!(store.playlist(&playlist_id).await.unwrap().sounds, vec![x1]);

        assert!(store.remove_sound("x1").await);
        assert!(store.sounds().await.is_empty());
        assert!(store.playlist(&playlist_id).await.unwrap().sounds.is_empty());
    }

    #[tokio::test]
    async fn test_noops_emit_nothing() {
        let store = store();
        let mut rx = store.subscribe();

        assert!(!store.remove_sound("missing").await);
        assert!(!store.delete_playlist("missing").await);
        assert!(!store.remove_from_playlist("missing", "missing").await);
        assert!(!store.update_sound_progress("missing", 0.5).await);
        let result = store.add_to_playlist("missing", "missing").await;

        assert!(matches!(result, Err(CoreError::SoundNotFound { .. })));
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_playlist_copy_independence() {
        let store = store();
        store.add_sound(sound("s", "sleep")).await;
        let playlist_id = store.create_playlist("Night", Some("Wind down".into())).await;
        store.add_to_playlist(&playlist_id, "s").await.unwrap();

        assert!(store.update_sound_progress("s", 0.6).await);

        assert_eq!(store.sound("s").await.unwrap().progress, Some(0.6));
        assert!(store.playlist(&playlist_id).await.unwrap().sounds[0]
            .progress
            .is_none());
        assert_eq!(store.in_progress_sounds().await.len(), 1);
    }

    #[tokio::test]
    async fn test_explore_reads_live_library() {
        let store = store();
        store.add_sound(sound("a", "sleep")).await;
        store.add_sound(sound("b", "focus")).await;

        let mut filters = ExploreFilters::new();
        filters.toggle(FilterField::Goal, "sleep");
        let ids: Vec<_> = store.explore(&filters).await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a"]);

        filters.toggle(FilterField::Goal, "sleep");
        assert_eq!(store.explore(&filters).await.len(), 2);
    }

    #[tokio::test]
    async fn test_onboarding_navigation_clamped() {
        let store = store();
        assert_eq!(store.retreat_onboarding().await, 0);
        for _ in 0..10 {
            store.advance_onboarding().await;
        }
        assert_eq!(store.onboarding().await.step, 4);

        store.set_onboarding_step(2).await;
        assert_eq!(store.retreat_onboarding().await, 1);
    }

    #[tokio::test]
    async fn test_onboarding_preferences() {
        let store = store();
        store.toggle_onboarding_preference("rain").await;
        store.toggle_onboarding_preference("piano").await;
        store.toggle_onboarding_preference("rain").await;
        assert_eq!(store.onboarding().await.selected_preferences, vec!["piano"]);

        store
            .apply_onboarding_preset(catalog::preset("nature-calm").unwrap())
            .await;
        assert_eq!(
            store.onboarding().await.selected_preferences,
            vec!["forest", "birds", "wind"]
        );
    }

    #[tokio::test]
    async fn test_reset_onboarding() {
        let store = store();
        store
            .update_onboarding(
                OnboardingPatch::new()
                    .step(3)
                    .goal(*catalog::goal("calm").unwrap())
                    .preferences(["wind"])
                    .for_someone_else(true),
            )
            .await;

        store.reset_onboarding().await;

        assert_eq!(store.onboarding().await, OnboardingState::default());
    }

    #[tokio::test]
    async fn test_commit_generated_sound() {
        let store = store();
        assert!(store.commit_generated_sound().await.is_none());

        store
            .update_onboarding(OnboardingPatch::new().generated_sound(sound("g", "sleep")))
            .await;
        let sound = store.commit_generated_sound().await.unwrap();

        assert_eq!(sound.id, "g");
        assert_eq!(store.sounds().await[0].id, "g");
    }

    #[tokio::test]
    async fn test_player_session() {
        let store = store();
        let mut rx = store.subscribe();

        store.play_sound(sound("a", "sleep")).await;
        store.play_sound(sound("b", "sleep")).await;
        let player = store.player().await;
        assert!(player.is_current("b"));
        assert!(player.is_playing);

        store.pause_sound().await;
        let player = store.player().await;
        assert!(player.is_current("b"));
        assert!(!player.is_playing);

        assert_eq!(
            drain(&mut rx),
            vec![
                StoreEvent::PlaybackStarted { sound_id: "a".into() },
                StoreEvent::PlaybackStarted { sound_id: "b".into() },
                StoreEvent::PlaybackPaused { position: Duration::ZERO },
            ]
        );
    }

    #[tokio::test]
    async fn test_toggle_playback() {
        let store = store();
        store.toggle_playback(None).await;
        assert!(!store.player().await.is_playing);

        store.toggle_playback(Some(sound("a", "sleep"))).await;
        assert!(store.player().await.is_playing);

        store.toggle_playback(None).await;
        assert!(!store.player().await.is_playing);

        store.toggle_playback(None).await;
        let player = store.player().await;
        assert!(player.is_playing);
        assert!(player.is_current("a"));
    }

    #[tokio::test]
    async fn test_player_values_clamped() {
        let store = store();
        let mut rx = store.subscribe();

        store.set_player_volume(1.4).await;
        store.set_player_rate(0.1).await;
        store
            .update_player_progress(Duration::from_secs(900), Duration::from_secs(600))
            .await;

        let player = store.player().await;
        assert!((player.volume - 1.0).abs() < f32::EPSILON);
        assert!((player.rate - 0.5).abs() < f32::EPSILON);
        assert_eq!(player.position, Duration::from_secs(600));

        assert_eq!(
            drain(&mut rx),
            vec![
                StoreEvent::VolumeChanged { volume: 1.0 },
                StoreEvent::RateChanged { rate: 0.5 },
                StoreEvent::ProgressUpdated {
                    position: Duration::from_secs(600),
                    duration: Duration::from_secs(600)
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_rate_with_unvalidated_config() {
        let mut config = SoundsmithConfig::default();
        config.player.min_rate = 2.0;
        config.player.max_rate = 1.0;
        let store = AppStore::new(
            &config,
            Arc::new(FixedClock::from_millis(0)),
            StdRng::seed_from_u64(11),
        );

        store.set_player_rate(1.5).await;
        assert!((store.player().await.rate - 1.5).abs() < f32::EPSILON);

        store.set_player_rate(5.0).await;
        assert!((store.player().await.rate - 2.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_user_patch_emits_nothing() {
        let store = store();
        let mut rx = store.subscribe();

        store.update_user(UserPatch::new()).await;
        store.update_user(UserPatch::new().reminder_time("21:30")).await;

        assert_eq!(drain(&mut rx), vec![StoreEvent::UserUpdated]);
        assert_eq!(store.user().await.reminder_time.as_deref(), Some("21:30"));
    }

    #[tokio::test]
    async fn test_user_merge() {
        let store = store();
        store.update_user(UserPatch::new().name("Ada")).await;
        store.update_user(UserPatch::new().premium(true)).await;

        let user = store.user().await;
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert!(user.is_premium);
    }
}
