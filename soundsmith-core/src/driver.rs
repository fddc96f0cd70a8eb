//! Simulated playback clock.
//!
//! There is no audio output; the driver stands in for one by advancing the
//! player position on every tick while a sound is playing and reporting it
//! back to the store.

use crate::config::PlayerConfig;
use crate::store::AppStore;
use crate::time::DurationExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const LOG_TARGET: &str = "soundsmith::driver";

/// Advances playback position in the background
pub struct PlaybackDriver {
    store: Arc<AppStore>,
    tick: Duration,
    /// Id of the sound the last tick advanced
    driven: Mutex<Option<String>>,
    cancel_token: CancellationToken,
}

impl PlaybackDriver {
    #[must_use]
    pub fn new(store: Arc<AppStore>, config: &PlayerConfig) -> Self {
        Self {
            store,
            tick: config.tick(),
            driven: Mutex::new(None),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// Start driving playback in a background task
    #[must_use]
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        info!(target: LOG_TARGET, "Starting playback driver ({:?} tick)", self.tick);

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Playback driver shutting down");
                    break;
                }
                () = tokio::time::sleep(self.tick) => {
                    self.tick_once().await;
                }
            }
        }
    }

    /// Advance the loaded sound by one tick scaled by the playback rate.
    /// Pauses once the end is reached.
    ///
    /// The loaded sound's own length is the duration. A reported position is
    /// resumed only if it belongs to the sound driven last and has not
    /// reached the end; otherwise the sound starts from zero.
    pub async fn tick_once(&self) {
        let player = self.store.player().await;
        if !player.is_playing {
            return;
        }
        let Some(sound) = player.current_sound.as_ref() else {
            return;
        };

        let duration = sound.duration();
        let mut driven = self.driven.lock().await;
        let resume = player.duration == duration
            && player.position < duration
            && driven.as_deref().map_or(true, |id| id == sound.id);
        if driven.as_deref() != Some(sound.id.as_str()) {
            debug!(target: LOG_TARGET, "Driving {}", sound.id);
            *driven = Some(sound.id.clone());
        }
        drop(driven);

        let start = if resume { player.position } else { Duration::ZERO };
        let step = Duration::try_from_secs_f32(self.tick.as_secs_f32() * player.rate.max(0.0))
            .unwrap_or(Duration::MAX);
        let position = start.saturating_add(step).min(duration);

        self.store.update_player_progress(position, duration).await;
        self.store
            .update_sound_progress(&sound.id, position.fraction_of(duration))
            .await;

        if position >= duration {
            debug!(target: LOG_TARGET, "Reached end of {}", sound.id);
            self.store.pause_sound().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::SoundsmithConfig;
    use crate::sound::Sound;
    use chrono::DateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Arc<AppStore>, PlaybackDriver) {
        let config = SoundsmithConfig::default();
        let store = AppStore::new(
            &config,
            Arc::new(FixedClock::from_millis(0)),
            StdRng::seed_from_u64(1),
        );
        let driver = PlaybackDriver::new(Arc::clone(&store), &config.player);
        (store, driver)
    }

    fn sound(id: &str, duration_secs: u32) -> Sound {
        Sound::new(id, "Test", DateTime::default(), duration_secs, "sleep", "calm", "adult", "u")
    }

    #[tokio::test]
    async fn test_tick_advances_position() {
        let (store, driver) = setup();
        store.add_sound(sound("s", 10)).await;
        store.play_sound(sound("s", 10)).await;

        driver.tick_once().await;

        let player = store.player().await;
        assert_eq!(player.position, Duration::from_secs(1));
        assert_eq!(player.duration, Duration::from_secs(10));
        let progress = store.sound("s").await.unwrap().progress.unwrap();
        assert!((progress - 0.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_tick_scales_with_rate() {
        let (store, driver) = setup();
        store.play_sound(sound("s", 10)).await;
        store.set_player_rate(2.0).await;

        driver.tick_once().await;

        assert_eq!(store.player().await.position, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_tick_ignored_while_paused() {
        let (store, driver) = setup();
        store.play_sound(sound("s", 10)).await;
        store.pause_sound().await;

        driver.tick_once().await;

        assert_eq!(store.player().await.position, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_pauses_at_end() {
        let (store, driver) = setup();
        store.play_sound(sound("s", 2)).await;

        for _ in 0..5 {
            driver.tick_once().await;
        }

        let player = store.player().await;
        assert!(!player.is_playing);
        assert_eq!(player.position, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_switching_sound_restarts_from_zero() {
        let (store, driver) = setup();
        store.add_sound(sound("b", 600)).await;
        store.play_sound(sound("a", 2)).await;
        for _ in 0..3 {
            driver.tick_once().await;
        }
        assert!(!store.player().await.is_playing);

        store.play_sound(sound("b", 600)).await;
        driver.tick_once().await;

        let player = store.player().await;
        assert!(player.is_playing);
        assert_eq!(player.position, Duration::from_secs(1));
        assert_eq!(player.duration, Duration::from_secs(600));
        let progress = store.sound("b").await.unwrap().progress.unwrap();
        assert!((progress - 1.0 / 600.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_switching_mid_sound_restarts_from_zero() {
        let (store, driver) = setup();
        store.play_sound(sound("a", 600)).await;
        for _ in 0..5 {
            driver.tick_once().await;
        }

        store.play_sound(sound("b", 600)).await;
        driver.tick_once().await;

        let player = store.player().await;
        assert!(player.is_current("b"));
        assert_eq!(player.position, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_replay_after_end_restarts() {
        let (store, driver) = setup();
        store.play_sound(sound("a", 2)).await;
        for _ in 0..3 {
            driver.tick_once().await;
        }

        store.play_sound(sound("a", 2)).await;
        driver.tick_once().await;

        let player = store.player().await;
        assert!(player.is_playing);
        assert_eq!(player.position, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_resume_after_pause_keeps_position() {
        let (store, driver) = setup();
        store.play_sound(sound("a", 600)).await;
        driver.tick_once().await;
        driver.tick_once().await;
        store.pause_sound().await;

        store.toggle_playback(None).await;
        driver.tick_once().await;

        assert_eq!(store.player().await.position, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_until_stopped() {
        let (store, driver) = setup();
        store.play_sound(sound("s", 600)).await;

        let driver = Arc::new(driver);
        let handle = Arc::clone(&driver).start();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        driver.stop();
        handle.await.unwrap();

        assert_eq!(store.player().await.position, Duration::from_secs(3));
    }
}
