//! Demo content for a fresh library.

use crate::catalog::MOCK_AUDIO_URIS;
use crate::clock::Clock;
use crate::sound::Sound;
use crate::store::AppStore;
use chrono::TimeDelta;
use tracing::info;

const LOG_TARGET: &str = "soundsmith::store";

/// The sample sounds shown on a first launch, oldest addition first
#[must_use]
pub fn sample_sounds(clock: &dyn Clock) -> Vec<Sound> {
    let now = clock.now();
    let uri = |i: usize| MOCK_AUDIO_URIS.get(i).copied().unwrap_or_default();

    vec![
        Sound::new("1", "Evening Fog", now - TimeDelta::days(2), 600, "sleep", "calm", "adult", uri(0))
            .with_preferences(["rain", "white-noise"])
            .with_progress(0.3),
        Sound::new("2", "Focus Stream", now - TimeDelta::days(1), 1800, "focus", "energetic", "adult", uri(1))
            .with_preferences(["white-noise", "piano"])
            .with_progress(0.7),
        Sound::new("3", "Morning Clarity", now, 1200, "meditation", "reflective", "adult", uri(2))
            .with_preferences(["chimes", "birds"]),
        Sound::new("4", "Deep Sleep Journey", now, 2700, "sleep", "sleepy", "adult", uri(3))
            .with_preferences(["ocean", "white-noise"]),
    ]
}

/// Name and description of each sample playlist
pub const SAMPLE_PLAYLISTS: &[(&str, &str)] = &[
    ("Bedtime Favorites", "Sounds to help me fall asleep"),
    ("Productive Mornings", "Start the day right"),
];

/// Add the sample sounds to an empty library one by one, so the last listed
/// ends up first. Returns how many were added.
pub async fn seed_sample_sounds(store: &AppStore) -> usize {
    if !store.sounds().await.is_empty() {
        return 0;
    }

    let sounds = sample_sounds(store.clock());
    let count = sounds.len();
    for sound in sounds {
        store.add_sound(sound).await;
    }
    info!(target: LOG_TARGET, "Seeded {} sample sounds", count);
    count
}

/// Create the sample playlists if there are none; returns how many were created
pub async fn seed_sample_playlists(store: &AppStore) -> usize {
    if !store.playlists().await.is_empty() {
        return 0;
    }

    for (name, description) in SAMPLE_PLAYLISTS {
        store
            .create_playlist(*name, Some((*description).to_string()))
            .await;
    }
    info!(target: LOG_TARGET, "Seeded {} sample playlists", SAMPLE_PLAYLISTS.len());
    SAMPLE_PLAYLISTS.len()
}
