//! Mock sound generation.
//!
//! There is no synthesis: a "generated" sound is a catalog-shaped record with
//! a random title, length and placeholder uri. Time and randomness are passed
//! in so the result is reproducible under a fixed clock and seeded rng.

use crate::catalog::{DEFAULT_PREFERENCE, GENERATED_DURATIONS_SECS, GENERATED_TITLES, MOCK_AUDIO_URIS};
use crate::clock::Clock;
use crate::sound::Sound;
use rand::seq::SliceRandom;
use rand::Rng;

/// Inputs for a generated sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub goal_id: String,
    pub mood_id: String,
    pub age_range_id: String,
    pub preferences: Vec<String>,
}

impl GenerationRequest {
    pub fn new(
        goal_id: impl Into<String>,
        mood_id: impl Into<String>,
        age_range_id: impl Into<String>,
    ) -> Self {
        Self {
            goal_id: goal_id.into(),
            mood_id: mood_id.into(),
            age_range_id: age_range_id.into(),
            preferences: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }
}

/// Produce a new sound for `request`.
///
/// The id is the clock's millisecond timestamp. Title, length and uri are
/// drawn uniformly from the fixed pools. An empty preference list becomes
/// `["nature"]`.
pub fn generate_random_sound<R>(request: &GenerationRequest, clock: &dyn Clock, rng: &mut R) -> Sound
where
    R: Rng + ?Sized,
{
    let title = GENERATED_TITLES.choose(rng).copied().unwrap_or("Untitled");
    let duration_secs = GENERATED_DURATIONS_SECS.choose(rng).copied().unwrap_or(600);
    let uri = MOCK_AUDIO_URIS.choose(rng).copied().unwrap_or_default();

    let preferences = if request.preferences.is_empty() {
        vec![DEFAULT_PREFERENCE.to_string()]
    } else {
        request.preferences.clone()
    };

    Sound::new(
        clock.now_millis().to_string(),
        title,
        clock.now(),
        duration_secs,
        request.goal_id.as_str(),
        request.mood_id.as_str(),
        request.age_range_id.as_str(),
        uri,
    )
    .with_preferences(preferences)
}
