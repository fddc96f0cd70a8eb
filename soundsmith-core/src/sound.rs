use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A generated, playable sound and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    /// Opaque id, unique within the library by caller convention
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Length in whole seconds
    pub duration_secs: u32,
    /// Catalog goal id (not validated)
    pub goal_id: String,
    /// Catalog mood id (not validated)
    pub mood_id: String,
    /// Catalog age range id (not validated)
    pub age_range_id: String,
    /// Ordered preference ids the sound was generated from
    pub preferences: Vec<String>,
    /// Playback source locator
    pub uri: String,
    /// Listening progress in [0.0, 1.0]; `None` means not started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
}

impl Sound {
    /// Create a new sound with no preferences and no progress
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        duration_secs: u32,
        goal_id: impl Into<String>,
        mood_id: impl Into<String>,
        age_range_id: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at,
            duration_secs,
            goal_id: goal_id.into(),
            mood_id: mood_id.into(),
            age_range_id: age_range_id.into(),
            preferences: Vec::new(),
            uri: uri.into(),
            progress: None,
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

    /// Set listening progress, clamped to [0.0, 1.0]
    #[must_use]
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.set_progress(progress);
        self
    }

    /// Set listening progress, clamped to [0.0, 1.0]. Non-finite values are ignored.
    pub fn set_progress(&mut self, progress: f32) {
        if progress.is_finite() {
            self.progress = Some(progress.clamp(0.0, 1.0));
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    #[must_use]
    pub fn has_preference(&self, id: &str) -> bool {
        self.preferences.iter().any(|p| p == id)
    }
}

/// A named, ordered collection of sound copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value copies taken when each sound was added
    pub sounds: Vec<Sound>,
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            sounds: Vec::new(),
            created_at,
        }
    }

    #[must_use]
    pub fn contains(&self, sound_id: &str) -> bool {
        self.sounds.iter().any(|s| s.id == sound_id)
    }

    /// Combined length of every entry, duplicates included
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.sounds.iter().map(Sound::duration).sum()
    }

    /// Drop every entry with the given id. Returns whether anything was removed.
    pub(crate) fn remove_sound(&mut self, sound_id: &str) -> bool {
        let before = self.sounds.len();
        self.sounds.retain(|s| s.id != sound_id);
        self.sounds.len() != before
    }
}
