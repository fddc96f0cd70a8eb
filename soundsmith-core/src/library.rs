//! Sounds and playlists.
//!
//! Playlists hold value copies of sounds. Removing a sound from the library
//! also removes it from every playlist, but later edits to a library sound
//! (such as its progress) are not reflected in copies already filed.

use crate::error::{CoreError, Result};
use crate::sound::{Playlist, Sound};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Library {
    /// Newest first
    pub sounds: Vec<Sound>,
    /// Creation order
    pub playlists: Vec<Playlist>,
}

impl Library {
    #[must_use]
    pub fn sound(&self, id: &str) -> Option<&Sound> {
        self.sounds.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Prepend `sound`. Ids are not checked for uniqueness.
    pub fn add_sound(&mut self, sound: Sound) {
        self.sounds.insert(0, sound);
    }

    /// Remove every sound with `id` from the library and from all playlists.
    /// Returns whether anything was removed.
    pub fn remove_sound(&mut self, id: &str) -> bool {
        let before = self.sounds.len();
        self.sounds.retain(|s| s.id != id);
        let mut removed = self.sounds.len() != before;

        for playlist in &mut self.playlists {
            removed |= playlist.remove_sound(id);
        }
        removed
    }

    /// Record listening progress on the library copy of a sound.
    /// Playlist copies keep whatever progress they had when filed.
    pub fn update_sound_progress(&mut self, id: &str, progress: f32) -> bool {
        let mut updated = false;
        for sound in self.sounds.iter_mut().filter(|s| s.id == id) {
            sound.set_progress(progress);
            updated = true;
        }
        updated
    }

    /// Append an empty playlist and return its id.
    ///
    /// The id is `now_millis`, bumped past any id already taken so that
    /// rapid calls within one millisecond still get distinct ids.
    pub fn create_playlist(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        now: DateTime<Utc>,
        now_millis: i64,
    ) -> String {
        let mut candidate = now_millis;
        while self.playlist(&candidate.to_string()).is_some() {
            candidate = candidate.saturating_add(1);
        }
        let id = candidate.to_string();

        self.playlists
            .push(Playlist::new(id.clone(), name, description, now));
        id
    }

    /// Append a copy of library sound `sound_id` to playlist `playlist_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PlaylistNotFound`] or [`CoreError::SoundNotFound`]
    /// and leaves the playlist unchanged.
    pub fn add_to_playlist(&mut self, playlist_id: &str, sound_id: &str) -> Result<()> {
        let sound = self
            .sound(sound_id)
            .cloned()
            .ok_or_else(|| CoreError::SoundNotFound {
                id: sound_id.to_string(),
            })?;

        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound {
                id: playlist_id.to_string(),
            })?;

        playlist.sounds.push(sound);
        Ok(())
    }

    /// Remove `sound_id` from one playlist only. Returns whether anything was removed.
    pub fn remove_from_playlist(&mut self, playlist_id: &str, sound_id: &str) -> bool {
        self.playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .is_some_and(|p| p.remove_sound(sound_id))
    }

    /// Returns whether a playlist was removed.
    pub fn delete_playlist(&mut self, playlist_id: &str) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != playlist_id);
        self.playlists.len() != before
    }

    /// Sounds ordered by creation time, newest first
    #[must_use]
    pub fn recent_sounds(&self) -> Vec<&Sound> {
        let mut sounds: Vec<&Sound> = self.sounds.iter().collect();
        sounds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sounds
    }

    /// Sounds the listener has started ("continue listening")
    #[must_use]
    pub fn in_progress_sounds(&self) -> Vec<&Sound> {
        self.sounds.iter().filter(|s| s.progress.is_some()).collect()
    }
}
