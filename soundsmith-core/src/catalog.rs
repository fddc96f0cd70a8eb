//! Static reference data: goals, moods, age ranges, preferences and presets.
//!
//! The store keeps only ids from these tables on sounds and never checks
//! that they resolve; lookups here return `None` for unknown ids.

use serde::Serialize;

/// What the listener wants to achieve with a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundGoal {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mood {
    pub id: &'static str,
    pub name: &'static str,
    /// Position on the mood slider
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    pub id: &'static str,
    pub name: &'static str,
    /// Human-readable span, e.g. `20-40`
    pub range: &'static str,
}

/// A sound element the listener can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundPreference {
    pub id: &'static str,
    pub name: &'static str,
}

/// A named bundle of preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub preferences: &'static [&'static str],
}

pub const SOUND_GOALS: &[SoundGoal] = &[
    SoundGoal { id: "sleep", name: "Sleep", emoji: "😴" },
    SoundGoal { id: "focus", name: "Focus", emoji: "🧠" },
    SoundGoal { id: "meditation", name: "Meditation", emoji: "🧘" },
    SoundGoal { id: "calm", name: "Calm", emoji: "😌" },
    SoundGoal { id: "stress-relief", name: "Stress Relief", emoji: "🌿" },
];

pub const MOODS: &[Mood] = &[
    Mood { id: "calm", name: "Calm", value: 0 },
    Mood { id: "energetic", name: "Energetic", value: 1 },
    Mood { id: "reflective", name: "Reflective", value: 2 },
    Mood { id: "sleepy", name: "Sleepy", value: 3 },
];

pub const AGE_RANGES: &[AgeRange] = &[
    AgeRange { id: "teen", name: "Teen", range: "13-19" },
    AgeRange { id: "adult", name: "Adult", range: "20-40" },
    AgeRange { id: "elder", name: "Elder", range: "40+" },
];

pub const SOUND_PREFERENCES: &[SoundPreference] = &[
    SoundPreference { id: "nature", name: "Nature" },
    SoundPreference { id: "rain", name: "Rain" },
    SoundPreference { id: "ocean", name: "Ocean" },
    SoundPreference { id: "white-noise", name: "White Noise" },
    SoundPreference { id: "piano", name: "Piano" },
    SoundPreference { id: "wind", name: "Wind" },
    SoundPreference { id: "chimes", name: "Chimes" },
    SoundPreference { id: "forest", name: "Forest" },
    SoundPreference { id: "birds", name: "Birds" },
    SoundPreference { id: "thunder", name: "Thunder" },
];

pub const SOUND_PRESETS: &[SoundPreset] = &[
    SoundPreset {
        id: "deep-sleep",
        name: "Deep Sleep",
        preferences: &["ocean", "white-noise", "rain"],
    },
    SoundPreset {
        id: "teen-zen",
        name: "Teen Zen",
        preferences: &["piano", "nature", "birds"],
    },
    SoundPreset {
        id: "focus-flow",
        name: "Focus Flow",
        preferences: &["white-noise", "piano", "wind"],
    },
    SoundPreset {
        id: "nature-calm",
        name: "Nature Calm",
        preferences: &["forest", "birds", "wind"],
    },
];

/// Preference used when a generation request names none
pub const DEFAULT_PREFERENCE: &str = "nature";

/// Titles a generated sound can receive
pub const GENERATED_TITLES: &[&str] = &[
    "Tranquil Waters",
    "Forest Echo",
    "Midnight Rain",
    "Dawn Chorus",
    "Evening Breeze",
    "Urban Calm",
    "Distant Thunder",
    "Mountain Stream",
    "Ocean Waves",
    "Night Garden",
];

/// Lengths a generated sound can have: 10, 15, 20, 30, 45 and 60 minutes
pub const GENERATED_DURATIONS_SECS: &[u32] = &[600, 900, 1200, 1800, 2700, 3600];

/// Placeholder playback locators; nothing is fetched from them
pub const MOCK_AUDIO_URIS: &[&str] = &[
    "https://example.com/audio/calm-ocean.mp3",
    "https://example.com/audio/gentle-rain.mp3",
    "https://example.com/audio/forest-ambience.mp3",
    "https://example.com/audio/meditation-bells.mp3",
    "https://example.com/audio/white-noise.mp3",
];

#[must_use]
pub fn goal(id: &str) -> Option<&'static SoundGoal> {
    SOUND_GOALS.iter().find(|g| g.id == id)
}

#[must_use]
pub fn mood(id: &str) -> Option<&'static Mood> {
    MOODS.iter().find(|m| m.id == id)
}

#[must_use]
pub fn age_range(id: &str) -> Option<&'static AgeRange> {
    AGE_RANGES.iter().find(|a| a.id == id)
}

#[must_use]
pub fn preference(id: &str) -> Option<&'static SoundPreference> {
    SOUND_PREFERENCES.iter().find(|p| p.id == id)
}

#[must_use]
pub fn preset(id: &str) -> Option<&'static SoundPreset> {
    SOUND_PRESETS.iter().find(|p| p.id == id)
}
