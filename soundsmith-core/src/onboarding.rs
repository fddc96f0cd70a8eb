//! The onboarding wizard session: goal, mood, age range, preferences, then
//! generation of a first sound.

use crate::catalog::{AgeRange, Mood, SoundGoal, SoundPreset};
use crate::error::{CoreError, Result};
use crate::generator::GenerationRequest;
use crate::sound::Sound;
use serde::Serialize;

/// Wizard pages in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Goal,
    Mood,
    AgeRange,
    Preferences,
    Generate,
}

impl OnboardingStep {
    /// Index of the final page
    pub const LAST: u8 = 4;

    /// Number of pages in the wizard
    pub const COUNT: u8 = Self::LAST + 1;

    /// Page for a step index; out-of-range indices map to the nearest page
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Goal,
            1 => Self::Mood,
            2 => Self::AgeRange,
            3 => Self::Preferences,
            _ => Self::Generate,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Goal => 0,
            Self::Mood => 1,
            Self::AgeRange => 2,
            Self::Preferences => 3,
            Self::Generate => 4,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Goal => "Select Your Goal",
            Self::Mood => "How Are You Feeling?",
            Self::AgeRange => "Age Range",
            Self::Preferences => "Sound Preferences",
            Self::Generate => "Generating Your Sound",
        }
    }

    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Goal => "What would you like to achieve with your sound experience?",
            Self::Mood => "Select your current mood to personalize your sound.",
            Self::AgeRange => "Help us tailor the experience to your age group.",
            Self::Preferences => "Choose the elements you would like to include in your sound.",
            Self::Generate => "",
        }
    }
}

/// Clamp an arbitrary step request onto the wizard's page range
#[must_use]
pub fn clamp_step(step: i32) -> u8 {
    u8::try_from(step.clamp(0, i32::from(OnboardingStep::LAST))).unwrap_or(OnboardingStep::LAST)
}

/// Transient wizard state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OnboardingState {
    /// Current page index, always within `0..=OnboardingStep::LAST`
    pub step: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_goal: Option<SoundGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_age_range: Option<AgeRange>,
    /// Preference ids in selection order, without duplicates
    pub selected_preferences: Vec<String>,
    pub for_someone_else: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_sound: Option<Sound>,
}

/// Partial update for [`OnboardingState`].
///
/// Optional fields use `Option<Option<T>>`: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingPatch {
    pub step: Option<i32>,
    pub selected_goal: Option<Option<SoundGoal>>,
    pub selected_mood: Option<Option<Mood>>,
    pub selected_age_range: Option<Option<AgeRange>>,
    pub selected_preferences: Option<Vec<String>>,
    pub for_someone_else: Option<bool>,
    pub generated_sound: Option<Option<Sound>>,
}

impl OnboardingPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub const fn goal(mut self, goal: SoundGoal) -> Self {
        self.selected_goal = Some(Some(goal));
        self
    }

    #[must_use]
    pub const fn clear_goal(mut self) -> Self {
        self.selected_goal = Some(None);
        self
    }

    #[must_use]
    pub const fn mood(mut self, mood: Mood) -> Self {
        self.selected_mood = Some(Some(mood));
        self
    }

    #[must_use]
    pub const fn clear_mood(mut self) -> Self {
        self.selected_mood = Some(None);
        self
    }

    #[must_use]
    pub const fn age_range(mut self, age_range: AgeRange) -> Self {
        self.selected_age_range = Some(Some(age_range));
        self
    }

    #[must_use]
    pub const fn clear_age_range(mut self) -> Self {
        self.selected_age_range = Some(None);
        self
    }

    #[must_use]
    pub fn preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_preferences = Some(preferences.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn for_someone_else(mut self, value: bool) -> Self {
        self.for_someone_else = Some(value);
        self
    }

    #[must_use]
    pub fn generated_sound(mut self, sound: Sound) -> Self {
        self.generated_sound = Some(Some(sound));
        self
    }

    #[must_use]
    pub fn clear_generated_sound(mut self) -> Self {
        self.generated_sound = Some(None);
        self
    }
}

impl OnboardingState {
    /// Shallow-merge `patch` into the session
    pub fn apply(&mut self, patch: OnboardingPatch) {
        if let Some(step) = patch.step {
            self.set_step(step);
        }
        if let Some(goal) = patch.selected_goal {
            self.selected_goal = goal;
        }
        if let Some(mood) = patch.selected_mood {
            self.selected_mood = mood;
        }
        if let Some(age_range) = patch.selected_age_range {
            self.selected_age_range = age_range;
        }
        if let Some(preferences) = patch.selected_preferences {
            self.selected_preferences = dedup_preserving_order(preferences);
        }
        if let Some(value) = patch.for_someone_else {
            self.for_someone_else = value;
        }
        if let Some(sound) = patch.generated_sound {
            self.generated_sound = sound;
        }
    }

    /// Move to `step`, clamped onto the wizard's page range
    pub fn set_step(&mut self, step: i32) {
        self.step = clamp_step(step);
    }

    #[must_use]
    pub const fn current_step(&self) -> OnboardingStep {
        OnboardingStep::from_index(self.step)
    }

    /// Whether the current page has what it needs to move on
    #[must_use]
    pub const fn can_proceed(&self) -> bool {
        match self.current_step() {
            OnboardingStep::Goal => self.selected_goal.is_some(),
            OnboardingStep::Mood => self.selected_mood.is_some(),
            OnboardingStep::AgeRange => self.selected_age_range.is_some(),
            OnboardingStep::Preferences => true,
            OnboardingStep::Generate => self.generated_sound.is_some(),
        }
    }

    #[must_use]
    pub fn is_preference_selected(&self, id: &str) -> bool {
        self.selected_preferences.iter().any(|p| p == id)
    }

    /// Preference list with `id` added, or removed if it was already selected
    #[must_use]
    pub fn toggled_preferences(&self, id: &str) -> Vec<String> {
        let mut preferences = self.selected_preferences.clone();
        if let Some(index) = preferences.iter().position(|p| p == id) {
            preferences.remove(index);
        } else {
            preferences.push(id.to_string());
        }
        preferences
    }

    /// Preference list replaced wholesale by a preset's elements
    #[must_use]
    pub fn preset_preferences(preset: &SoundPreset) -> Vec<String> {
        preset.preferences.iter().map(|p| (*p).to_string()).collect()
    }

    /// Build a generation request from the current selections
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OnboardingIncomplete`] naming the first missing selection.
    pub fn generation_request(&self) -> Result<GenerationRequest> {
        let goal = self
            .selected_goal
            .ok_or(CoreError::OnboardingIncomplete { missing: "goal" })?;
        let mood = self
            .selected_mood
            .ok_or(CoreError::OnboardingIncomplete { missing: "mood" })?;
        let age_range = self
            .selected_age_range
            .ok_or(CoreError::OnboardingIncomplete { missing: "age range" })?;

        Ok(GenerationRequest::new(goal.id, mood.id, age_range.id)
            .with_preferences(self.selected_preferences.iter().cloned()))
    }
}

fn dedup_preserving_order(preferences: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(preferences.len());
    for preference in preferences {
        if !unique.contains(&preference) {
            unique.push(preference);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn goal(id: &str) -> SoundGoal {
        *catalog::goal(id).unwrap()
    }

    #[test]
    fn test_default_state() {
        let state = OnboardingState::default();
        assert_eq!(state.step, 0);
        assert!(state.selected_preferences.is_empty());
        assert!(!state.for_someone_else);
        assert!(state.selected_goal.is_none());
        assert!(state.generated_sound.is_none());
        assert_eq!(state.current_step(), OnboardingStep::Goal);
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut state = OnboardingState::default();
        state.apply(OnboardingPatch::new().goal(goal("sleep")));
        state.apply(OnboardingPatch::new().for_someone_else(true));

        assert_eq!(state.selected_goal.map(|g| g.id), Some("sleep"));
        assert!(state.for_someone_else);
        assert!(state.selected_mood.is_none());
    }

    #[test]
    fn test_apply_clears_optional_field() {
        let mut state = OnboardingState::default();
        state.apply(OnboardingPatch::new().goal(goal("sleep")));
        state.apply(OnboardingPatch::new().clear_goal());
        assert!(state.selected_goal.is_none());
    }

    #[test]
    fn test_apply_dedups_preferences() {
        let mut state = OnboardingState::default();
        state.apply(OnboardingPatch::new().preferences(["rain", "piano", "rain"]));
        assert_eq!(state.selected_preferences, vec!["rain", "piano"]);
    }

    #[test]
    fn test_step_clamped() {
        let mut state = OnboardingState::default();
        state.set_step(9);
        assert_eq!(state.step, OnboardingStep::LAST);
        state.set_step(-1);
        assert_eq!(state.step, 0);
        state.apply(OnboardingPatch::new().step(2));
        assert_eq!(state.current_step(), OnboardingStep::AgeRange);
    }

    #[test]
    fn test_step_round_trip() {
        for index in 0..OnboardingStep::COUNT {
            assert_eq!(OnboardingStep::from_index(index).index(), index);
        }
        assert_eq!(OnboardingStep::Mood.title(), "How Are You Feeling?");
        assert!(OnboardingStep::Generate.subtitle().is_empty());
    }

    #[test]
    fn test_can_proceed_per_step() {
        let mut state = OnboardingState::default();
        assert!(!state.can_proceed());
        state.apply(OnboardingPatch::new().goal(goal("focus")));
        assert!(state.can_proceed());

        state.set_step(1);
        assert!(!state.can_proceed());

        state.set_step(3);
        assert!(state.can_proceed());

        state.set_step(4);
        assert!(!state.can_proceed());
    }

    #[test]
    fn test_toggled_preferences() {
        let mut state = OnboardingState::default();
        state.apply(OnboardingPatch::new().preferences(state.toggled_preferences("rain")));
        state.apply(OnboardingPatch::new().preferences(state.toggled_preferences("piano")));
        assert_eq!(state.selected_preferences, vec!["rain", "piano"]);
        assert!(state.is_preference_selected("rain"));

        state.apply(OnboardingPatch::new().preferences(state.toggled_preferences("rain")));
        assert_eq!(state.selected_preferences, vec!["piano"]);
    }

    #[test]
    fn test_preset_preferences() {
        let preset = catalog::preset("focus-flow").unwrap();
        assert_eq!(
            OnboardingState::preset_preferences(preset),
            vec!["white-noise", "piano", "wind"]
        );
    }

    #[test]
    fn test_generation_request_requires_selections() {
        let mut state = OnboardingState::default();
        assert!(matches!(
            state.generation_request(),
            Err(CoreError::OnboardingIncomplete { missing: "goal" })
        ));

        state.apply(
            OnboardingPatch::new()
                .goal(goal("sleep"))
                .mood(*catalog::mood("calm").unwrap()),
        );
        assert!(matches!(
            state.generation_request(),
            Err(CoreError::OnboardingIncomplete { missing: "age range" })
        ));

        state.apply(
            OnboardingPatch::new()
                .age_range(*catalog::age_range("adult").unwrap())
                .preferences(["rain"]),
        );
        let request = state.generation_request().unwrap();
        assert_eq!(request.goal_id, "sleep");
        assert_eq!(request.mood_id, "calm");
        assert_eq!(request.age_range_id, "adult");
        assert_eq!(request.preferences, vec!["rain"]);
    }
}
