//! Explore view filtering over the library.

use crate::sound::Sound;

/// Which sound attribute a filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Goal,
    Mood,
    AgeRange,
}

/// Active Explore filters. An unset field matches every sound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreFilters {
    pub goal: Option<String>,
    pub mood: Option<String>,
    pub age_range: Option<String>,
}

impl ExploreFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Select `value` for `field`, or clear the field if `value` is already selected
    pub fn toggle(&mut self, field: FilterField, value: &str) {
        let slot = self.slot_mut(field);
        if slot.as_deref() == Some(value) {
            *slot = None;
        } else {
            *slot = Some(value.to_string());
        }
    }

    /// Drop every active filter
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.goal.is_none() && self.mood.is_none() && self.age_range.is_none()
    }

    /// Whether `sound` passes every active filter
    #[must_use]
    pub fn matches(&self, sound: &Sound) -> bool {
        field_matches(self.goal.as_deref(), &sound.goal_id)
            && field_matches(self.mood.as_deref(), &sound.mood_id)
            && field_matches(self.age_range.as_deref(), &sound.age_range_id)
    }

    /// The subsequence of `sounds` passing every active filter, order kept
    #[must_use]
    pub fn apply<'a>(&self, sounds: &'a [Sound]) -> Vec<&'a Sound> {
        sounds.iter().filter(|s| self.matches(s)).collect()
    }

    const fn slot(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::Goal => &self.goal,
            FilterField::Mood => &self.mood,
            FilterField::AgeRange => &self.age_range,
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Goal => &mut self.goal,
            FilterField::Mood => &mut self.mood,
            FilterField::AgeRange => &mut self.age_range,
        }
    }
}

fn field_matches(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |f| f == value)
}

/// Heading for the Explore results list, e.g. `2 Sounds`
#[must_use]
pub fn results_label(count: usize) -> String {
    match count {
        0 => "No Sounds Found".to_string(),
        1 => "1 Sound".to_string(),
        n => format!("{n} Sounds"),
    }
}
