use serde::{Deserialize, Serialize};

/// The single user profile of this app instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Daily reminder time as entered, e.g. `21:30`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    pub is_premium: bool,
}

/// Partial update for [`User`]. Unset fields leave the profile untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub reminder_time: Option<String>,
    pub is_premium: Option<bool>,
}

impl UserPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    #[must_use]
    pub fn reminder_time(mut self, reminder_time: impl Into<String>) -> Self {
        self.reminder_time = Some(reminder_time.into());
        self
    }

    #[must_use]
    pub const fn premium(mut self, is_premium: bool) -> Self {
        self.is_premium = Some(is_premium);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl User {
    /// Shallow-merge `patch` into this profile
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(reminder_time) = patch.reminder_time {
            self.reminder_time = Some(reminder_time);
        }
        if let Some(is_premium) = patch.is_premium {
            self.is_premium = is_premium;
        }
    }
}
