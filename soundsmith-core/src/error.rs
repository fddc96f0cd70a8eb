use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - edit it if needed and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Library errors
    #[error("Sound not found in library: {id}")]
    SoundNotFound { id: String },

    #[error("Playlist not found: {id}")]
    PlaylistNotFound { id: String },

    // Onboarding errors
    #[error("Cannot generate a sound yet: no {missing} selected")]
    OnboardingIncomplete { missing: &'static str },

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
