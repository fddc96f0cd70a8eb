pub mod catalog;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod explore;
pub mod generation;
pub mod generator;
pub mod library;
pub mod onboarding;
pub mod paths;
pub mod player;
pub mod seed;
pub mod sound;
pub mod state;
pub mod store;
pub mod time;
pub mod user;

pub use catalog::{AgeRange, Mood, SoundGoal, SoundPreference, SoundPreset};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    GenerationConfig, LibraryConfig, LoggingConfig, PlayerConfig, SoundsmithConfig,
};
pub use driver::PlaybackDriver;
pub use error::{CoreError, Result};
pub use explore::{results_label, ExploreFilters, FilterField};
pub use generation::GenerationTask;
pub use generator::{generate_random_sound, GenerationRequest};
pub use library::Library;
pub use onboarding::{OnboardingPatch, OnboardingState, OnboardingStep};
pub use paths::{config_dir, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
pub use player::PlayerState;
pub use seed::{seed_sample_playlists, seed_sample_sounds};
pub use sound::{Playlist, Sound};
pub use state::AppState;
pub use store::{AppStore, StoreEvent};
pub use time::{format_clock, format_minutes, DurationExt};
pub use user::{User, UserPatch};
