//! Scripted walk through the onboarding wizard, library and player.

use anyhow::Context;
use soundsmith_core::{
    catalog, format_clock, format_minutes, results_label, AppStore, ExploreFilters, FilterField,
    OnboardingPatch, OnboardingStep, Sound, UserPatch,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const GOAL: &str = "sleep";
const MOOD: &str = "calm";
const AGE_RANGE: &str = "adult";
const PRESET: &str = "deep-sleep";
const EXTRA_PREFERENCE: &str = "thunder";
const PLAYLIST_NAME: &str = "My Mixes";

fn log_step(step: u8) {
    let step = OnboardingStep::from_index(step);
    info!("[{}/{}] {}: {}", step.index() + 1, OnboardingStep::COUNT, step.title(), step.subtitle());
}

/// Answer every wizard page and wait for the generated sound.
///
/// Returns `None` if shutdown was requested before generation finished.
pub async fn run_onboarding(
    store: &Arc<AppStore>,
    cancel_token: &CancellationToken,
) -> anyhow::Result<Option<Sound>> {
    store.reset_onboarding().await;
    store.update_user(UserPatch::new().name("Listener")).await;

    let goal = catalog::goal(GOAL).context("Unknown goal")?;
    let mood = catalog::mood(MOOD).context("Unknown mood")?;
    let age_range = catalog::age_range(AGE_RANGE).context("Unknown age range")?;
    let preset = catalog::preset(PRESET).context("Unknown preset")?;

    log_step(store.onboarding().await.step);
    info!("Goal: {} {}", goal.emoji, goal.name);
    store.update_onboarding(OnboardingPatch::new().goal(*goal)).await;

    log_step(store.advance_onboarding().await);
    info!("Mood: {}", mood.name);
    store.update_onboarding(OnboardingPatch::new().mood(*mood)).await;

    log_step(store.advance_onboarding().await);
    info!("Age range: {} ({})", age_range.name, age_range.range);
    store
        .update_onboarding(OnboardingPatch::new().age_range(*age_range))
        .await;

    log_step(store.advance_onboarding().await);
    store.apply_onboarding_preset(preset).await;
    store.toggle_onboarding_preference(EXTRA_PREFERENCE).await;
    info!(
        "Preferences: {:?} (preset {})",
        store.onboarding().await.selected_preferences,
        preset.name
    );

    log_step(store.advance_onboarding().await);
    let task = store.start_generation().await?;

    let sound = tokio::select! {
        () = cancel_token.cancelled() => None,
        sound = task.wait() => sound,
    };

    let Some(sound) = sound else {
        store.reset_onboarding().await;
        return Ok(None);
    };

    info!(
        "Generated \"{}\" ({}, preferences {:?})",
        sound.title,
        format_minutes(sound.duration_secs),
        sound.preferences
    );

    let committed = store.commit_generated_sound().await;
    store.reset_onboarding().await;
    Ok(committed)
}

/// File the new sound into a playlist and show where it surfaces
pub async fn file_into_library(store: &AppStore, sound: &Sound) -> anyhow::Result<()> {
    let playlist_id = store.create_playlist(PLAYLIST_NAME, None).await;
    store.add_to_playlist(&playlist_id, &sound.id).await?;

    let mut filters = ExploreFilters::new();
    filters.toggle(FilterField::Goal, &sound.goal_id);
    let matches = store.explore(&filters).await;
    info!("Explore ({}): {}", sound.goal_id, results_label(matches.len()));

    for recent in store.recent_sounds().await.iter().take(3) {
        info!("Recent: {} ({})", recent.title, format_minutes(recent.duration_secs));
    }
    for started in store.in_progress_sounds().await {
        let percent = started.progress.unwrap_or_default() * 100.0;
        info!("Continue listening: {} ({percent:.0}%)", started.title);
    }

    Ok(())
}

/// Log the player position until playback stops or shutdown is requested
pub async fn listen(store: &AppStore, cancel_token: &CancellationToken, every: Duration) {
    info!("Listening, press Ctrl+C to stop");

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => break,
            () = tokio::time::sleep(every) => {
                let player = store.player().await;
                let Some(sound) = player.current_sound.as_ref() else {
                    break;
                };
                info!(
                    "{} {} / {}",
                    sound.title,
                    format_clock(player.position),
                    format_clock(player.effective_duration())
                );
                if !player.is_playing {
                    break;
                }
            }
        }
    }
}
