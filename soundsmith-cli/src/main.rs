mod session;

use anyhow::Context;
use soundsmith_core::{
    seed_sample_playlists, seed_sample_sounds, AppStore, CoreError, PlaybackDriver,
    SoundsmithConfig, StoreEvent,
};
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "Soundsmith";

/// How often the listening status line is logged
const STATUS_INTERVAL: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<()> {
    // Config decides whether file logging is on, so it loads before tracing
    let (config, created_template) = match SoundsmithConfig::load_or_create() {
        Ok(config) => (config, None),
        Err(CoreError::ConfigNotFound { path }) => (SoundsmithConfig::default(), Some(path)),
        Err(e) => return Err(e).context("Failed to load config"),
    };

    init_tracing(config.logging.file_enabled);

    if let Some(path) = created_template {
        info!("Created config template at {}, using defaults", path.display());
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    runtime.block_on(run(config))
}

async fn run(config: SoundsmithConfig) -> anyhow::Result<()> {
    info!("Starting {APP_NAME}");

    let store = AppStore::with_system_sources(&config);

    // Shared cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();

    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down gracefully...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {}", e);
    }

    let event_logger = tokio::spawn(log_store_events(Arc::clone(&store), cancel_token.clone()));

    if config.library.seed_samples {
        seed_sample_sounds(&store).await;
        seed_sample_playlists(&store).await;
    }

    let driver = Arc::new(PlaybackDriver::new(Arc::clone(&store), &config.player));
    let driver_handle = Arc::clone(&driver).start();

    if let Some(sound) = session::run_onboarding(&store, &cancel_token).await? {
        session::file_into_library(&store, &sound).await?;
        session::listen(&store, &cancel_token, STATUS_INTERVAL).await;
    }

    driver.stop();
    cancel_token.cancel();
    let _ = driver_handle.await;
    let _ = event_logger.await;

    let snapshot = store.snapshot().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize app state")?
    );

    Ok(())
}

/// Log store events until shutdown
async fn log_store_events(store: Arc<AppStore>, cancel_token: CancellationToken) {
    let mut rx = store.subscribe();

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => break,
            event = rx.recv() => {
                match event {
                    Ok(event) => log_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        info!("Event logger lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

fn log_event(event: &StoreEvent) {
    match event {
        StoreEvent::OnboardingUpdated { step } => info!("Onboarding at step {}", step),
        StoreEvent::OnboardingReset => info!("Onboarding reset"),
        StoreEvent::SoundAdded { sound_id } => info!("Sound added: {}", sound_id),
        StoreEvent::SoundRemoved { sound_id } => info!("Sound removed: {}", sound_id),
        StoreEvent::PlaylistCreated { playlist_id } => info!("Playlist created: {}", playlist_id),
        StoreEvent::PlaylistUpdated { playlist_id } => info!("Playlist updated: {}", playlist_id),
        StoreEvent::PlaylistDeleted { playlist_id } => info!("Playlist deleted: {}", playlist_id),
        StoreEvent::PlaybackStarted { sound_id } => info!("Playback started: {}", sound_id),
        StoreEvent::PlaybackPaused { position } => info!("Playback paused at {:?}", position),
        StoreEvent::RateChanged { rate } => info!("Playback rate {}x", rate),
        StoreEvent::VolumeChanged { volume } => info!("Volume {}", volume),
        StoreEvent::GenerationStarted => info!("Generation started"),
        StoreEvent::GenerationCancelled => info!("Generation cancelled"),
        StoreEvent::SoundGenerated { sound_id } => info!("Sound generated: {}", sound_id),
        StoreEvent::UserUpdated
        | StoreEvent::SoundProgressUpdated { .. }
        | StoreEvent::ProgressUpdated { .. }
        | StoreEvent::GenerationProgress { .. } => {
            // High-frequency or already logged by the session
        }
    }
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if file_logging_enabled {
        let log_path = soundsmith_core::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
