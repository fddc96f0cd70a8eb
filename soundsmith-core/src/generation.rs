//! Background sound generation.
//!
//! A generation waits out the configured delay, reporting progress on a fixed
//! tick, then hands its result to the store. It is dropped without effect if
//! it is cancelled or the onboarding session is reset before the delay ends.

use crate::generator::GenerationRequest;
use crate::sound::Sound;
use crate::store::AppStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const LOG_TARGET: &str = "soundsmith::generation";

/// Handle to a pending generation.
///
/// Dropping the handle before calling [`GenerationTask::wait`] or
/// [`GenerationTask::detach`] cancels the generation.
pub struct GenerationTask {
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<Option<Sound>>>,
}

impl GenerationTask {
    pub(crate) fn spawn(
        store: Arc<AppStore>,
        epoch: u64,
        request: GenerationRequest,
        cancel_token: CancellationToken,
        delay: Duration,
        progress_tick: Duration,
    ) -> Self {
        let token = cancel_token.clone();
        let handle = tokio::spawn(async move {
            run(&store, epoch, &request, &token, delay, progress_tick).await
        });

        Self {
            cancel_token,
            handle: Some(handle),
        }
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Wait for the generation to finish. Returns `None` if it was cancelled,
    /// its session was reset, or the task failed.
    ///
    /// Dropping the returned future before it resolves cancels the generation.
    pub async fn wait(mut self) -> Option<Sound> {
        let sound = match self.handle.as_mut() {
            Some(handle) => handle.await.ok().flatten(),
            None => None,
        };
        self.handle = None;
        sound
    }

    /// Let the generation run unattended. It can still be stopped through
    /// its cancellation token or an onboarding reset.
    #[must_use]
    pub fn detach(mut self) -> JoinHandle<Option<Sound>> {
        match self.handle.take() {
            Some(handle) => handle,
            None => tokio::spawn(async { None }),
        }
    }
}

impl Drop for GenerationTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel_token.cancel();
        }
    }
}

async fn run(
    store: &AppStore,
    epoch: u64,
    request: &GenerationRequest,
    token: &CancellationToken,
    delay: Duration,
    progress_tick: Duration,
) -> Option<Sound> {
    let started = Instant::now();
    let deadline = sleep(delay);
    tokio::pin!(deadline);

    // interval_at panics on a zero period
    let period = progress_tick.max(Duration::from_millis(1));
    let mut ticker = interval_at(started + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!(target: LOG_TARGET, "Generation cancelled");
                return None;
            }
            () = &mut deadline => break,
            _ = ticker.tick() => {
                let elapsed = started.elapsed().min(delay);
                debug!(target: LOG_TARGET, "Generation progress {:?}/{:?}", elapsed, delay);
                store.report_generation_progress(epoch, token, elapsed, delay).await;
            }
        }
    }

    store.complete_generation(epoch, token, request).await
}
