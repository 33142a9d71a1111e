// Fixed-interval checkpoint scheduling.
//
// A multi-hour session cannot hold every frame in memory; the scheduler
// periodically triggers a drain-and-encode cycle on the session so the
// working set stays bounded. Cycle failures are logged here and never reach
// the live capture path.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::session::{CaptureSession, SessionState};

/// Spawn the checkpoint loop for a recording session. The task exits once
/// the session leaves `Recording`.
pub(crate) fn spawn_scheduler(session: Arc<CaptureSession>) -> JoinHandle<()> {
    let period = session.config().checkpoint_interval;

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // checkpoint fires one full period after start.
        interval.tick().await;

        loop {
            interval.tick().await;
            if session.state() != SessionState::Recording {
                break;
            }
            if let Err(error) = session.checkpoint().await {
                warn!("{error}");
            }
        }

        debug!("checkpoint scheduler exited");
    })
}
