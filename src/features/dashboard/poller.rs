use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

use crate::features::dashboard::services::api;
use crate::features::dashboard::state::DashboardState;

/// The reference cadence of the original dashboard.
pub const POLL_INTERVAL_MS: u32 = 2_000;

/// Spawn the snapshot loop for one session epoch. Each tick sleeps, fetches
/// the full transaction list, and applies it through the reconciler's epoch
/// guard. The loop is "cancelled" by epoch: `end_session`/`begin_session`
/// bump the epoch, the next check fails, and the task unwinds; a response
/// already in flight at that point is discarded by `apply_snapshot`.
///
/// Poll failures are logged and skipped. The fixed-interval retry is the
/// recovery policy: the next tick replaces whatever this one missed.
pub fn spawn_snapshot_poller(state: DashboardState, epoch: u64) {
    spawn_local(async move {
        loop {
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
            if !state.session_is(epoch) {
                break;
            }
            match api::fetch_transactions().await {
                Ok(list) => {
                    if !state.apply_snapshot(epoch, list) {
                        break;
                    }
                }
                Err(err) => err.report(),
            }
        }
    });
}
