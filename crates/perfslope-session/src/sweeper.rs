//! Background expiry of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::SessionStore;

/// Idle time after which a session is evicted by default.
pub const DEFAULT_IDLE_TIMEOUT: TimeDelta = TimeDelta::minutes(30);

/// Shortest pause between sweeps; shorter periods are raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a task that evicts sessions idle for longer than `idle`, checking
/// every `every` (at least [`MIN_SWEEP_INTERVAL`]).
///
/// The task runs until the returned handle is aborted or the runtime shuts
/// down. Must be called from within a tokio runtime.
pub fn spawn_sweeper(
    store: Arc<dyn SessionStore>,
    every: Duration,
    idle: TimeDelta,
) -> JoinHandle<()> {
    let every = every.max(MIN_SWEEP_INTERVAL);
    tracing::debug!(
        every_secs = every.as_secs(),
        idle_mins = idle.num_minutes(),
        "starting session sweeper"
    );
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let removed = store.sweep_expired(idle);
            if !removed.is_empty() {
                tracing::debug!(remaining = store.len(), "sweep pass finished");
            }
        }
    })
}
