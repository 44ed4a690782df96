//! Stored imports.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use perfslope_types::CounterSeries;
use uuid::Uuid;

/// Unique identifier for a stored import.
pub type SessionId = Uuid;

/// One stored import.
///
/// The counters are shared immutably; the last access time is updated in
/// place so reads only need shared access to the session.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    counters: Arc<[CounterSeries]>,
    created_at: DateTime<Utc>,
    /// Milliseconds since the Unix epoch.
    last_accessed_ms: AtomicI64,
}

impl Session {
    /// Creates a session accessed for the first time at `now`.
    #[must_use]
    pub fn new(id: SessionId, counters: Vec<CounterSeries>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            counters: counters.into(),
            created_at: now,
            last_accessed_ms: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Returns the session id.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the stored counters.
    #[must_use]
    pub fn counters(&self) -> Arc<[CounterSeries]> {
        Arc::clone(&self.counters)
    }

    /// Returns when the session was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session was last read.
    #[must_use]
    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_accessed_ms.load(Ordering::Relaxed))
            .unwrap_or(self.created_at)
    }

    /// Records a read at `now`. The access time never moves backwards.
    pub fn touch(&self, now: DateTime<Utc>) {
        self.last_accessed_ms
            .fetch_max(now.timestamp_millis(), Ordering::Relaxed);
    }

    /// Returns true if the session has been idle for longer than `idle` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, idle: TimeDelta) -> bool {
        now - self.last_accessed_at() > idle
    }
}
