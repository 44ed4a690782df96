//! Session store capability.

use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};
use perfslope_types::CounterSeries;

use crate::{Result, SessionId};

/// Keeps imported counters addressable by session id.
///
/// Implementations must be safe to share between threads: the analysis
/// service and the expiry sweeper hold the same store.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Stores counters under a fresh id and returns it.
    fn save(&self, counters: Vec<CounterSeries>) -> SessionId;

    /// Returns the counters of a session and records the access.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// session does not exist or has expired.
    fn get(&self, id: SessionId) -> Result<Arc<[CounterSeries]>>;

    /// Returns copies of a session's counters limited to `[start, end]`.
    ///
    /// The stored series are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// session does not exist or has expired.
    fn get_range(
        &self,
        id: SessionId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CounterSeries>> {
        let counters = self.get(id)?;
        Ok(counters
            .iter()
            .map(|series| series.windowed(start, end))
            .collect())
    }

    /// Returns true if the session exists, without recording an access.
    fn exists(&self, id: SessionId) -> bool;

    /// Removes sessions idle for longer than `idle` and returns their ids.
    fn sweep_expired(&self, idle: TimeDelta) -> Vec<SessionId>;

    /// Returns the number of stored sessions.
    fn len(&self) -> usize;

    /// Returns true if no sessions are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
