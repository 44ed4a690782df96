//! In-memory session store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeDelta, Utc};
use perfslope_types::CounterSeries;
use uuid::Uuid;

use crate::{Result, Session, SessionId, SessionStore, StoreError};

/// Session store backed by a hash map behind a single lock.
///
/// Reads take the lock shared; saves and sweeps take it exclusively, so a
/// reader never observes a half-inserted session.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store already wrapped for sharing.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Removes sessions idle for longer than `idle` as of `now`.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>, idle: TimeDelta) -> Vec<SessionId> {
        let mut sessions = self.write();
        let expired: Vec<SessionId> = sessions
            .values()
            .filter(|session| session.is_expired(now, idle))
            .map(Session::id)
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        drop(sessions);

        if !expired.is_empty() {
            tracing::info!(removed = expired.len(), "swept expired sessions");
        }
        expired
    }

    /// Returns the time a session was last read, without recording an access.
    #[must_use]
    pub fn last_accessed_at(&self, id: SessionId) -> Option<DateTime<Utc>> {
        self.read().get(&id).map(Session::last_accessed_at)
    }

    fn save_at(&self, counters: Vec<CounterSeries>, now: DateTime<Utc>) -> SessionId {
        let id = Uuid::new_v4();
        let count = counters.len();
        self.write().insert(id, Session::new(id, counters, now));
        tracing::info!(session_id = %id, counters = count, "session created");
        id
    }

    fn get_at(&self, id: SessionId, now: DateTime<Utc>) -> Result<Arc<[CounterSeries]>> {
        let sessions = self.read();
        let session = sessions.get(&id).ok_or_else(|| {
            tracing::debug!(session_id = %id, "session not found");
            StoreError::NotFound(id)
        })?;
        session.touch(now);
        Ok(session.counters())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, counters: Vec<CounterSeries>) -> SessionId {
        self.save_at(counters, Utc::now())
    }

    fn get(&self, id: SessionId) -> Result<Arc<[CounterSeries]>> {
        self.get_at(id, Utc::now())
    }

    fn exists(&self, id: SessionId) -> bool {
        self.read().contains_key(&id)
    }

    fn sweep_expired(&self, idle: TimeDelta) -> Vec<SessionId> {
        self.sweep_expired_at(Utc::now(), idle)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use perfslope_types::{CounterIdentity, DataPoint};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_770_000_000 + secs, 0).unwrap()
    }

    fn minute(m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 8)
            .unwrap()
            .and_hms_opt(0, m, 0)
            .unwrap()
    }

    fn sample_counters() -> Vec<CounterSeries> {
        let points = (0..10)
            .map(|m| DataPoint::new(minute(m), f64::from(m)))
            .collect();
        vec![CounterSeries::new(
            CounterIdentity::new("SERVER", "Memory", "", "Available Bytes", "mem"),
            points,
        )]
    }

    #[test]
    fn test_save_and_get() {
        let store = InMemorySessionStore::new();
        let id = store.save(sample_counters());
        assert!(store.exists(id));
        assert_eq!(store.len(), 1);

        let counters = store.get(id).unwrap();
        assert_eq!(counters.len(), 1);
        assert_eq!(counters[0].len(), 10);
    }

    #[test]
    fn test_unknown_id() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.get(id).unwrap_err(), StoreError::NotFound(id));
        assert!(!store.exists(id));
        assert!(store.get_range(id, minute(0), minute(5)).is_err());
    }

    #[test]
    fn test_ids_are_distinct() {
        let store = InMemorySessionStore::new();
        let a = store.save(Vec::new());
        let b = store.save(Vec::new());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_range_copies() {
        let store = InMemorySessionStore::new();
        let id = store.save(sample_counters());

        let windowed = store.get_range(id, minute(2), minute(4)).unwrap();
        let values: Vec<f64> = windowed[0].data_points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(windowed[0].identity.counter_name, "Available Bytes");

        assert_eq!(store.get(id).unwrap()[0].len(), 10);
    }

    #[test]
    fn test_get_range_outside_data() {
        let store = InMemorySessionStore::new();
        let id = store.save(sample_counters());
        let windowed = store.get_range(id, minute(30), minute(40)).unwrap();
        assert_eq!(windowed.len(), 1);
        assert!(windowed[0].is_empty());
    }

    #[test]
    fn test_read_bumps_access_but_exists_does_not() {
        let store = InMemorySessionStore::new();
        let id = store.save_at(sample_counters(), at(0));

        assert!(store.exists(id));
        assert_eq!(store.last_accessed_at(id), Some(at(0)));

        store.get_at(id, at(600)).unwrap();
        assert_eq!(store.last_accessed_at(id), Some(at(600)));
    }

    #[test]
    fn test_sweep_expired() {
        let store = InMemorySessionStore::new();
        let idle = TimeDelta::minutes(30);
        let stale = store.save_at(sample_counters(), at(0));
        let fresh = store.save_at(sample_counters(), at(0));
        store.get_at(fresh, at(20 * 60)).unwrap();

        let removed = store.sweep_expired_at(at(31 * 60), idle);
        assert_eq!(removed, vec![stale]);
        assert!(!store.exists(stale));
        assert!(store.exists(fresh));
        assert_eq!(
            store.get(stale).unwrap_err(),
            StoreError::NotFound(stale)
        );

        assert!(store.sweep_expired_at(at(31 * 60), idle).is_empty());
        assert_eq!(store.sweep_expired_at(at(51 * 60), idle), vec![fresh]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_saves_and_reads() {
        let store = InMemorySessionStore::shared();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| {
                            let id = store.save(sample_counters());
                            assert_eq!(store.get(id).unwrap()[0].len(), 10);
                            id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<SessionId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let store: Arc<dyn SessionStore> = InMemorySessionStore::shared();
        let id = store.save(sample_counters());
        assert!(store.get(id).is_ok());
        assert!(!store.is_empty());
    }
}
