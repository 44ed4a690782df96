//! Windowed counter session store for perfslope.
//!
//! - [`SessionStore`] - Store capability shared by the service and the sweeper
//! - [`InMemorySessionStore`] - Map-backed store guarded by a single lock
//! - [`Session`] - One stored import and its access times
//! - [`spawn_sweeper`] - Periodically evicts idle sessions

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod memory;
mod session;
mod store;
mod sweeper;

pub use error::{Result, StoreError};
pub use memory::InMemorySessionStore;
pub use session::{Session, SessionId};
pub use store::SessionStore;
pub use sweeper::{DEFAULT_IDLE_TIMEOUT, MIN_SWEEP_INTERVAL, spawn_sweeper};
