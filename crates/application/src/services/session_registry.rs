//! Session registry
//!
//! Holds one [`FormController`] per client session. Operations on a session
//! are rejected while another operation on the same session is in flight.

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use domain::SessionId;
use parking_lot::RwLock;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use super::form_controller::{FormController, FormDependencies};
use crate::{error::ApplicationError, ports::RecordStorePort};

/// Exclusive access to one session's controller
pub type SessionGuard = OwnedMutexGuard<FormController>;

/// Configuration for the session registry
#[derive(Debug, Clone)]
pub struct SessionRegistryConfig {
    /// Maximum number of live sessions
    pub max_sessions: usize,
    /// Sessions untouched for this long are dropped
    pub idle_ttl: Duration,
}

impl Default for SessionRegistryConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_ttl: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    controller: Arc<Mutex<FormController>>,
    last_accessed: DateTime<Utc>,
}

impl SessionEntry {
    fn is_idle(&self) -> bool {
        self.controller.try_lock().is_ok()
    }
}

/// Registry of live form sessions
pub struct SessionRegistry {
    deps: FormDependencies,
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    config: SessionRegistryConfig,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("config", &self.config)
            .field("sessions", &self.sessions.read().len())
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(deps: FormDependencies, config: SessionRegistryConfig) -> Self {
        Self {
            deps,
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Shared record store
    pub fn records(&self) -> &Arc<dyn RecordStorePort> {
        &self.deps.records
    }

    /// Shared collaborators
    pub const fn dependencies(&self) -> &FormDependencies {
        &self.deps
    }

    /// Start a new idle session
    ///
    /// When the registry is full, expired sessions are dropped first, then the
    /// least recently used idle session.
    #[instrument(skip(self))]
    pub fn create(&self) -> Result<SessionId, ApplicationError> {
        let id = SessionId::new();
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.config.max_sessions {
            self.evict_expired_locked(&mut sessions);
        }
        if sessions.len() >= self.config.max_sessions {
            let lru = sessions
                .iter()
                .filter(|(_, e)| e.is_idle())
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(id, _)| *id);

            match lru {
                Some(old) => {
                    sessions.remove(&old);
                    debug!(session_id = %old, "Evicted least recently used session");
                },
                None => {
                    warn!("Session limit reached and all sessions are busy");
                    return Err(ApplicationError::SessionBusy(format!(
                        "session limit of {} reached",
                        self.config.max_sessions
                    )));
                },
            }
        }

        sessions.insert(
            id,
            SessionEntry {
                controller: Arc::new(Mutex::new(FormController::new(self.deps.clone()))),
                last_accessed: Utc::now(),
            },
        );
        debug!(session_id = %id, total = sessions.len(), "Session created");
        Ok(id)
    }

    /// Take exclusive access to a session
    ///
    /// Fails with `SessionBusy` instead of waiting when another operation on
    /// the session has not finished. An idle session past its TTL is dropped
    /// and reported as not found.
    pub fn acquire(&self, id: SessionId) -> Result<SessionGuard, ApplicationError> {
        let controller = {
            let mut sessions = self.sessions.write();
            let entry = sessions
                .get_mut(&id)
                .ok_or_else(|| ApplicationError::NotFound(format!("Session {id}")))?;

            let now = Utc::now();
            if now - entry.last_accessed >= self.ttl() && entry.is_idle() {
                sessions.remove(&id);
                debug!(session_id = %id, "Expired session evicted on access");
                return Err(ApplicationError::NotFound(format!("Session {id}")));
            }
            entry.last_accessed = now;
            Arc::clone(&entry.controller)
        };

        controller.try_lock_owned().map_err(|_| {
            debug!(session_id = %id, "Rejected concurrent operation");
            ApplicationError::SessionBusy(format!(
                "session {id} has an operation in progress"
            ))
        })
    }

    /// Drop a session; returns whether it existed
    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Whether a session exists
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().contains_key(&id)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether there are no live sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Drop sessions idle for longer than the configured TTL
    ///
    /// Sessions with an operation in flight are kept.
    pub fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.write();
        self.evict_expired_locked(&mut sessions)
    }

    fn ttl(&self) -> TimeDelta {
        TimeDelta::from_std(self.config.idle_ttl).unwrap_or(TimeDelta::MAX)
    }

    fn evict_expired_locked(&self, sessions: &mut HashMap<SessionId, SessionEntry>) -> usize {
        let ttl = self.ttl();
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, e| now - e.last_accessed < ttl || !e.is_idle());
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Expired idle sessions");
        }
        evicted
    }
}
