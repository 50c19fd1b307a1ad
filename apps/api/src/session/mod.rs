//! Session-scoped chat state.
//!
//! Lifecycle: created by `POST /sessions`, mutated once per turn, cleared by
//! the clear action, destroyed by `DELETE /sessions/:id` (sent by the page on
//! `pagehide`). Sessions idle for longer than the store's TTL are evicted the
//! next time a session is created. Nothing outlives the process.
//!
//! Settings and conversation sit behind separate locks: settings may change
//! while a turn is running, and the change is picked up by the next turn.

pub mod handlers;
pub mod turn;

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::conversation::{Conversation, Turn};
use crate::llm_client::ModelConfig;
use crate::tools::ToolKind;

/// Operator-controlled configuration for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(flatten)]
    pub model: ModelConfig,
    /// Tool labels or names. Unknown entries are kept but never match a tool.
    pub enabled_tools: Vec<String>,
}

impl SessionSettings {
    /// All four tools enabled.
    pub fn with_model(model: ModelConfig) -> Self {
        Self {
            model,
            enabled_tools: ToolKind::ALL
                .iter()
                .map(|k| k.label().to_string())
                .collect(),
        }
    }
}

pub struct SessionContext {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    settings: RwLock<SessionSettings>,
    conversation: Mutex<Conversation>,
    last_active: StdMutex<Instant>,
}

impl SessionContext {
    fn new(settings: SessionSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            settings: RwLock::new(settings),
            conversation: Mutex::new(Conversation::default()),
            last_active: StdMutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        let mut last = self.last_active.lock().unwrap_or_else(|e| e.into_inner());
        *last = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed()
    }

    fn is_busy(&self) -> bool {
        self.conversation.try_lock().is_err()
    }

    pub async fn settings(&self) -> SessionSettings {
        self.settings.read().await.clone()
    }

    /// Applies `change` and validates the result under one write guard, so
    /// concurrent updates never drop each other's fields. On a validation
    /// error the stored settings are left untouched.
    pub async fn update_settings<F>(&self, change: F) -> Result<SessionSettings, String>
    where
        F: FnOnce(&mut SessionSettings),
    {
        let mut guard = self.settings.write().await;
        let mut next = guard.clone();
        change(&mut next);
        next.model.validate()?;
        *guard = next.clone();
        Ok(next)
    }

    /// Waits for any in-flight turn, then copies the transcript.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.conversation.lock().await.transcript().to_vec()
    }

    /// Exclusive access for a turn or a clear. `None` while another holder is active.
    pub fn try_conversation(&self) -> Option<tokio::sync::MutexGuard<'_, Conversation>> {
        self.conversation.try_lock().ok()
    }
}

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// In-memory registry of live sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<SessionContext>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn create(&self, settings: SessionSettings) -> Arc<SessionContext> {
        self.evict_idle().await;
        let session = Arc::new(SessionContext::new(settings));
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!(session_id = %session.id, "Session created");
        session
    }

    /// Looks up a session and marks it active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionContext>> {
        let session = self.sessions.read().await.get(&id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Drops sessions idle for longer than the TTL. A session with a turn in
    /// flight is never evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.is_busy() || s.idle_for() < self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    pub async fn destroy(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session destroyed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
