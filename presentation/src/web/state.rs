//! Server-side state of browser sessions

use parley_application::{EnsureSessionUseCase, LlmSession, SessionSlot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{OwnedMutexGuard, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Sessions held at once before the least recently seen idle one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// One browser page's context: its chat session slot, and the lock that
/// keeps it to one turn at a time.
pub struct UiSession {
    slot: Mutex<SessionSlot>,
    turn: Arc<tokio::sync::Mutex<()>>,
    last_seen: Mutex<Instant>,
}

impl Default for UiSession {
    fn default() -> Self {
        Self {
            slot: Mutex::default(),
            turn: Arc::default(),
            last_seen: Mutex::new(Instant::now()),
        }
    }
}

impl UiSession {
    /// Get or create the chat session of this page.
    pub fn ensure(&self, use_case: &EnsureSessionUseCase) -> Arc<dyn LlmSession> {
        use_case.execute(&mut self.slot())
    }

    /// Claim the turn lock without waiting. `None` while a turn is running.
    pub fn begin_turn(&self) -> Option<OwnedMutexGuard<()>> {
        Arc::clone(&self.turn).try_lock_owned().ok()
    }

    /// A turn is streaming right now.
    pub fn is_busy(&self) -> bool {
        self.turn.try_lock().is_err()
    }

    fn touch(&self) {
        *lock(&self.last_seen) = Instant::now();
    }

    fn last_seen(&self) -> Instant {
        *lock(&self.last_seen)
    }

    fn slot(&self) -> MutexGuard<'_, SessionSlot> {
        lock(&self.slot)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory registry of browser sessions. Nothing is persisted.
///
/// A page that goes away without clearing its chat is dropped by
/// [`UiSessionStore::sweep`] once idle, or evicted when the store is full.
pub struct UiSessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<UiSession>>>,
    max_sessions: usize,
}

impl Default for UiSessionStore {
    fn default() -> Self {
        Self {
            sessions: RwLock::default(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl UiSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.max_sessions {
            // Busy sessions are never evicted; the map may exceed the limit
            // while every held session is mid-turn
            let oldest = sessions
                .iter()
                .filter(|(_, ui)| !ui.is_busy())
                .min_by_key(|(_, ui)| ui.last_seen())
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                info!("UI session {} evicted: store full", oldest);
            }
        }

        sessions.insert(id, Arc::new(UiSession::default()));
        debug!("UI session {} opened", id);
        id
    }

    /// Look up a session and mark it as seen.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<UiSession>> {
        let ui = self.sessions.read().await.get(id).cloned()?;
        ui.touch();
        Some(ui)
    }

    /// Drop every session unseen for longer than `idle`, except those
    /// streaming a reply. Returns how many were dropped.
    pub async fn sweep(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, ui| ui.is_busy() || now.duration_since(ui.last_seen()) < idle);
        let dropped = before - sessions.len();
        if dropped > 0 {
            debug!("Swept {} idle UI sessions", dropped);
        }
        dropped
    }

    /// Forget a session. A turn already running still finishes.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!("UI session {} closed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Everything the chat routes need.
#[derive(Clone)]
pub struct ChatState {
    pub ensure: EnsureSessionUseCase,
    pub sessions: Arc<UiSessionStore>,
}

impl ChatState {
    pub fn new(ensure: EnsureSessionUseCase) -> Self {
        Self {
            ensure,
            sessions: Arc::new(UiSessionStore::new()),
        }
    }
}
