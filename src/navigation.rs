use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    /// In-app transition that keeps the current page in history
    Push,
    /// In-app transition that replaces the current history entry
    Replace,
    /// Full reset discarding all in-memory state
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub path: String,
    pub kind: NavigationKind,
}

impl Navigation {
    pub fn push(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: NavigationKind::Push }
    }

    pub fn replace(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: NavigationKind::Replace }
    }

    pub fn hard(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: NavigationKind::Hard }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Invalidated { redirect_to: Navigation },
}

/// Publisher for session lifecycle events.
///
/// The hosting application subscribes once and performs the navigation
/// carried by each event. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
    last_invalidation: Arc<Mutex<Option<Navigation>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            tx,
            last_invalidation: Arc::new(Mutex::new(None)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: SessionEvent) {
        let SessionEvent::Invalidated { redirect_to } = &event;
        if let Ok(mut last) = self.last_invalidation.lock() {
            *last = Some(redirect_to.clone());
        }

        // No subscribers is fine
        let _ = self.tx.send(event);
    }

    pub fn invalidate(&self, login_path: &str) {
        self.publish(SessionEvent::Invalidated {
            redirect_to: Navigation::hard(login_path),
        });
    }

    /// Most recent forced navigation, if any session was invalidated
    pub fn last_invalidation(&self) -> Option<Navigation> {
        self.last_invalidation.lock().ok().and_then(|last| last.clone())
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
