//! Single-slot storage for the session bearer token.
//!
//! Storage is best-effort: every operation swallows failures of the
//! underlying medium, and "no token" is always a valid answer. The rest of
//! the crate reads "no token" as "not authenticated".

mod file;

pub use file::FileTokenStore;

use std::sync::RwLock;

/// Process-wide holder of the current session token.
///
/// Implementations keep last-write-wins semantics and never fail.
pub trait TokenStore: Send + Sync {
    /// Persist `value` as the current token. `None` or an empty string clears.
    fn set_token(&self, value: Option<&str>);

    /// Current token, or `None` when absent or unreadable.
    fn get_token(&self) -> Option<String>;

    fn clear_token(&self) {
        self.set_token(None);
    }

    fn has_token(&self) -> bool {
        self.get_token().is_some()
    }
}

/// In-process token store, used by tests and by hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_token(Some(token));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, value: Option<&str>) {
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);
        match self.slot.write() {
            Ok(mut slot) => *slot = value,
            Err(poisoned) => {
                tracing::warn!("token store lock poisoned, recovering");
                *poisoned.into_inner() = value;
            }
        }
    }

    fn get_token(&self) -> Option<String> {
        match self.slot.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }
}
