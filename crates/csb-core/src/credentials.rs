//! Per-user GitHub token storage.

use std::{collections::HashMap, sync::RwLock};

use crate::domain::UserId;

/// Mapping from caller identity to a single personal access token.
///
/// Absence is a normal outcome, not an error. Implementations must be safe to share
/// across concurrently handled updates.
pub trait CredentialStore: Send + Sync {
    /// Store `token` for `user_id`, replacing any previous one.
    fn set(&self, user_id: UserId, token: String);
    fn get(&self, user_id: UserId) -> Option<String>;
}

/// Process-lifetime store. Nothing is persisted or encrypted.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<HashMap<UserId, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn set(&self, user_id: UserId, token: String) {
        // Poisoning cannot leave a half-written entry; keep serving.
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(user_id, token);
    }

    fn get(&self, user_id: UserId) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&user_id).cloned()
    }
}
