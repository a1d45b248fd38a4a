//! Port for the remote codespace lifecycle API.
//!
//! Nothing here caches remote state: every call goes to the API.

use async_trait::async_trait;

use crate::Result;

/// A remote codespace, identified by an opaque id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codespace {
    pub id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Stop,
}

impl LifecycleAction {
    /// Path segment of the lifecycle endpoint (`/user/codespaces/{id}/{segment}`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[async_trait]
pub trait CodespacesApi: Send + Sync {
    /// List the caller's codespaces in API order. Success is HTTP 200 only.
    async fn list(&self, token: &str) -> Result<Vec<Codespace>>;

    /// Ask the API to start or stop a codespace. Success is HTTP 202 only.
    async fn transition(&self, token: &str, id: &str, action: LifecycleAction) -> Result<()>;
}
