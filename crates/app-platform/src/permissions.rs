//! Permission prompts
//!
//! Each prompt the app shows (tracking, notifications) is a
//! [`PermissionService`]. The [`PermissionInteractor`] bundles both for the
//! screens that ask for them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    /// The device does not allow the user to grant this permission
    Restricted,
    /// The user declined
    Denied,
    /// The user agreed
    Authorized,
}

impl AuthorizationStatus {
    /// Check whether the permission was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationStatus::Authorized)
    }

    /// Check whether the user has answered (or cannot answer) the prompt
    pub fn is_determined(&self) -> bool {
        !matches!(self, AuthorizationStatus::NotDetermined)
    }
}

/// Which permission a service manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// App tracking transparency
    Tracking,
    /// Push notifications
    Notifications,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Tracking => f.write_str("tracking"),
            PermissionKind::Notifications => f.write_str("notifications"),
        }
    }
}

/// A single permission prompt
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Which permission this service manages
    fn kind(&self) -> PermissionKind;

    /// Current status without prompting
    async fn status(&self) -> AuthorizationStatus;

    /// Prompt the user (if not answered yet) and return the resulting status
    async fn request(&self) -> AuthorizationStatus;
}

// =============================================================================
// Static Service
// =============================================================================

/// Headless permission service that answers every prompt the same way
///
/// Used on platforms without a system prompt and in tests. Once answered,
/// the status sticks, like the system prompts it stands in for.
#[derive(Debug)]
pub struct StaticPermissionService {
    kind: PermissionKind,
    answer: AuthorizationStatus,
    status: RwLock<AuthorizationStatus>,
}

impl StaticPermissionService {
    /// Create a service that answers prompts with `answer`
    pub fn new(kind: PermissionKind, answer: AuthorizationStatus) -> Self {
        Self {
            kind,
            answer,
            status: RwLock::new(AuthorizationStatus::NotDetermined),
        }
    }

    /// Create a service that grants every prompt
    pub fn granting(kind: PermissionKind) -> Self {
        Self::new(kind, AuthorizationStatus::Authorized)
    }
}

#[async_trait]
impl PermissionService for StaticPermissionService {
    fn kind(&self) -> PermissionKind {
        self.kind
    }

    async fn status(&self) -> AuthorizationStatus {
        *self.status.read().await
    }

    async fn request(&self) -> AuthorizationStatus {
        let mut status = self.status.write().await;
        if !status.is_determined() {
            *status = self.answer;
            tracing::info!(permission = %self.kind, status = ?self.answer, "permission answered");
        }
        *status
    }
}

// =============================================================================
// Interactor
// =============================================================================

/// Entry point screens use to request permissions
#[derive(Clone)]
pub struct PermissionInteractor {
    tracking: Arc<dyn PermissionService>,
    notifications: Arc<dyn PermissionService>,
}

impl PermissionInteractor {
    /// Create an interactor from the two permission services
    pub fn new(
        tracking: Arc<dyn PermissionService>,
        notifications: Arc<dyn PermissionService>,
    ) -> Self {
        Self {
            tracking,
            notifications,
        }
    }

    /// Request app tracking permission
    pub async fn request_tracking(&self) -> AuthorizationStatus {
        self.tracking.request().await
    }

    /// Request notification permission
    pub async fn request_notifications(&self) -> AuthorizationStatus {
        self.notifications.request().await
    }

    /// Current status of one permission
    pub async fn status(&self, kind: PermissionKind) -> AuthorizationStatus {
        match kind {
            PermissionKind::Tracking => self.tracking.status().await,
            PermissionKind::Notifications => self.notifications.status().await,
        }
    }
}

impl fmt::Debug for PermissionInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionInteractor")
            .field("tracking", &self.tracking.kind())
            .field("notifications", &self.notifications.kind())
            .finish()
    }
}
