//! Messages screen
//!
//! Chat is not wired to a backend yet: going online, refreshing and ending a
//! session only simulate network latency and ask a [`Presence`] source how
//! many users are around.

use app_platform::{AuthorizationStatus, PermissionInteractor};
use app_state::{Reducer, Store};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

/// Simulated latency of going online
pub const CONNECT_LATENCY: Duration = Duration::from_secs(2);

/// Simulated latency of ending a session
pub const END_SESSION_LATENCY: Duration = Duration::from_secs(1);

/// Simulated latency of refreshing the user list
pub const REFRESH_LATENCY: Duration = Duration::from_millis(1500);

/// Source of online user counts
#[async_trait]
pub trait Presence: Send + Sync {
    /// Number of users currently online
    async fn online_users(&self) -> usize;
}

/// Presence source for builds without a chat backend; nobody is online
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflinePresence;

#[async_trait]
impl Presence for OfflinePresence {
    async fn online_users(&self) -> usize {
        0
    }
}

// =============================================================================
// State
// =============================================================================

/// What the messages screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagesViewState {
    /// The user has not gone online
    #[default]
    NotOnline,
    /// The user is online
    Online {
        /// Whether nobody else is online
        is_empty: bool,
    },
}

impl MessagesViewState {
    /// Headline
    pub fn title(&self) -> &'static str {
        match self {
            MessagesViewState::NotOnline => "Others are ready — just go online",
            MessagesViewState::Online { is_empty: true } => "No users online",
            MessagesViewState::Online { is_empty: false } => "Users online",
        }
    }

    /// Text under the headline
    pub fn description(&self) -> &'static str {
        match self {
            MessagesViewState::NotOnline => "The moment you're connected, chats will appear here",
            MessagesViewState::Online { is_empty: true } => {
                "Please wait a little, or in the meantime, you can explore our photo pose library or plan your shoot"
            }
            MessagesViewState::Online { is_empty: false } => "Select a user to start chatting",
        }
    }

    /// Illustration asset name
    pub fn image(&self) -> &'static str {
        match self {
            MessagesViewState::NotOnline => "messages",
            MessagesViewState::Online { .. } => "users",
        }
    }

    /// Main button label
    pub fn button_text(&self) -> &'static str {
        match self {
            MessagesViewState::NotOnline => "Go Online",
            MessagesViewState::Online { is_empty: true } => "End Session",
            MessagesViewState::Online { is_empty: false } => "Refresh",
        }
    }

    /// Intent sent by the main button
    pub fn button_intent(&self) -> MessagesIntent {
        match self {
            MessagesViewState::NotOnline => MessagesIntent::Connect,
            MessagesViewState::Online { is_empty: true } => MessagesIntent::EndSession,
            MessagesViewState::Online { is_empty: false } => MessagesIntent::RefreshUsers,
        }
    }

    /// Whether the placeholder container is shown instead of a user list
    pub fn show_default_container(&self) -> bool {
        !matches!(self, MessagesViewState::Online { is_empty: false })
    }

    /// Whether the navigation bar is visible
    pub fn show_navigation_bar(&self) -> bool {
        !matches!(self, MessagesViewState::NotOnline)
    }
}

/// Messages screen state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessagesState {
    /// Whether the loader is visible
    pub is_loading: bool,
    /// What the screen is showing
    pub view_state: MessagesViewState,
    /// Answer to the last notification prompt
    pub notification_status: Option<AuthorizationStatus>,
}

/// Messages screen intents
#[derive(Debug, Clone, PartialEq)]
pub enum MessagesIntent {
    /// Go online
    Connect,
    /// Flip the loader
    ToggleLoader,
    /// Go offline
    EndSession,
    /// Look for online users again
    RefreshUsers,
    /// Replace the view state
    SetViewState(MessagesViewState),
    /// Open settings
    TapSettings,
    /// Ask for notification permission
    ShowNotificationPermission,
    /// The notification prompt was answered
    NotificationPermissionResolved(AuthorizationStatus),
}

// =============================================================================
// Reducer
// =============================================================================

/// Messages screen logic
pub struct MessagesReducer {
    permissions: PermissionInteractor,
    presence: Arc<dyn Presence>,
}

/// Running messages screen
pub type MessagesStore = Store<MessagesReducer>;

impl MessagesReducer {
    /// Create the reducer
    pub fn new(permissions: PermissionInteractor, presence: Arc<dyn Presence>) -> Self {
        Self {
            permissions,
            presence,
        }
    }

    /// Wait, then hide the loader and show whether anyone is online
    fn go_online(&self, latency: Duration) -> ScreenEffect<MessagesIntent> {
        let presence = Arc::clone(&self.presence);
        ScreenEffect::task(async move {
            tokio::time::sleep(latency).await;
            let online = presence.online_users().await;
            tracing::debug!(online, "presence checked");
            ScreenEffect::Sequence(vec![
                MessagesIntent::ToggleLoader,
                MessagesIntent::SetViewState(MessagesViewState::Online {
                    is_empty: online == 0,
                }),
            ])
        })
    }
}

impl Reducer for MessagesReducer {
    type State = MessagesState;
    type Intent = MessagesIntent;
    type Destination = Destination;

    fn reduce(&self, state: &mut MessagesState, intent: MessagesIntent) -> ScreenEffect<MessagesIntent> {
        match intent {
            MessagesIntent::Connect => {
                state.is_loading = true;
                self.go_online(CONNECT_LATENCY)
            }

            MessagesIntent::RefreshUsers => {
                state.is_loading = true;
                self.go_online(REFRESH_LATENCY)
            }

            MessagesIntent::EndSession => {
                state.is_loading = true;
                ScreenEffect::task(async {
                    tokio::time::sleep(END_SESSION_LATENCY).await;
                    ScreenEffect::Sequence(vec![
                        MessagesIntent::ToggleLoader,
                        MessagesIntent::SetViewState(MessagesViewState::NotOnline),
                    ])
                })
            }

            MessagesIntent::ToggleLoader => {
                state.is_loading = !state.is_loading;
                ScreenEffect::None
            }

            MessagesIntent::SetViewState(view_state) => {
                state.view_state = view_state;
                ScreenEffect::None
            }

            MessagesIntent::TapSettings => ScreenEffect::present_modal(Destination::Settings),

            MessagesIntent::ShowNotificationPermission => {
                let permissions = self.permissions.clone();
                ScreenEffect::task(async move {
                    let status = permissions.request_notifications().await;
                    ScreenEffect::Intent(MessagesIntent::NotificationPermissionResolved(status))
                })
            }

            MessagesIntent::NotificationPermissionResolved(status) => {
                state.notification_status = Some(status);
                ScreenEffect::None
            }
        }
    }
}

/// Header of the messages screen
pub fn header(state: &MessagesState) -> ScreenHeader<MessagesIntent> {
    let header = ScreenHeader::new();
    let header = if state.view_state.show_navigation_bar() {
        header.with_title("Messages")
    } else {
        header
    };
    header.with_trailing(HeaderButton::new(HeaderIcon::Settings, MessagesIntent::TapSettings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{granting_permissions, MockPresence};
    use app_state::{Effect, Navigator};
    use tokio::time::Instant;

    fn store_with(online: usize) -> (MessagesStore, Navigator<Destination>) {
        let mut presence = MockPresence::new();
        presence.expect_online_users().returning(move || online);
        let navigator = Navigator::new();
        let store = Store::new(
            MessagesReducer::new(granting_permissions(), Arc::new(presence)),
            MessagesState::default(),
            navigator.clone(),
        );
        (store, navigator)
    }

    #[test]
    fn test_view_state_presentation() {
        let not_online = MessagesViewState::NotOnline;
        assert_eq!(not_online.button_text(), "Go Online");
        assert_eq!(not_online.button_intent(), MessagesIntent::Connect);
        assert!(!not_online.show_navigation_bar());

        let empty = MessagesViewState::Online { is_empty: true };
        assert_eq!(empty.title(), "No users online");
        assert_eq!(empty.button_intent(), MessagesIntent::EndSession);
        assert!(empty.show_default_container());

        let busy = MessagesViewState::Online { is_empty: false };
        assert_eq!(busy.button_text(), "Refresh");
        assert_eq!(busy.button_intent(), MessagesIntent::RefreshUsers);
        assert!(!busy.show_default_container());
    }

    #[test]
    fn test_tap_settings_presents_modal() {
        let reducer = MessagesReducer::new(granting_permissions(), Arc::new(OfflinePresence));
        let mut state = MessagesState::default();
        assert_eq!(
            reducer.reduce(&mut state, MessagesIntent::TapSettings),
            Effect::present_modal(Destination::Settings)
        );
        assert_eq!(state, MessagesState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_with_nobody_online() {
        let (store, _) = store_with(0);
        let started = Instant::now();

        store.send_and_wait(MessagesIntent::Connect).await.unwrap();
        assert!(store.state().is_loading);

        let state = store
            .wait_for(|state| state.view_state != MessagesViewState::NotOnline)
            .await
            .unwrap();
        assert!(!state.is_loading);
        assert_eq!(state.view_state, MessagesViewState::Online { is_empty: true });
        assert!(started.elapsed() >= CONNECT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_finds_users() {
        let (store, _) = store_with(3);
        store
            .send_and_wait(MessagesIntent::SetViewState(MessagesViewState::Online {
                is_empty: true,
            }))
            .await
            .unwrap();

        store.send(MessagesIntent::RefreshUsers);
        let state = store
            .wait_for(|state| state.view_state == MessagesViewState::Online { is_empty: false })
            .await
            .unwrap();
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_session_goes_offline() {
        let (store, _) = store_with(0);
        store
            .send_and_wait(MessagesIntent::SetViewState(MessagesViewState::Online {
                is_empty: true,
            }))
            .await
            .unwrap();

        let started = Instant::now();
        store.send(MessagesIntent::EndSession);
        let state = store
            .wait_for(|state| state.view_state == MessagesViewState::NotOnline)
            .await
            .unwrap();
        assert!(!state.is_loading);
        assert!(started.elapsed() >= END_SESSION_LATENCY);
        assert!(started.elapsed() < CONNECT_LATENCY);
    }

    #[tokio::test]
    async fn test_notification_permission_resolves() {
        let (store, navigator) = store_with(0);
        store.send(MessagesIntent::ShowNotificationPermission);
        let state = store
            .wait_for(|state| state.notification_status.is_some())
            .await
            .unwrap();
        assert_eq!(state.notification_status, Some(AuthorizationStatus::Authorized));
        assert_eq!(navigator.depth(), 0);
    }

    #[tokio::test]
    async fn test_settings_modal_through_store() {
        let (store, navigator) = store_with(0);
        store.send_and_wait(MessagesIntent::TapSettings).await.unwrap();
        assert_eq!(navigator.modal(), Some(Destination::Settings));
        assert!(navigator.path().is_empty());
    }

    #[test]
    fn test_header_title_only_when_online() {
        let mut state = MessagesState::default();
        assert_eq!(header(&state).title, None);
        state.view_state = MessagesViewState::Online { is_empty: false };
        assert_eq!(header(&state).title.as_deref(), Some("Messages"));
        assert_eq!(header(&state).trailing[0].intent, MessagesIntent::TapSettings);
    }
}
