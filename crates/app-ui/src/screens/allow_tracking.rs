//! Tracking permission onboarding
//!
//! The last onboarding step. Asking for tracking permission finishes
//! onboarding whatever the answer: the app switches to its main view and
//! the onboarding pages are cleared from the navigator.

use app_platform::PermissionInteractor;
use app_state::{AppState, Reducer, Store};
use std::time::Duration;

use crate::navigation::{Destination, ScreenEffect};

/// Pause after the permission prompt closes, before leaving onboarding
pub const PROMPT_DISMISS_DELAY: Duration = Duration::from_millis(500);

/// Headline of the onboarding page
pub const HEADLINE: &str = "Security First: Your Safety Matters";

/// Text under the headline
pub const DESCRIPTION: &str = "We prioritize your security and believe in full transparency. \
Learn more about how we handle your data. By continuing, you confirm that you understand and \
accept our Terms of Service and Privacy Policy including EULA";

/// Label of the button that asks for permission
pub const CONTINUE: &str = "Continue";

/// Tracking onboarding state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowTrackingState {
    /// Whether onboarding was completed
    pub is_user_agreed_permissions: bool,
    /// Why completing onboarding failed, if it did
    pub error: Option<String>,
}

/// Tracking onboarding intents
#[derive(Debug, Clone, PartialEq)]
pub enum AllowTrackingIntent {
    /// Show the system tracking prompt
    ShowPermissions,
    /// Leave onboarding for the main view
    ToRootView,
    /// Onboarding was recorded
    OnboardingCompleted,
    /// Recording onboarding failed
    OnboardingFailed(String),
}

/// Tracking onboarding logic
pub struct AllowTrackingReducer {
    permissions: PermissionInteractor,
    app: AppState,
}

/// Running tracking onboarding
pub type AllowTrackingStore = Store<AllowTrackingReducer>;

impl AllowTrackingReducer {
    /// Create the reducer
    pub fn new(permissions: PermissionInteractor, app: AppState) -> Self {
        Self { permissions, app }
    }
}

impl Reducer for AllowTrackingReducer {
    type State = AllowTrackingState;
    type Intent = AllowTrackingIntent;
    type Destination = Destination;

    fn reduce(
        &self,
        state: &mut AllowTrackingState,
        intent: AllowTrackingIntent,
    ) -> ScreenEffect<AllowTrackingIntent> {
        match intent {
            AllowTrackingIntent::ShowPermissions => {
                let permissions = self.permissions.clone();
                ScreenEffect::task(async move {
                    let status = permissions.request_tracking().await;
                    tracing::info!(?status, "tracking prompt answered");
                    tokio::time::sleep(PROMPT_DISMISS_DELAY).await;
                    ScreenEffect::Intent(AllowTrackingIntent::ToRootView)
                })
            }

            AllowTrackingIntent::ToRootView => {
                state.error = None;
                let app = self.app.clone();
                ScreenEffect::task(async move {
                    match app.complete_onboarding() {
                        Ok(()) => ScreenEffect::Intent(AllowTrackingIntent::OnboardingCompleted),
                        Err(err) => {
                            tracing::error!(error = %err, "failed to persist onboarding flag");
                            ScreenEffect::Intent(AllowTrackingIntent::OnboardingFailed(
                                err.to_string(),
                            ))
                        }
                    }
                })
            }

            AllowTrackingIntent::OnboardingCompleted => {
                state.is_user_agreed_permissions = true;
                ScreenEffect::pop_to_root()
            }

            AllowTrackingIntent::OnboardingFailed(message) => {
                state.error = Some(message);
                ScreenEffect::None
            }
        }
    }
}
