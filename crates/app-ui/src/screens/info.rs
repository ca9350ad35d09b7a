//! Static screens: settings and the notification onboarding page
//!
//! These have no state of their own. Their buttons only drive the navigator.

use app_state::{Reducer, Store};

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

// =============================================================================
// Settings
// =============================================================================

/// One row of the settings list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsItem {
    /// Row label
    pub title: &'static str,
    /// Icon asset name
    pub icon: &'static str,
}

/// Rows of the settings list, in display order
pub const SETTINGS_ITEMS: [SettingsItem; 5] = [
    SettingsItem { title: "Contact Us", icon: "phone.fill" },
    SettingsItem { title: "Privacy Policy", icon: "checkmark.shield.fill" },
    SettingsItem { title: "Terms of use", icon: "text.book.closed.fill" },
    SettingsItem { title: "Privacy Settings", icon: "lock.shield.fill" },
    SettingsItem { title: "Permission Settings", icon: "lock.doc.fill" },
];

/// Settings intents
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsIntent {
    /// A row was tapped
    TapItem(usize),
    /// Close the settings modal
    Close,
}

/// Settings logic
#[derive(Debug, Default)]
pub struct SettingsReducer;

/// Running settings modal
pub type SettingsStore = Store<SettingsReducer>;

impl Reducer for SettingsReducer {
    type State = ();
    type Intent = SettingsIntent;
    type Destination = Destination;

    fn reduce(&self, _state: &mut (), intent: SettingsIntent) -> ScreenEffect<SettingsIntent> {
        match intent {
            SettingsIntent::TapItem(index) => {
                match SETTINGS_ITEMS.get(index) {
                    Some(item) => tracing::debug!(item = item.title, "settings item tapped"),
                    None => tracing::warn!(index, "settings item out of range"),
                }
                ScreenEffect::None
            }
            SettingsIntent::Close => ScreenEffect::dismiss_modal(),
        }
    }
}

/// Header of the settings modal
pub fn settings_header() -> ScreenHeader<SettingsIntent> {
    ScreenHeader::new()
        .with_title(Destination::Settings.title())
        .with_trailing(HeaderButton::new(HeaderIcon::Close, SettingsIntent::Close))
}

// =============================================================================
// Notification onboarding
// =============================================================================

/// Headline of the notification onboarding page
pub const NOTIFICATION_HEADLINE: &str = "Security First: Your Safety Matters";

/// Text under the headline
pub const NOTIFICATION_DESCRIPTION: &str = "We prioritize your security and believe in full \
transparency. Learn more about how we handle your data. By continuing, you confirm that you \
understand and accept our Terms of Service and Privacy Policy including EULA";

/// Notification onboarding intents
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationAuthorizationIntent {
    /// Go on to the tracking page
    Continue,
}

/// Notification onboarding logic
#[derive(Debug, Default)]
pub struct NotificationAuthorizationReducer;

/// Running notification onboarding page
pub type NotificationAuthorizationStore = Store<NotificationAuthorizationReducer>;

impl Reducer for NotificationAuthorizationReducer {
    type State = ();
    type Intent = NotificationAuthorizationIntent;
    type Destination = Destination;

    fn reduce(
        &self,
        _state: &mut (),
        intent: NotificationAuthorizationIntent,
    ) -> ScreenEffect<NotificationAuthorizationIntent> {
        match intent {
            NotificationAuthorizationIntent::Continue => {
                ScreenEffect::push(Destination::AllowTracking)
            }
        }
    }
}
