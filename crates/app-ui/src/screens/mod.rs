//! Application screens
//!
//! Each screen is a [`Store`](app_state::Store) over its own reducer. The
//! [`ScreenFactory`] builds them: the four root tabs directly, everything
//! else from the [`Destination`] the navigator is showing.

pub mod allow_tracking;
pub mod calendar;
pub mod date_picker;
pub mod info;
pub mod messages;
pub mod pose_library;
pub mod poses;
pub mod role;
pub mod shoot_plan;

use app_core::PlanRepository;
use app_platform::PermissionInteractor;
use app_state::{AppState, Store, StoreConfig};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

use crate::navigation::{AppNavigator, Destination};

use allow_tracking::{AllowTrackingReducer, AllowTrackingState, AllowTrackingStore};
use calendar::{CalendarReducer, CalendarState, CalendarStore};
use date_picker::{DatePickerIntent, DatePickerReducer, DatePickerState, DatePickerStore};
use info::{
    NotificationAuthorizationReducer, NotificationAuthorizationStore, SettingsReducer,
    SettingsStore,
};
use messages::{MessagesReducer, MessagesState, MessagesStore, Presence};
use pose_library::{PoseLibraryReducer, PoseLibraryState, PoseLibraryStore};
use poses::{PosesReducer, PosesState, PosesStore};
use role::{RoleReducer, RoleState, RoleStore};
use shoot_plan::{ShootPlanReducer, ShootPlanState, ShootPlanStore};

/// Shared collaborators handed to every screen
#[derive(Clone)]
pub struct ScreenContext {
    /// The one navigator of the app
    pub navigator: AppNavigator,
    /// Plan persistence
    pub plans: Arc<dyn PlanRepository>,
    /// Permission prompts
    pub permissions: PermissionInteractor,
    /// App-level flags
    pub app: AppState,
    /// Online user source for the messages tab
    pub presence: Arc<dyn Presence>,
    /// Store settings shared by every screen; the name is set per screen
    pub store_config: StoreConfig,
}

impl fmt::Debug for ScreenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenContext")
            .field("navigation", &self.navigator.snapshot())
            .field("permissions", &self.permissions)
            .field("app", &self.app)
            .field("store_config", &self.store_config)
            .finish_non_exhaustive()
    }
}

/// A running screen built for a destination
pub enum Screen {
    /// Tracking onboarding
    AllowTracking(AllowTrackingStore),
    /// Notification onboarding
    NotificationAuthorization(NotificationAuthorizationStore),
    /// Role picker
    Role(RoleStore),
    /// Plan checklist
    ShootPlan(ShootPlanStore),
    /// Pose photo pager
    PoseLibrary(PoseLibraryStore),
    /// Settings modal
    Settings(SettingsStore),
}

impl Screen {
    /// Short name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Screen::AllowTracking(_) => "allow_tracking",
            Screen::NotificationAuthorization(_) => "notification_authorization",
            Screen::Role(_) => "role",
            Screen::ShootPlan(_) => "shoot_plan",
            Screen::PoseLibrary(_) => "pose_library",
            Screen::Settings(_) => "settings",
        }
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Screen").field(&self.name()).finish()
    }
}

/// Builds screen stores wired to the shared collaborators
///
/// Every method spawns a store, so it must run inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct ScreenFactory {
    context: ScreenContext,
}

impl ScreenFactory {
    /// Create a factory
    pub fn new(context: ScreenContext) -> Self {
        Self { context }
    }

    /// The shared collaborators
    pub fn context(&self) -> &ScreenContext {
        &self.context
    }

    /// The shared navigator
    pub fn navigator(&self) -> &AppNavigator {
        &self.context.navigator
    }

    fn config(&self, name: &'static str) -> StoreConfig {
        StoreConfig {
            name,
            ..self.context.store_config.clone()
        }
    }

    /// Build the screen for `destination`
    pub fn build(&self, destination: &Destination) -> Screen {
        tracing::debug!(?destination, "building screen");
        let navigator = self.context.navigator.clone();
        match destination {
            Destination::AllowTracking => Screen::AllowTracking(Store::with_config(
                AllowTrackingReducer::new(self.context.permissions.clone(), self.context.app.clone()),
                AllowTrackingState::default(),
                navigator,
                self.config("allow_tracking"),
            )),
            Destination::NotificationAuthorization => {
                Screen::NotificationAuthorization(Store::with_config(
                    NotificationAuthorizationReducer,
                    (),
                    navigator,
                    self.config("notification_authorization"),
                ))
            }
            Destination::Role(day) => Screen::Role(Store::with_config(
                RoleReducer,
                RoleState::new(day.clone()),
                navigator,
                self.config("role"),
            )),
            Destination::ShootPlan(plan) => Screen::ShootPlan(Store::with_config(
                ShootPlanReducer::new(Arc::clone(&self.context.plans)),
                ShootPlanState::new(plan.clone()),
                navigator,
                self.config("shoot_plan"),
            )),
            Destination::PoseLibrary(pose) => Screen::PoseLibrary(Store::with_config(
                PoseLibraryReducer,
                PoseLibraryState::new(*pose),
                navigator,
                self.config("pose_library"),
            )),
            Destination::Settings => Screen::Settings(Store::with_config(
                SettingsReducer,
                (),
                navigator,
                self.config("settings"),
            )),
        }
    }

    /// Build the screen for whatever the navigator currently shows
    ///
    /// The modal wins over the stack. `None` means a root tab is showing.
    pub fn build_current(&self) -> Option<Screen> {
        let destination = self
            .context
            .navigator
            .modal()
            .or_else(|| self.context.navigator.current())?;
        Some(self.build(&destination))
    }

    /// Calendar tab
    pub fn calendar(&self) -> CalendarStore {
        Store::with_config(
            CalendarReducer::new(Arc::clone(&self.context.plans)),
            CalendarState::default(),
            self.context.navigator.clone(),
            self.config("calendar"),
        )
    }

    /// Date picker of the calendar tab, opened on the month of `today`
    ///
    /// The grid is generated right away.
    pub fn date_picker(&self, today: NaiveDate) -> DatePickerStore {
        let store = Store::with_config(
            DatePickerReducer,
            DatePickerState::new(today),
            self.context.navigator.clone(),
            self.config("date_picker"),
        );
        store.send(DatePickerIntent::GenerateCalendar);
        store
    }

    /// Messages tab
    pub fn messages(&self) -> MessagesStore {
        Store::with_config(
            MessagesReducer::new(
                self.context.permissions.clone(),
                Arc::clone(&self.context.presence),
            ),
            MessagesState::default(),
            self.context.navigator.clone(),
            self.config("messages"),
        )
    }

    /// Poses tab
    pub fn poses(&self) -> PosesStore {
        Store::with_config(
            PosesReducer,
            PosesState::default(),
            self.context.navigator.clone(),
            self.config("poses"),
        )
    }
}
