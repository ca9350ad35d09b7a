//! Navigation destinations for Lynz
//!
//! Every screen that can be pushed or presented is a [`Destination`]. The
//! shared [`AppNavigator`] holds destinations; the
//! [`ScreenFactory`](crate::screens::ScreenFactory) turns them into running
//! screens.

use app_core::{CalendarDay, Plan, Pose};
use app_state::{Effect, Navigator};
use serde::{Deserialize, Serialize};

/// Navigator over the app's destinations
pub type AppNavigator = Navigator<Destination>;

/// Effect type returned by every screen reducer
pub type ScreenEffect<I> = Effect<I, Destination>;

/// All pushable or presentable screens
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params", rename_all = "snake_case")]
pub enum Destination {
    /// Tracking permission onboarding
    AllowTracking,
    /// Notification permission onboarding
    NotificationAuthorization,
    /// Role picker for a calendar day without a plan
    Role(CalendarDay),
    /// Checklist of a plan
    ShootPlan(Plan),
    /// Photos of one pose category
    PoseLibrary(Pose),
    /// App settings (presented modally)
    Settings,
}

impl Destination {
    /// Get a display title for this destination
    pub fn title(&self) -> &'static str {
        match self {
            Destination::AllowTracking => "Allow Tracking",
            Destination::NotificationAuthorization => "Security First",
            Destination::Role(_) => "Choose your role",
            Destination::ShootPlan(_) => "Shoot Plan",
            Destination::PoseLibrary(pose) => pose.title(),
            Destination::Settings => "Settings",
        }
    }

    /// Check whether the destination is shown in the modal slot
    pub fn is_modal(&self) -> bool {
        matches!(self, Destination::Settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::Role;
    use chrono::NaiveDate;

    fn day() -> CalendarDay {
        CalendarDay::new(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(), true)
    }

    #[test]
    fn test_titles() {
        assert_eq!(Destination::Role(day()).title(), "Choose your role");
        assert_eq!(
            Destination::ShootPlan(Plan::for_role(Role::Model, day().date)).title(),
            "Shoot Plan"
        );
        assert_eq!(Destination::PoseLibrary(Pose::CloseUp).title(), "Close-Up");
        assert!(Destination::Settings.is_modal());
        assert!(!Destination::AllowTracking.is_modal());
    }

    #[test]
    fn test_navigator_with_destinations() {
        let navigator = AppNavigator::new();
        navigator.push(Destination::Role(day()));
        navigator.present_modal(Destination::Settings);
        assert_eq!(navigator.current(), Some(Destination::Role(day())));
        assert_eq!(navigator.modal(), Some(Destination::Settings));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(Destination::PoseLibrary(Pose::Sitting)).unwrap();
        assert_eq!(json["screen"], "pose_library");
        assert_eq!(json["params"], "sitting");
    }
}
