//! End-to-end app flows
//!
//! Every screen is built through the `ScreenFactory` of a real
//! `Dependencies` container over throwaway storage.

use app_core::{PlanRepository, Role};
use app_state::AppViewState;
use app_ui::screens::allow_tracking::AllowTrackingIntent;
use app_ui::screens::calendar::CalendarIntent;
use app_ui::screens::info::{NotificationAuthorizationIntent, SettingsIntent};
use app_ui::screens::messages::MessagesIntent;
use app_ui::screens::role::RoleIntent;
use app_ui::screens::shoot_plan::ShootPlanIntent;
use app_ui::{Destination, Screen};
use chrono::NaiveDate;
use lynz::{Dependencies, LynzConfig};

fn deps() -> Dependencies {
    Dependencies::build(&LynzConfig::ephemeral()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Settings opened from a tab and closed again leaves navigation empty
#[tokio::test]
async fn test_settings_modal_round_trip() {
    let deps = deps();
    let messages = deps.screens().messages();

    messages.send_and_wait(MessagesIntent::TapSettings).await.unwrap();
    assert_eq!(deps.navigator().modal(), Some(Destination::Settings));

    let Some(Screen::Settings(settings)) = deps.screens().build_current() else {
        panic!("settings modal should be showing");
    };
    settings.send_and_wait(SettingsIntent::Close).await.unwrap();

    assert!(deps.navigator().path().is_empty());
    assert_eq!(deps.navigator().modal(), None);
}

/// Onboarding walks both permission pages and lands on the tabs
#[tokio::test(start_paused = true)]
async fn test_onboarding_flow() {
    let deps = deps();
    let start = deps.start_destination().unwrap();
    deps.navigator().push(start.clone());

    let Screen::NotificationAuthorization(notifications) = deps.screens().build(&start) else {
        panic!("onboarding should start on the notification page");
    };
    notifications
        .send_and_wait(NotificationAuthorizationIntent::Continue)
        .await
        .unwrap();
    assert_eq!(deps.navigator().current(), Some(Destination::AllowTracking));

    let Some(Screen::AllowTracking(tracking)) = deps.screens().build_current() else {
        panic!("tracking page should be showing");
    };
    tracking.send(AllowTrackingIntent::ShowPermissions);

    let mut app = deps.app().subscribe();
    app.wait_for(|snapshot| snapshot.view == AppViewState::Main)
        .await
        .unwrap();
    assert!(deps.app().onboarding_shown());
    assert_eq!(deps.start_destination(), None);

    let mut nav = deps.navigator().subscribe();
    nav.wait_for(|nav| nav.depth() == 0).await.unwrap();
    assert!(deps.screens().build_current().is_none());
    assert!(tracking.state().is_user_agreed_permissions);
}

/// Planning a shoot: empty day, pick a role, check a task, save
#[tokio::test]
async fn test_plan_a_shoot() {
    let deps = deps();
    let calendar = deps.screens().calendar();
    let picker = deps.screens().date_picker(date(2025, 9, 18));

    let grid = picker
        .wait_for(|state| !state.calendar_days.is_empty())
        .await
        .unwrap()
        .calendar_days;
    let day = grid
        .into_iter()
        .find(|day| day.date == date(2025, 9, 30))
        .unwrap();
    assert!(day.plan.is_none());

    calendar
        .send_and_wait(CalendarIntent::TapCalendar(day.clone()))
        .await
        .unwrap();
    assert_eq!(deps.navigator().current(), Some(Destination::Role(day)));

    let Some(Screen::Role(role)) = deps.screens().build_current() else {
        panic!("role picker should be showing");
    };
    role.send(RoleIntent::TapRole(Role::Photographer));

    let mut nav = deps.navigator().subscribe();
    nav.wait_for(|nav| nav.depth() == 2).await.unwrap();

    let Some(Screen::ShootPlan(shoot_plan)) = deps.screens().build_current() else {
        panic!("shoot plan should be showing");
    };
    shoot_plan
        .send_and_wait(ShootPlanIntent::SelectTask(0))
        .await
        .unwrap();
    shoot_plan
        .send_and_wait(ShootPlanIntent::TapActionButton)
        .await
        .unwrap();

    nav.wait_for(|nav| nav.depth() == 0).await.unwrap();

    calendar.send(CalendarIntent::LoadPlans);
    let state = calendar
        .wait_for(|state| !state.is_loading && !state.plans.is_empty())
        .await
        .unwrap();
    let saved = &state.plans[0];
    assert_eq!(saved.role, Role::Photographer);
    assert_eq!(saved.date, date(2025, 9, 30));
    assert_eq!(saved.completed_count(), 1);
}

/// Deleting a plan from edit mode removes it and returns to the calendar
#[tokio::test]
async fn test_delete_plan_from_edit_mode() {
    let deps = deps();
    let plan = app_core::Plan::for_role(Role::Model, date(2025, 10, 2));
    deps.plans().save_plan(&plan).await.unwrap();

    deps.navigator().push(Destination::ShootPlan(plan.clone()));
    let Some(Screen::ShootPlan(shoot_plan)) = deps.screens().build_current() else {
        panic!("shoot plan should be showing");
    };

    shoot_plan
        .send_and_wait(ShootPlanIntent::ToggleEditingMode)
        .await
        .unwrap();
    shoot_plan
        .send_and_wait(ShootPlanIntent::TapActionButton)
        .await
        .unwrap();
    assert!(shoot_plan.state().is_show_confirmation_dialog);

    shoot_plan.send(ShootPlanIntent::ConfirmPlanDelete);
    let mut nav = deps.navigator().subscribe();
    nav.wait_for(|nav| nav.depth() == 0).await.unwrap();

    assert!(deps.plans().all_plans().await.unwrap().is_empty());
}

/// Deleting a plan that was never saved still returns to the calendar
#[tokio::test]
async fn test_delete_unsaved_plan() {
    let deps = deps();
    let day = app_core::CalendarDay::new(date(2025, 10, 4), true);
    deps.navigator().push(Destination::Role(day));

    let Some(Screen::Role(role)) = deps.screens().build_current() else {
        panic!("role picker should be showing");
    };
    role.send(RoleIntent::TapRole(Role::Model));
    let mut nav = deps.navigator().subscribe();
    nav.wait_for(|nav| nav.depth() == 2).await.unwrap();

    let Some(Screen::ShootPlan(shoot_plan)) = deps.screens().build_current() else {
        panic!("shoot plan should be showing");
    };
    shoot_plan
        .send_and_wait(ShootPlanIntent::ToggleEditingMode)
        .await
        .unwrap();
    shoot_plan.send(ShootPlanIntent::ConfirmPlanDelete);

    nav.wait_for(|nav| nav.depth() == 0).await.unwrap();
    assert!(deps.screens().build_current().is_none());
    assert!(deps.plans().all_plans().await.unwrap().is_empty());
}

/// A store torn down mid-request never touches the navigator again
#[tokio::test(start_paused = true)]
async fn test_torn_down_screen_is_inert() {
    let deps = deps();
    let messages = deps.screens().messages();

    messages.send_and_wait(MessagesIntent::Connect).await.unwrap();
    messages.shutdown().await;
    assert!(messages.is_closed());

    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert!(messages.state().is_loading);
    assert_eq!(deps.navigator().depth(), 0);
}
