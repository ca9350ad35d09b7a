//! Calendar screen
//!
//! Loads every plan so the month grid can mark planned days. Tapping a day
//! opens its plan, or the role picker when the day has none.

use app_core::{CalendarDay, Plan, PlanRepository};
use app_state::{Reducer, Store};
use std::sync::Arc;

use crate::components::ScreenHeader;
use crate::navigation::{Destination, ScreenEffect};

/// Calendar screen state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarState {
    /// Every stored plan
    pub plans: Vec<Plan>,
    /// Whether plans are being loaded
    pub is_loading: bool,
    /// Last load failure
    pub error: Option<String>,
}

/// Calendar screen intents
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarIntent {
    /// A day cell was tapped
    TapCalendar(CalendarDay),
    /// Load plans from the repository
    LoadPlans,
    /// Plans were loaded
    PlansLoaded(Vec<Plan>),
    /// Loading failed
    LoadFailed(String),
}

/// Calendar screen logic
pub struct CalendarReducer {
    plans: Arc<dyn PlanRepository>,
}

/// Running calendar screen
pub type CalendarStore = Store<CalendarReducer>;

impl CalendarReducer {
    /// Create the reducer
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }
}

impl Reducer for CalendarReducer {
    type State = CalendarState;
    type Intent = CalendarIntent;
    type Destination = Destination;

    fn reduce(&self, state: &mut CalendarState, intent: CalendarIntent) -> ScreenEffect<CalendarIntent> {
        match intent {
            CalendarIntent::TapCalendar(day) => match day.plan.clone() {
                Some(plan) => ScreenEffect::push(Destination::ShootPlan(plan)),
                None => ScreenEffect::push(Destination::Role(day)),
            },

            CalendarIntent::LoadPlans => {
                state.is_loading = true;
                let plans = Arc::clone(&self.plans);
                ScreenEffect::task(async move {
                    match plans.all_plans().await {
                        Ok(plans) => ScreenEffect::Intent(CalendarIntent::PlansLoaded(plans)),
                        Err(err) => {
                            tracing::error!(error = %err, "failed to load plans");
                            ScreenEffect::Intent(CalendarIntent::LoadFailed(err.to_string()))
                        }
                    }
                })
            }

            CalendarIntent::PlansLoaded(plans) => {
                state.plans = plans;
                state.is_loading = false;
                state.error = None;
                ScreenEffect::None
            }

            CalendarIntent::LoadFailed(message) => {
                state.is_loading = false;
                state.error = Some(message);
                ScreenEffect::None
            }
        }
    }
}

/// Header of the calendar screen
pub fn header(_state: &CalendarState) -> ScreenHeader<CalendarIntent> {
    ScreenHeader::new().with_title("Calendar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, day, plan, MockPlans};
    use app_core::{RepositoryError, Role};
    use app_state::{Effect, Navigator};
    use storage::ObjectStoreError;

    #[test]
    fn test_tap_day_with_plan_opens_plan() {
        let reducer = CalendarReducer::new(Arc::new(MockPlans::new()));
        let plan = plan(Role::Model);
        let cell = day(plan.date).with_plan(plan.clone());

        let mut state = CalendarState::default();
        assert_eq!(
            reducer.reduce(&mut state, CalendarIntent::TapCalendar(cell)),
            Effect::push(Destination::ShootPlan(plan))
        );
    }

    #[test]
    fn test_tap_empty_day_opens_role_picker() {
        let reducer = CalendarReducer::new(Arc::new(MockPlans::new()));
        let cell = day(date(2025, 9, 30));

        let mut state = CalendarState::default();
        assert_eq!(
            reducer.reduce(&mut state, CalendarIntent::TapCalendar(cell.clone())),
            Effect::push(Destination::Role(cell))
        );
    }

    #[tokio::test]
    async fn test_load_plans() {
        let stored = vec![plan(Role::Model), plan(Role::Photographer)];
        let returned = stored.clone();
        let mut plans = MockPlans::new();
        plans
            .expect_all_plans()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let store = Store::new(
            CalendarReducer::new(Arc::new(plans)),
            CalendarState::default(),
            Navigator::new(),
        );
        store.send_and_wait(CalendarIntent::LoadPlans).await.unwrap();
        assert!(store.state().is_loading);

        let state = store.wait_for(|state| !state.is_loading).await.unwrap();
        assert_eq!(state.plans, stored);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let mut plans = MockPlans::new();
        plans.expect_all_plans().returning(|| {
            Err(RepositoryError::Storage(ObjectStoreError::Serialization(
                serde_json::from_str::<u8>("x").unwrap_err(),
            )))
        });

        let store = Store::new(
            CalendarReducer::new(Arc::new(plans)),
            CalendarState::default(),
            Navigator::new(),
        );
        store.send(CalendarIntent::LoadPlans);
        let state = store.wait_for(|state| state.error.is_some()).await.unwrap();
        assert!(state.plans.is_empty());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_tap_pushes_onto_navigator() {
        let navigator = Navigator::new();
        let store = Store::new(
            CalendarReducer::new(Arc::new(MockPlans::new())),
            CalendarState::default(),
            navigator.clone(),
        );
        let cell = day(date(2025, 9, 30));
        store
            .send_and_wait(CalendarIntent::TapCalendar(cell.clone()))
            .await
            .unwrap();
        assert_eq!(navigator.path(), vec![Destination::Role(cell)]);
    }
}
