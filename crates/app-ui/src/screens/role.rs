//! Role picker
//!
//! Shown when an empty calendar day is tapped. Picking a role creates a
//! fresh plan with that role's default checklist and opens it.

use app_core::{CalendarDay, Plan, Role};
use app_state::{Reducer, Store};

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

/// Role picker state
#[derive(Debug, Clone, PartialEq)]
pub struct RoleState {
    /// Day the new plan is for
    pub day: CalendarDay,
}

impl RoleState {
    /// State for `day`
    pub fn new(day: CalendarDay) -> Self {
        Self { day }
    }

    /// Roles offered, in display order
    pub fn roles(&self) -> &'static [Role] {
        &Role::ALL
    }
}

/// Role picker intents
#[derive(Debug, Clone, PartialEq)]
pub enum RoleIntent {
    /// A role was picked
    TapRole(Role),
    /// A plan was created for the picked role
    OpenPlan(Plan),
    /// Leave the picker
    Back,
}

/// Role picker logic
#[derive(Debug, Default)]
pub struct RoleReducer;

/// Running role picker
pub type RoleStore = Store<RoleReducer>;

impl Reducer for RoleReducer {
    type State = RoleState;
    type Intent = RoleIntent;
    type Destination = Destination;

    fn reduce(&self, state: &mut RoleState, intent: RoleIntent) -> ScreenEffect<RoleIntent> {
        match intent {
            RoleIntent::TapRole(role) => {
                let date = state.day.date;
                // Plan ids are random; keep their creation out of reduce.
                ScreenEffect::closure(move || RoleIntent::OpenPlan(Plan::for_role(role, date)))
            }
            RoleIntent::OpenPlan(plan) => {
                tracing::info!(plan_id = %plan.id, role = %plan.role, date = %plan.date, "plan created");
                ScreenEffect::push(Destination::ShootPlan(plan))
            }
            RoleIntent::Back => ScreenEffect::pop(),
        }
    }
}

/// Header of the role picker
pub fn header(state: &RoleState) -> ScreenHeader<RoleIntent> {
    ScreenHeader::new()
        .with_leading(HeaderButton::new(HeaderIcon::Back, RoleIntent::Back))
        .with_title(Destination::Role(state.day.clone()).title())
}
