//! Shoot plan screen
//!
//! Shows the checklist of one plan. In normal mode tasks can be checked off
//! and the plan saved; in edit mode tasks can be renamed, added or removed,
//! and the action button deletes the whole plan.

use app_core::plans::NEW_TASK_NAME;
use app_core::{Plan, PlanRepository, RepositoryError, TaskCategory};
use app_state::{Reducer, Store};
use std::sync::Arc;

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

/// Question shown in the delete confirmation dialog
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete the plan for this day?";

/// Shoot plan screen state
#[derive(Debug, Clone, PartialEq)]
pub struct ShootPlanState {
    /// The plan being edited
    pub plan: Plan,
    /// Whether edit mode is on
    pub edit_mode: bool,
    /// Whether the delete confirmation dialog is showing
    pub is_show_confirmation_dialog: bool,
    /// Task whose text field has focus
    pub focused_index: Option<usize>,
    /// Last save/delete failure, shown until dismissed
    pub error: Option<String>,
}

impl ShootPlanState {
    /// Initial state for `plan`
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            edit_mode: false,
            is_show_confirmation_dialog: false,
            focused_index: None,
            error: None,
        }
    }

    /// Title of the bottom action button
    pub fn action_button_title(&self) -> &'static str {
        if self.edit_mode {
            "Delete Plan"
        } else {
            "Done"
        }
    }
}

/// Shoot plan screen intents
#[derive(Debug, Clone, PartialEq)]
pub enum ShootPlanIntent {
    /// Toggle the checked state of a task
    SelectTask(usize),
    /// Rename a task
    UpdateText(usize, String),
    /// Enter or leave edit mode
    ToggleEditingMode,
    /// Bottom action button: delete in edit mode, save otherwise
    TapActionButton,
    /// Append a new task and focus it
    AddTask,
    /// Drop text field focus
    EndTaskCreate,
    /// Persist the plan and return to the calendar
    SavePlan,
    /// Saving failed
    SaveFailed(String),
    /// Remove a task
    DeleteItem(usize),
    /// Show or hide the delete confirmation dialog
    ShowDialog(bool),
    /// Delete the plan after confirmation
    ConfirmPlanDelete,
    /// Keep the plan
    CancelPlanDelete,
    /// Deleting failed
    DeleteFailed(String),
    /// Clear the error banner
    DismissError,
    /// Leave the screen without saving
    Back,
    /// Leave every pushed screen and show the calendar
    ReturnToCalendar,
}

/// Shoot plan screen logic
pub struct ShootPlanReducer {
    plans: Arc<dyn PlanRepository>,
}

/// Running shoot plan screen
pub type ShootPlanStore = Store<ShootPlanReducer>;

impl ShootPlanReducer {
    /// Create the reducer
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    fn save(&self, plan: Plan) -> ScreenEffect<ShootPlanIntent> {
        let plans = Arc::clone(&self.plans);
        ScreenEffect::task(async move {
            match plans.save_plan(&plan).await {
                Ok(()) => ScreenEffect::pop_to_root(),
                Err(err) => {
                    tracing::error!(plan_id = %plan.id, error = %err, "failed to save plan");
                    ScreenEffect::Intent(ShootPlanIntent::SaveFailed(err.to_string()))
                }
            }
        })
    }

    fn delete(&self, plan: &Plan) -> ScreenEffect<ShootPlanIntent> {
        let plans = Arc::clone(&self.plans);
        let id = plan.id;
        ScreenEffect::task(async move {
            match plans.delete_plan(id).await {
                Ok(()) => ScreenEffect::pop_to_root(),
                Err(err @ RepositoryError::PlanNotFound(_)) => {
                    tracing::warn!(plan_id = %id, "plan was never saved; returning to calendar");
                    ScreenEffect::Sequence(vec![
                        ShootPlanIntent::DeleteFailed(err.to_string()),
                        ShootPlanIntent::ReturnToCalendar,
                    ])
                }
                Err(err) => {
                    tracing::error!(plan_id = %id, error = %err, "failed to delete plan");
                    ScreenEffect::Intent(ShootPlanIntent::DeleteFailed(err.to_string()))
                }
            }
        })
    }
}

fn task_mut<'a>(
    tasks: &'a mut [TaskCategory],
    index: usize,
    intent: &str,
) -> Option<&'a mut TaskCategory> {
    let count = tasks.len();
    let task = tasks.get_mut(index);
    if task.is_none() {
        tracing::warn!(index, count, intent, "stale task index; ignoring");
    }
    task
}

impl Reducer for ShootPlanReducer {
    type State = ShootPlanState;
    type Intent = ShootPlanIntent;
    type Destination = Destination;

    fn reduce(
        &self,
        state: &mut ShootPlanState,
        intent: ShootPlanIntent,
    ) -> ScreenEffect<ShootPlanIntent> {
        match intent {
            ShootPlanIntent::SelectTask(index) => {
                if let Some(task) = task_mut(&mut state.plan.tasks, index, "select_task") {
                    task.toggle();
                }
            }

            ShootPlanIntent::UpdateText(index, text) => {
                if let Some(task) = task_mut(&mut state.plan.tasks, index, "update_text") {
                    task.name = text;
                }
            }

            ShootPlanIntent::ToggleEditingMode => {
                state.edit_mode = !state.edit_mode;
                state.focused_index = None;
                return ScreenEffect::Intent(ShootPlanIntent::EndTaskCreate);
            }

            ShootPlanIntent::TapActionButton => {
                return if state.edit_mode {
                    ScreenEffect::Intent(ShootPlanIntent::ShowDialog(true))
                } else {
                    ScreenEffect::Intent(ShootPlanIntent::SavePlan)
                };
            }

            ShootPlanIntent::AddTask => {
                state.plan.tasks.push(TaskCategory::new(NEW_TASK_NAME));
                state.focused_index = Some(state.plan.tasks.len() - 1);
            }

            ShootPlanIntent::EndTaskCreate => {
                state.focused_index = None;
            }

            ShootPlanIntent::SavePlan => {
                state.error = None;
                return self.save(state.plan.clone());
            }

            ShootPlanIntent::SaveFailed(message) | ShootPlanIntent::DeleteFailed(message) => {
                state.error = Some(message);
            }

            ShootPlanIntent::DeleteItem(index) => {
                if index < state.plan.tasks.len() {
                    state.plan.tasks.remove(index);
                    state.focused_index = match state.focused_index {
                        Some(focused) if focused == index => None,
                        Some(focused) if focused > index => Some(focused - 1),
                        other => other,
                    };
                } else {
                    tracing::warn!(index, count = state.plan.tasks.len(), "stale delete index; ignoring");
                }
            }

            ShootPlanIntent::ShowDialog(show) => {
                state.is_show_confirmation_dialog = show;
            }

            ShootPlanIntent::ConfirmPlanDelete => {
                state.is_show_confirmation_dialog = false;
                return self.delete(&state.plan);
            }

            ShootPlanIntent::CancelPlanDelete => {
                state.is_show_confirmation_dialog = false;
            }

            ShootPlanIntent::DismissError => {
                state.error = None;
            }

            ShootPlanIntent::Back => return ScreenEffect::pop(),

            ShootPlanIntent::ReturnToCalendar => return ScreenEffect::pop_to_root(),
        }

        ScreenEffect::None
    }
}

/// Header of the shoot plan screen
pub fn header(state: &ShootPlanState) -> ScreenHeader<ShootPlanIntent> {
    ScreenHeader::new()
        .with_leading(HeaderButton::new(HeaderIcon::Back, ShootPlanIntent::Back))
        .with_title("Shoot Plan")
        .with_trailing(
            HeaderButton::new(HeaderIcon::Pencil, ShootPlanIntent::ToggleEditingMode)
                .active(state.edit_mode),
        )
        .with_trailing(
            HeaderButton::new(HeaderIcon::Plus, ShootPlanIntent::AddTask).disabled(state.edit_mode),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{plan, MockPlans};
    use app_core::Role;
    use storage::{KvError, ObjectStoreError};
    use app_state::{Effect, Navigator};

    fn reducer() -> ShootPlanReducer {
        ShootPlanReducer::new(Arc::new(MockPlans::new()))
    }

    fn empty_state() -> ShootPlanState {
        let mut plan = plan(Role::Photographer);
        plan.tasks.clear();
        ShootPlanState::new(plan)
    }

    #[test]
    fn test_add_task_on_empty_plan() {
        let mut state = empty_state();
        let effect = reducer().reduce(&mut state, ShootPlanIntent::AddTask);

        assert!(effect.is_none());
        assert_eq!(state.plan.tasks, vec![TaskCategory::new("New Task")]);
        assert_eq!(state.focused_index, Some(0));
    }

    #[test]
    fn test_toggle_editing_mode_chains_end_task_create() {
        let mut state = empty_state();
        state.focused_index = Some(0);
        let effect = reducer().reduce(&mut state, ShootPlanIntent::ToggleEditingMode);

        assert!(state.edit_mode);
        assert_eq!(effect, Effect::Intent(ShootPlanIntent::EndTaskCreate));
    }

    #[test]
    fn test_reduce_is_deterministic() {
        let reducer = reducer();
        let start = ShootPlanState::new(plan(Role::Model));
        let intents = [
            ShootPlanIntent::SelectTask(2),
            ShootPlanIntent::UpdateText(0, "Steam the dress".into()),
            ShootPlanIntent::DeleteItem(1),
            ShootPlanIntent::ShowDialog(true),
        ];
        for intent in intents {
            let mut a = start.clone();
            let mut b = start.clone();
            let effect_a = reducer.reduce(&mut a, intent.clone());
            let effect_b = reducer.reduce(&mut b, intent);
            assert_eq!(a, b);
            assert_eq!(effect_a, effect_b);
        }
    }

    #[test]
    fn test_stale_indices_are_ignored() {
        let reducer = reducer();
        let mut state = ShootPlanState::new(plan(Role::Model));
        let before = state.clone();

        reducer.reduce(&mut state, ShootPlanIntent::SelectTask(99));
        reducer.reduce(&mut state, ShootPlanIntent::UpdateText(99, "x".into()));
        reducer.reduce(&mut state, ShootPlanIntent::DeleteItem(99));
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_and_rename_task() {
        let reducer = reducer();
        let mut state = ShootPlanState::new(plan(Role::Model));
        reducer.reduce(&mut state, ShootPlanIntent::SelectTask(0));
        reducer.reduce(&mut state, ShootPlanIntent::UpdateText(1, "Pack heels".into()));

        assert!(state.plan.tasks[0].is_active);
        assert_eq!(state.plan.tasks[1].name, "Pack heels");
    }

    #[test]
    fn test_delete_item_shifts_focus() {
        let reducer = reducer();
        let mut state = ShootPlanState::new(plan(Role::Model));
        state.focused_index = Some(3);
        reducer.reduce(&mut state, ShootPlanIntent::DeleteItem(1));
        assert_eq!(state.plan.tasks.len(), 7);
        assert_eq!(state.focused_index, Some(2));

        reducer.reduce(&mut state, ShootPlanIntent::DeleteItem(2));
        assert_eq!(state.focused_index, None);
    }

    #[test]
    fn test_action_button_depends_on_mode() {
        let reducer = reducer();
        let mut state = ShootPlanState::new(plan(Role::Model));
        assert_eq!(state.action_button_title(), "Done");
        assert_eq!(
            reducer.reduce(&mut state, ShootPlanIntent::TapActionButton),
            Effect::Intent(ShootPlanIntent::SavePlan)
        );

        state.edit_mode = true;
        assert_eq!(state.action_button_title(), "Delete Plan");
        assert_eq!(
            reducer.reduce(&mut state, ShootPlanIntent::TapActionButton),
            Effect::Intent(ShootPlanIntent::ShowDialog(true))
        );
    }

    #[test]
    fn test_cancel_plan_delete_closes_dialog() {
        let mut state = ShootPlanState::new(plan(Role::Model));
        state.is_show_confirmation_dialog = true;
        let effect = reducer().reduce(&mut state, ShootPlanIntent::CancelPlanDelete);
        assert!(!state.is_show_confirmation_dialog);
        assert!(effect.is_none());
    }

    #[test]
    fn test_header_reflects_edit_mode() {
        let mut state = ShootPlanState::new(plan(Role::Model));
        let idle = header(&state);
        assert!(!idle.trailing[0].is_active);
        assert_eq!(idle.trailing[1].tap(), Some(ShootPlanIntent::AddTask));

        state.edit_mode = true;
        let editing = header(&state);
        assert!(editing.trailing[0].is_active);
        assert_eq!(editing.trailing[1].tap(), None);
    }

    #[tokio::test]
    async fn test_toggle_editing_mode_clears_focus_in_store() {
        let store = Store::new(reducer(), empty_state(), Navigator::new());
        store.send_and_wait(ShootPlanIntent::AddTask).await.unwrap();
        assert_eq!(store.state().focused_index, Some(0));

        store
            .send_and_wait(ShootPlanIntent::ToggleEditingMode)
            .await
            .unwrap();
        let state = store.state();
        assert!(state.edit_mode);
        assert_eq!(state.focused_index, None);
    }

    #[tokio::test]
    async fn test_save_plan_pops_to_root() {
        let mut plans = MockPlans::new();
        plans.expect_save_plan().times(1).returning(|_| Ok(()));

        let navigator = Navigator::new();
        let state = ShootPlanState::new(plan(Role::Model));
        navigator.push(Destination::Role(crate::test_support::day(state.plan.date)));
        navigator.push(Destination::ShootPlan(state.plan.clone()));

        let store = Store::new(ShootPlanReducer::new(Arc::new(plans)), state, navigator.clone());
        store.send(ShootPlanIntent::TapActionButton);

        let mut nav = navigator.subscribe();
        nav.wait_for(|nav| nav.depth() == 0).await.unwrap();
        assert_eq!(store.state().error, None);
    }

    #[tokio::test]
    async fn test_save_failure_sets_error() {
        let mut plans = MockPlans::new();
        plans.expect_save_plan().returning(|plan| {
            Err(RepositoryError::PlanNotFound(plan.id))
        });

        let navigator = Navigator::new();
        navigator.push(Destination::Settings);
        let store = Store::new(
            ShootPlanReducer::new(Arc::new(plans)),
            ShootPlanState::new(plan(Role::Model)),
            navigator.clone(),
        );

        store.send(ShootPlanIntent::SavePlan);
        let state = store.wait_for(|state| state.error.is_some()).await.unwrap();
        assert!(state.error.unwrap().starts_with("Plan not found"));
        assert_eq!(navigator.depth(), 1);

        store.send_and_wait(ShootPlanIntent::DismissError).await.unwrap();
        assert_eq!(store.state().error, None);
    }

    #[tokio::test]
    async fn test_confirm_delete_with_failing_repository() {
        let mut plans = MockPlans::new();
        plans.expect_delete_plan().times(1).returning(|_| {
            Err(RepositoryError::Storage(ObjectStoreError::Kv(
                KvError::InvalidKey("disk full".into()),
            )))
        });

        let navigator = Navigator::new();
        let state = ShootPlanState::new(plan(Role::Photographer));
        navigator.push(Destination::ShootPlan(state.plan.clone()));
        let store = Store::new(ShootPlanReducer::new(Arc::new(plans)), state, navigator.clone());

        store
            .send_and_wait(ShootPlanIntent::ShowDialog(true))
            .await
            .unwrap();
        assert!(store.state().is_show_confirmation_dialog);

        store
            .send_and_wait(ShootPlanIntent::ConfirmPlanDelete)
            .await
            .unwrap();
        assert!(!store.state().is_show_confirmation_dialog);

        let state = store.wait_for(|state| state.error.is_some()).await.unwrap();
        assert!(!state.is_show_confirmation_dialog);
        assert!(state.error.unwrap().contains("disk full"));
        assert_eq!(navigator.depth(), 1);
        assert!(!store.is_closed());
    }

    #[tokio::test]
    async fn test_delete_unsaved_plan_pops_to_root() {
        let mut plans = MockPlans::new();
        plans
            .expect_delete_plan()
            .times(1)
            .returning(|id| Err(RepositoryError::PlanNotFound(id)));

        let navigator = Navigator::new();
        let state = ShootPlanState::new(plan(Role::Model));
        navigator.push(Destination::Role(crate::test_support::day(state.plan.date)));
        navigator.push(Destination::ShootPlan(state.plan.clone()));
        let store = Store::new(ShootPlanReducer::new(Arc::new(plans)), state, navigator.clone());

        store
            .send_and_wait(ShootPlanIntent::ConfirmPlanDelete)
            .await
            .unwrap();
        assert!(!store.state().is_show_confirmation_dialog);

        navigator
            .subscribe()
            .wait_for(|nav| nav.depth() == 0)
            .await
            .unwrap();
        let state = store.wait_for(|state| state.error.is_some()).await.unwrap();
        assert!(state.error.unwrap().starts_with("Plan not found"));
        assert!(!store.is_closed());
    }

    #[tokio::test]
    async fn test_confirm_delete_pops_to_root() {
        let mut plans = MockPlans::new();
        plans.expect_delete_plan().times(1).returning(|_| Ok(()));

        let navigator = Navigator::new();
        let state = ShootPlanState::new(plan(Role::Photographer));
        navigator.push(Destination::ShootPlan(state.plan.clone()));
        let store = Store::new(ShootPlanReducer::new(Arc::new(plans)), state, navigator.clone());

        store.send(ShootPlanIntent::ConfirmPlanDelete);
        navigator
            .subscribe()
            .wait_for(|nav| nav.depth() == 0)
            .await
            .unwrap();
    }
}
