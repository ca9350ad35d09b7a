//! Date picker embedded in the calendar screen

use app_core::{CalendarDay, CalendarMonth, Plan, WEEKDAYS};
use app_state::{Reducer, Store};
use chrono::NaiveDate;

use crate::navigation::{Destination, ScreenEffect};

/// Date picker state
#[derive(Debug, Clone, PartialEq)]
pub struct DatePickerState {
    /// Month being displayed
    pub month: CalendarMonth,
    /// Grid cells of the displayed month
    pub calendar_days: Vec<CalendarDay>,
    /// Plans to mark on the grid
    pub plans: Vec<Plan>,
    /// Last tapped cell
    pub selected: Option<CalendarDay>,
    /// Today's date, for highlighting
    pub today: NaiveDate,
}

impl DatePickerState {
    /// State showing the month that contains `today`, grid not yet generated
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: CalendarMonth::containing(today),
            calendar_days: Vec::new(),
            plans: Vec::new(),
            selected: None,
            today,
        }
    }

    /// Month name, e.g. "September"
    pub fn current_month(&self) -> String {
        self.month.month_name()
    }

    /// Year, e.g. "2025"
    pub fn current_year(&self) -> String {
        self.month.year().to_string()
    }

    /// Weekday column headers, Monday first
    pub fn weekdays(&self) -> [&'static str; 7] {
        WEEKDAYS
    }
}

/// Date picker intents
#[derive(Debug, Clone, PartialEq)]
pub enum DatePickerIntent {
    /// Show the previous month
    PreviousMonth,
    /// Show the next month
    NextMonth,
    /// A cell was tapped
    SelectDay(CalendarDay),
    /// Rebuild the grid for the displayed month
    GenerateCalendar,
    /// Replace the plans marked on the grid
    UpdatePlans(Vec<Plan>),
}

/// Date picker logic
#[derive(Debug, Default)]
pub struct DatePickerReducer;

/// Running date picker
pub type DatePickerStore = Store<DatePickerReducer>;

impl Reducer for DatePickerReducer {
    type State = DatePickerState;
    type Intent = DatePickerIntent;
    type Destination = Destination;

    fn reduce(
        &self,
        state: &mut DatePickerState,
        intent: DatePickerIntent,
    ) -> ScreenEffect<DatePickerIntent> {
        match intent {
            DatePickerIntent::PreviousMonth => {
                state.month = state.month.previous();
                ScreenEffect::Intent(DatePickerIntent::GenerateCalendar)
            }
            DatePickerIntent::NextMonth => {
                state.month = state.month.next();
                ScreenEffect::Intent(DatePickerIntent::GenerateCalendar)
            }
            DatePickerIntent::SelectDay(day) => {
                tracing::debug!(date = %day.date, current_month = day.is_current_month, "day selected");
                state.selected = Some(day);
                ScreenEffect::None
            }
            DatePickerIntent::GenerateCalendar => {
                state.calendar_days = state.month.grid(&state.plans);
                ScreenEffect::None
            }
            DatePickerIntent::UpdatePlans(plans) => {
                state.plans = plans;
                ScreenEffect::Intent(DatePickerIntent::GenerateCalendar)
            }
        }
    }
}
