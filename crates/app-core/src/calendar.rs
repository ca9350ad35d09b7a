//! Month grid for the calendar screens
//!
//! Weeks start on Monday. The grid always covers whole weeks: days of the
//! previous month pad the first row, days of the next month pad the last.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::plans::Plan;

/// Weekday column headers, Monday first
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Day of month (1-31)
    pub day: u32,
    /// Whether the day belongs to the displayed month
    pub is_current_month: bool,
    /// Full date
    pub date: NaiveDate,
    /// The plan scheduled on this day, if any
    pub plan: Option<Plan>,
}

impl CalendarDay {
    /// Create a cell without a plan
    pub fn new(date: NaiveDate, is_current_month: bool) -> Self {
        Self {
            day: date.day(),
            is_current_month,
            date,
            plan: None,
        }
    }

    /// Attach a plan
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Check whether this cell is `today`
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// The month with the given year and month number (1-12)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// Year
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number (1-12)
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The following month (saturates at the end of the supported range)
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The preceding month (saturates at the start of the supported range)
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Number of days in the month
    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only December of the last representable year lands here
            None => 31,
        }
    }

    /// Check whether `date` falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Full month name, e.g. "September"
    pub fn month_name(&self) -> String {
        self.first.format("%B").to_string()
    }

    /// Header title, e.g. "September 2025"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year())
    }

    /// Build the Monday-first grid for this month
    ///
    /// Each cell carries the first plan in `plans` scheduled on its date.
    pub fn grid(&self, plans: &[Plan]) -> Vec<CalendarDay> {
        let leading = u64::from(self.first.weekday().num_days_from_monday());
        let filled = leading + u64::from(self.days_in_month());
        let total = filled.div_ceil(7) * 7;
        let start = self.first - Days::new(leading);

        (0..total)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| {
                let day = CalendarDay::new(date, self.contains(date));
                match plans.iter().find(|plan| plan.date == date) {
                    Some(plan) => day.with_plan(plan.clone()),
                    None => day,
                }
            })
            .collect()
    }
}
