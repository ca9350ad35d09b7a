//! Core application logic for Lynz
//!
//! This crate contains the domain model of a photo shoot (roles, plans,
//! task checklists, poses), the month grid used by the calendar screens,
//! and the repository that persists plans.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod plans;
pub mod poses;
pub mod repository;
pub mod roles;

pub use calendar::{CalendarDay, CalendarMonth, WEEKDAYS};
pub use plans::{Plan, TaskCategory};
pub use poses::Pose;
pub use repository::{LocalPlanRepository, PlanQueries, PlanRepository, RepositoryError};
pub use roles::Role;
