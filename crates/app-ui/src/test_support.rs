//! Shared fixtures for screen tests

use app_core::repository::Result as RepoResult;
use app_core::{CalendarDay, Plan, PlanRepository, Role};
use app_platform::{PermissionInteractor, PermissionKind, StaticPermissionService};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::screens::messages::Presence;

mockall::mock! {
    pub Plans {}

    #[async_trait]
    impl PlanRepository for Plans {
        async fn save_plan(&self, plan: &Plan) -> RepoResult<()>;
        async fn all_plans(&self) -> RepoResult<Vec<Plan>>;
        async fn delete_plan(&self, id: Uuid) -> RepoResult<()>;
        async fn delete_all_plans(&self) -> RepoResult<usize>;
    }
}

mockall::mock! {
    pub Presence {}

    #[async_trait]
    impl Presence for Presence {
        async fn online_users(&self) -> usize;
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn day(date: NaiveDate) -> CalendarDay {
    CalendarDay::new(date, true)
}

pub fn plan(role: Role) -> Plan {
    Plan::for_role(role, date(2025, 9, 12))
}

pub fn granting_permissions() -> PermissionInteractor {
    PermissionInteractor::new(
        Arc::new(StaticPermissionService::granting(PermissionKind::Tracking)),
        Arc::new(StaticPermissionService::granting(PermissionKind::Notifications)),
    )
}
