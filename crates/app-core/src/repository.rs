//! Plan persistence
//!
//! Screens talk to plans through the [`PlanRepository`] trait so they can be
//! tested against mocks. [`LocalPlanRepository`] is the on-device
//! implementation over the object store; [`PlanQueries`] layers the read-side
//! lookups (by day, role, text, upcoming) on top of any repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::ops::RangeInclusive;
use std::sync::Arc;
use storage::{FetchRequest, ObjectKind, ObjectStore, ObjectStoreError};
use thiserror::Error;
use uuid::Uuid;

use crate::plans::Plan;
use crate::roles::Role;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No plan with this id
    #[error("Plan not found: {0}")]
    PlanNotFound(Uuid),

    /// Storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] ObjectStoreError),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Persistence of shoot plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Insert or replace a plan
    async fn save_plan(&self, plan: &Plan) -> Result<()>;

    /// Every stored plan, ordered by date
    async fn all_plans(&self) -> Result<Vec<Plan>>;

    /// Delete a plan by id
    ///
    /// Fails with [`RepositoryError::PlanNotFound`] when there is no such plan.
    async fn delete_plan(&self, id: Uuid) -> Result<()>;

    /// Delete every plan, returning how many were removed
    async fn delete_all_plans(&self) -> Result<usize>;
}

// =============================================================================
// Local Repository
// =============================================================================

/// Plan repository backed by the on-device object store
#[derive(Clone)]
pub struct LocalPlanRepository {
    store: ObjectStore,
}

impl LocalPlanRepository {
    /// Create a repository over `store`
    pub fn new(store: ObjectStore) -> Self {
        Self { store }
    }

    /// Fetch one plan by id
    pub fn plan(&self, id: Uuid) -> Result<Option<Plan>> {
        Ok(self.store.fetch(&id.to_string())?)
    }
}

#[async_trait]
impl PlanRepository for LocalPlanRepository {
    async fn save_plan(&self, plan: &Plan) -> Result<()> {
        self.store.save(plan)?;
        tracing::info!(plan_id = %plan.id, role = %plan.role, date = %plan.date, "saved plan");
        Ok(())
    }

    async fn all_plans(&self) -> Result<Vec<Plan>> {
        let request = FetchRequest::new().sort_by(|a: &Plan, b: &Plan| a.date.cmp(&b.date));
        Ok(self.store.fetch_all(request)?)
    }

    async fn delete_plan(&self, id: Uuid) -> Result<()> {
        match self.store.delete::<Plan>(&id.to_string()) {
            Ok(()) => {
                tracing::info!(plan_id = %id, "deleted plan");
                Ok(())
            }
            Err(ObjectStoreError::NotFound { .. }) => Err(RepositoryError::PlanNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_all_plans(&self) -> Result<usize> {
        Ok(self.store.delete_all(ObjectKind::Plan)?)
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Read-side plan lookups
///
/// Every query returns plans ordered by date.
#[derive(Clone)]
pub struct PlanQueries {
    repository: Arc<dyn PlanRepository>,
}

impl PlanQueries {
    /// Create queries over `repository`
    pub fn new(repository: Arc<dyn PlanRepository>) -> Self {
        Self { repository }
    }

    async fn filtered(&self, keep: impl Fn(&Plan) -> bool) -> Result<Vec<Plan>> {
        let mut plans = self.repository.all_plans().await?;
        plans.retain(|plan| keep(plan));
        plans.sort_by_key(|plan| plan.date);
        Ok(plans)
    }

    /// Plans scheduled on `date`
    pub async fn plans_on(&self, date: NaiveDate) -> Result<Vec<Plan>> {
        self.filtered(|plan| plan.date == date).await
    }

    /// Plans for `role`, optionally restricted to a date range
    pub async fn plans_for_role(
        &self,
        role: Role,
        range: Option<RangeInclusive<NaiveDate>>,
    ) -> Result<Vec<Plan>> {
        self.filtered(|plan| {
            plan.role == role && range.as_ref().map_or(true, |range| range.contains(&plan.date))
        })
        .await
    }

    /// Plans whose role or any task name contains `query` (case-insensitive)
    ///
    /// An empty query returns every plan.
    pub async fn search(&self, query: &str) -> Result<Vec<Plan>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.filtered(|_| true).await;
        }
        self.filtered(|plan| plan.role.as_str().contains(&query) || plan.matches(&query))
            .await
    }

    /// Plans on or after `from`, at most `limit` of them
    pub async fn upcoming(&self, from: NaiveDate, limit: usize) -> Result<Vec<Plan>> {
        let mut plans = self.filtered(|plan| plan.date >= from).await?;
        plans.truncate(limit);
        Ok(plans)
    }

    /// Number of plans for `role`, optionally restricted to a date range
    pub async fn count_for_role(
        &self,
        role: Role,
        range: Option<RangeInclusive<NaiveDate>>,
    ) -> Result<usize> {
        Ok(self.plans_for_role(role, range).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::TaskCategory;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn repository() -> LocalPlanRepository {
        LocalPlanRepository::new(ObjectStore::in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_save_and_load_plan() {
        let repo = repository();
        let plan = Plan::for_role(Role::Photographer, date(5));
        repo.save_plan(&plan).await.unwrap();

        let plans = repo.all_plans().await.unwrap();
        assert_eq!(plans, vec![plan.clone()]);
        assert_eq!(repo.plan(plan.id).unwrap(), Some(plan));
    }

    #[tokio::test]
    async fn test_save_replaces_existing_plan() {
        let repo = repository();
        let mut plan = Plan::for_role(Role::Model, date(5));
        repo.save_plan(&plan).await.unwrap();

        plan.tasks.push(TaskCategory::new("Bring a robe"));
        repo.save_plan(&plan).await.unwrap();

        let plans = repo.all_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].tasks.len(), 9);
    }

    #[tokio::test]
    async fn test_all_plans_ordered_by_date() {
        let repo = repository();
        let late = Plan::for_role(Role::Model, date(20));
        let early = Plan::for_role(Role::Model, date(2));
        repo.save_plan(&late).await.unwrap();
        repo.save_plan(&early).await.unwrap();

        let dates: Vec<_> = repo
            .all_plans()
            .await
            .unwrap()
            .into_iter()
            .map(|plan| plan.date)
            .collect();
        assert_eq!(dates, vec![date(2), date(20)]);
    }

    #[tokio::test]
    async fn test_delete_unknown_plan_is_not_found() {
        let repo = repository();
        let id = Uuid::new_v4();
        let err = repo.delete_plan(id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::PlanNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_plan_and_delete_all() {
        let repo = repository();
        let a = Plan::for_role(Role::Model, date(1));
        let b = Plan::for_role(Role::Photographer, date(2));
        repo.save_plan(&a).await.unwrap();
        repo.save_plan(&b).await.unwrap();

        repo.delete_plan(a.id).await.unwrap();
        assert_eq!(repo.all_plans().await.unwrap(), vec![b]);

        assert_eq!(repo.delete_all_plans().await.unwrap(), 1);
        assert!(repo.all_plans().await.unwrap().is_empty());
    }

    async fn seeded_queries() -> PlanQueries {
        let repo = repository();
        repo.save_plan(&Plan::for_role(Role::Photographer, date(3)))
            .await
            .unwrap();
        repo.save_plan(&Plan::for_role(Role::Model, date(10)))
            .await
            .unwrap();
        repo.save_plan(&Plan::for_role(Role::Photographer, date(10)))
            .await
            .unwrap();
        repo.save_plan(&Plan::for_role(Role::Photographer, date(25)))
            .await
            .unwrap();
        PlanQueries::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_plans_on_day() {
        let queries = seeded_queries().await;
        assert_eq!(queries.plans_on(date(10)).await.unwrap().len(), 2);
        assert!(queries.plans_on(date(11)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plans_for_role_with_range() {
        let queries = seeded_queries().await;
        assert_eq!(
            queries
                .count_for_role(Role::Photographer, None)
                .await
                .unwrap(),
            3
        );
        let ranged = queries
            .plans_for_role(Role::Photographer, Some(date(1)..=date(10)))
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);
        assert!(ranged.iter().all(|plan| plan.role == Role::Photographer));
    }

    #[tokio::test]
    async fn test_search() {
        let queries = seeded_queries().await;
        assert_eq!(queries.search("makeup").await.unwrap().len(), 1);
        assert_eq!(queries.search("HYDRATED").await.unwrap().len(), 1);
        assert_eq!(queries.search("Photographer").await.unwrap().len(), 3);
        assert_eq!(queries.search("  ").await.unwrap().len(), 4);
        assert!(queries.search("drone").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upcoming() {
        let queries = seeded_queries().await;
        let upcoming = queries.upcoming(date(4), 2).await.unwrap();
        assert_eq!(upcoming.len(), 2);
        assert!(upcoming.iter().all(|plan| plan.date == date(10)));
        assert_eq!(queries.upcoming(date(26), 10).await.unwrap().len(), 0);
    }
}
