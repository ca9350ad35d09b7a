//! Dependency container
//!
//! Everything the screens share is built once, here, from a
//! [`LynzConfig`]. Nothing is global: callers hold the [`Dependencies`] and
//! hand its [`ScreenFactory`] to whoever builds screens.

use anyhow::Context;
use app_core::{LocalPlanRepository, PlanQueries, PlanRepository};
use app_platform::{PermissionInteractor, PermissionKind, StaticPermissionService};
use app_state::{AppState, AppViewState};
use app_ui::{AppNavigator, Destination, OfflinePresence, ScreenContext, ScreenFactory};
use std::fmt;
use std::sync::Arc;
use storage::{KvStore, ObjectStore, SettingsStore};

use crate::config::LynzConfig;

/// Shared services of a running app
#[derive(Clone)]
pub struct Dependencies {
    kv: KvStore,
    plans: Arc<LocalPlanRepository>,
    app: AppState,
    navigator: AppNavigator,
    screens: ScreenFactory,
}

impl Dependencies {
    /// Open storage and wire every service
    ///
    /// Must run inside a tokio runtime only when screens are built; opening
    /// itself is synchronous.
    pub fn build(config: &LynzConfig) -> anyhow::Result<Self> {
        let kv_config = config.storage.kv_config();
        let kv = KvStore::new(kv_config.clone()).with_context(|| {
            format!("failed to open storage at {}", kv_config.path.display())
        })?;

        let plans = Arc::new(LocalPlanRepository::new(ObjectStore::new(kv.clone())));
        let app = AppState::with_settings(SettingsStore::new(kv.clone()))
            .context("failed to load app settings")?;

        let permissions = PermissionInteractor::new(
            Arc::new(StaticPermissionService::new(
                PermissionKind::Tracking,
                config.permissions.tracking,
            )),
            Arc::new(StaticPermissionService::new(
                PermissionKind::Notifications,
                config.permissions.notifications,
            )),
        );

        let navigator = AppNavigator::new();
        let screens = ScreenFactory::new(ScreenContext {
            navigator: navigator.clone(),
            plans: plans.clone(),
            permissions,
            app: app.clone(),
            presence: Arc::new(OfflinePresence),
            store_config: config.store.store_config(),
        });

        tracing::info!(
            temporary = kv_config.temporary,
            view = ?app.view_state(),
            "dependencies ready"
        );

        Ok(Self {
            kv,
            plans,
            app,
            navigator,
            screens,
        })
    }

    /// Screen builder
    pub fn screens(&self) -> &ScreenFactory {
        &self.screens
    }

    /// The app's navigator
    pub fn navigator(&self) -> &AppNavigator {
        &self.navigator
    }

    /// App-level flags
    pub fn app(&self) -> &AppState {
        &self.app
    }

    /// Plan persistence
    pub fn plans(&self) -> Arc<dyn PlanRepository> {
        self.plans.clone()
    }

    /// Read-side plan lookups
    pub fn plan_queries(&self) -> PlanQueries {
        PlanQueries::new(self.plans())
    }

    /// First screen to show: the onboarding start, or nothing for the tabs
    pub fn start_destination(&self) -> Option<Destination> {
        match self.app.view_state() {
            AppViewState::Onboarding => Some(Destination::NotificationAuthorization),
            AppViewState::Main => None,
        }
    }

    /// Flush storage to disk
    pub fn flush(&self) -> anyhow::Result<()> {
        self.kv.flush().context("failed to flush storage")
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies")
            .field("app", &self.app)
            .field("stored_keys", &self.kv.len())
            .finish_non_exhaustive()
    }
}
