//! App-wide state
//!
//! A small set of flags shared by every screen: which root view is showing
//! and whether onboarding has been completed. The onboarding flag survives
//! restarts when the state is backed by a [`FlagStore`], usually the
//! [`SettingsStore`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::kv::{Result as KvResult, SettingsStore};
use tokio::sync::watch;

/// Settings key of the persisted onboarding flag
pub const ONBOARDING_SHOWN_KEY: &str = "onboarding_shown";

/// Root view of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppViewState {
    /// Permission onboarding flow
    #[default]
    Onboarding,
    /// Main tabbed interface
    Main,
}

/// Snapshot of the app-wide flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppSnapshot {
    /// Root view currently showing
    pub view: AppViewState,
    /// Whether onboarding was completed
    pub onboarding_shown: bool,
}

/// Persistence of the app-wide flags
pub trait FlagStore: Send + Sync {
    /// Stored onboarding flag, `false` when never written
    fn load_onboarding_shown(&self) -> KvResult<bool>;

    /// Store the onboarding flag
    fn save_onboarding_shown(&self, shown: bool) -> KvResult<()>;
}

impl FlagStore for SettingsStore {
    fn load_onboarding_shown(&self) -> KvResult<bool> {
        self.get_or_default(ONBOARDING_SHOWN_KEY)
    }

    fn save_onboarding_shown(&self, shown: bool) -> KvResult<()> {
        self.set(ONBOARDING_SHOWN_KEY, &shown)
    }
}

/// Shared handle to the app-wide flags
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone)]
pub struct AppState {
    state: Arc<watch::Sender<AppSnapshot>>,
    flags: Option<Arc<dyn FlagStore>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("state", &self.snapshot())
            .field("persistent", &self.flags.is_some())
            .finish()
    }
}

impl AppState {
    /// Create an unpersisted app state starting in onboarding
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AppSnapshot::default());
        Self {
            state: Arc::new(tx),
            flags: None,
        }
    }

    /// Create an app state that persists the onboarding flag in `settings`
    ///
    /// Starts in the main view when onboarding was completed before.
    pub fn with_settings(settings: SettingsStore) -> KvResult<Self> {
        Self::with_flag_store(Arc::new(settings))
    }

    /// Create an app state that persists its flags in `flags`
    pub fn with_flag_store(flags: Arc<dyn FlagStore>) -> KvResult<Self> {
        let onboarding_shown = flags.load_onboarding_shown()?;
        let snapshot = AppSnapshot {
            view: if onboarding_shown {
                AppViewState::Main
            } else {
                AppViewState::Onboarding
            },
            onboarding_shown,
        };
        let (tx, _) = watch::channel(snapshot);
        Ok(Self {
            state: Arc::new(tx),
            flags: Some(flags),
        })
    }

    /// Copy of the current flags
    pub fn snapshot(&self) -> AppSnapshot {
        *self.state.borrow()
    }

    /// Root view currently showing
    pub fn view_state(&self) -> AppViewState {
        self.state.borrow().view
    }

    /// Whether onboarding was completed
    pub fn onboarding_shown(&self) -> bool {
        self.state.borrow().onboarding_shown
    }

    /// Switch the root view
    pub fn set_view_state(&self, view: AppViewState) {
        self.state.send_if_modified(|state| {
            let changed = state.view != view;
            state.view = view;
            changed
        });
    }

    /// Record whether onboarding was completed, persisting the flag if
    /// backed by a flag store
    pub fn set_onboarding_shown(&self, shown: bool) -> KvResult<()> {
        if let Some(flags) = &self.flags {
            flags.save_onboarding_shown(shown)?;
        }
        self.state.send_if_modified(|state| {
            let changed = state.onboarding_shown != shown;
            state.onboarding_shown = shown;
            changed
        });
        Ok(())
    }

    /// Mark onboarding as done and switch to the main view
    pub fn complete_onboarding(&self) -> KvResult<()> {
        self.set_onboarding_shown(true)?;
        self.set_view_state(AppViewState::Main);
        tracing::info!("onboarding completed");
        Ok(())
    }

    /// Subscribe to flag changes
    pub fn subscribe(&self) -> watch::Receiver<AppSnapshot> {
        self.state.subscribe()
    }
}
