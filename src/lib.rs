//! Lynz: photo-shoot planning
//!
//! This crate wires the workspace together. The pieces live in their own
//! crates:
//!
//! - `app-state` - the store runtime: effects, navigator and app flags
//! - `storage` - sled-backed key-value and object storage
//! - `app-core` - plans, roles, poses and the calendar grid
//! - `app-platform` - permission prompts
//! - `app-ui` - destinations, headers and screen stores
//!
//! Here you find the [`LynzConfig`], tracing setup and the [`Dependencies`]
//! container that builds every shared service.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let deps = lynz::bootstrap(lynz::LynzConfig::default())?;
//! let calendar = deps.screens().calendar();
//! calendar.send(app_ui::screens::calendar::CalendarIntent::LoadPlans);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dependencies;
pub mod telemetry;

pub use config::{LogConfig, LynzConfig, PermissionAnswers, StorageConfig, StoreSettings};
pub use dependencies::Dependencies;
pub use telemetry::init_tracing;

/// Install logging and build the dependency container
///
/// Environment overrides are applied to `config` first.
pub fn bootstrap(config: LynzConfig) -> anyhow::Result<Dependencies> {
    let config = config.apply_env_overrides();
    init_tracing(&config.log);
    tracing::info!(
        storage = %config.storage.path.display(),
        temporary = config.storage.temporary,
        "starting lynz"
    );
    Dependencies::build(&config)
}
