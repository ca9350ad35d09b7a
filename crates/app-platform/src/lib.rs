//! Platform services for Lynz
//!
//! This crate wraps the operating-system permission prompts (app tracking
//! and notifications) behind async traits so screens can request them
//! without knowing which platform they run on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod permissions;

pub use permissions::{
    AuthorizationStatus, PermissionInteractor, PermissionKind, PermissionService,
    StaticPermissionService,
};
