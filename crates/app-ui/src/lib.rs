//! User interface layer for Lynz
//!
//! This crate holds everything between the runtime in `app-state` and the
//! views that draw it: navigation destinations, the header building blocks
//! and one store per screen.
//!
//! # Modules
//!
//! - [`navigation`] - Destinations and the app-wide navigator type
//! - [`components`] - Screen header builder
//! - [`screens`] - Screen reducers and the [`ScreenFactory`]
//!
//! # Example
//!
//! ```rust
//! use app_ui::{Destination, ScreenHeader, HeaderButton, HeaderIcon};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Intent { Back }
//!
//! let header = ScreenHeader::new()
//!     .with_leading(HeaderButton::new(HeaderIcon::Back, Intent::Back))
//!     .with_title(Destination::Settings.title());
//! assert_eq!(header.title.as_deref(), Some("Settings"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod navigation;
pub mod screens;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use components::{HeaderButton, HeaderIcon, ScreenHeader};

pub use navigation::{AppNavigator, Destination, ScreenEffect};

pub use screens::messages::{OfflinePresence, Presence};
pub use screens::{Screen, ScreenContext, ScreenFactory};
