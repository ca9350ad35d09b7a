//! Screen header components
//!
//! Every screen exposes a [`ScreenHeader`] describing its top bar: an
//! optional leading button, an optional title and any number of trailing
//! buttons. Buttons carry the intent they dispatch, so the renderer only
//! has to send `button.intent` back to the screen's store.
//!
//! # Example
//!
//! ```rust
//! use app_ui::components::{HeaderButton, HeaderIcon, ScreenHeader};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Intent {
//!     Back,
//!     Edit,
//! }
//!
//! let header = ScreenHeader::new()
//!     .with_leading(HeaderButton::new(HeaderIcon::Back, Intent::Back))
//!     .with_title("Shoot plan")
//!     .with_trailing(HeaderButton::new(HeaderIcon::Pencil, Intent::Edit).active(true));
//!
//! assert_eq!(header.title.as_deref(), Some("Shoot plan"));
//! assert_eq!(header.buttons().count(), 2);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Header Button
// =============================================================================

/// Icon shown on a header button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderIcon {
    /// Navigate back
    Back,
    /// Close a modal
    Close,
    /// Enter edit mode
    Pencil,
    /// Leave edit mode / confirm
    Checkmark,
    /// Add an item
    Plus,
    /// Delete
    Trash,
    /// Open settings
    Settings,
}

impl HeaderIcon {
    /// Icon asset name
    pub fn name(&self) -> &'static str {
        match self {
            HeaderIcon::Back => "chevron.left",
            HeaderIcon::Close => "xmark",
            HeaderIcon::Pencil => "pencil",
            HeaderIcon::Checkmark => "checkmark",
            HeaderIcon::Plus => "plus",
            HeaderIcon::Trash => "trash",
            HeaderIcon::Settings => "gearshape",
        }
    }
}

/// A round button in the screen header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderButton<I> {
    /// Icon
    pub icon: HeaderIcon,
    /// Intent dispatched when tapped
    pub intent: I,
    /// Filled (active) rather than outlined
    #[serde(default)]
    pub is_active: bool,
    /// Greyed out and not tappable
    #[serde(default)]
    pub is_disabled: bool,
}

impl<I> HeaderButton<I> {
    /// Create an enabled, outlined button
    pub fn new(icon: HeaderIcon, intent: I) -> Self {
        Self {
            icon,
            intent,
            is_active: false,
            is_disabled: false,
        }
    }

    /// Set the active (filled) state
    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Set the disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    /// Intent to dispatch for a tap, `None` while disabled
    pub fn tap(&self) -> Option<I>
    where
        I: Clone,
    {
        (!self.is_disabled).then(|| self.intent.clone())
    }
}

// =============================================================================
// Screen Header
// =============================================================================

/// Top bar of a screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenHeader<I> {
    /// Button before the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<HeaderButton<I>>,
    /// Title text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Buttons after the title, left to right
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<HeaderButton<I>>,
}

impl<I> Default for ScreenHeader<I> {
    fn default() -> Self {
        Self {
            leading: None,
            title: None,
            trailing: Vec::new(),
        }
    }
}

impl<I> ScreenHeader<I> {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leading button
    pub fn with_leading(mut self, button: HeaderButton<I>) -> Self {
        self.leading = Some(button);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a trailing button
    pub fn with_trailing(mut self, button: HeaderButton<I>) -> Self {
        self.trailing.push(button);
        self
    }

    /// Check whether the header shows nothing
    pub fn is_empty(&self) -> bool {
        self.leading.is_none() && self.title.is_none() && self.trailing.is_empty()
    }

    /// All buttons, leading first
    pub fn buttons(&self) -> impl Iterator<Item = &HeaderButton<I>> {
        self.leading.iter().chain(self.trailing.iter())
    }
}
