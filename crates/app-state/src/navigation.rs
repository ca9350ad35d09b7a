//! Navigation state shared by every screen
//!
//! The [`Navigator`] owns an ordered stack of destinations plus a single
//! modal slot. It is generic over the application's destination type; the
//! embedding application resolves destinations into concrete screens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

// =============================================================================
// Navigation Actions
// =============================================================================

/// A navigation command, usually produced by a reducer through
/// [`Effect::Navigate`](crate::Effect::Navigate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "destination", rename_all = "snake_case")]
pub enum NavigationAction<D> {
    /// Push a destination onto the stack
    Push(D),
    /// Present a destination modally, replacing any current modal
    PresentModal(D),
    /// Pop the top of the stack
    Pop,
    /// Clear the whole stack
    PopToRoot,
    /// Clear the modal slot
    DismissModal,
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry<D> {
    /// The destination
    pub destination: D,
    /// Unique key for this entry
    pub key: String,
}

impl<D> StackEntry<D> {
    /// Create a new stack entry with a fresh key
    pub fn new(destination: D) -> Self {
        Self {
            destination,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Complete navigation state: the push/pop path and the modal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState<D> {
    /// Stack entries (bottom to top); empty means the root screen is showing
    pub stack: Vec<StackEntry<D>>,
    /// Currently presented modal
    pub modal: Option<StackEntry<D>>,
}

impl<D> Default for NavigationState<D> {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            modal: None,
        }
    }
}

impl<D> NavigationState<D> {
    /// Destinations on the stack, bottom to top
    pub fn path(&self) -> impl Iterator<Item = &D> {
        self.stack.iter().map(|entry| &entry.destination)
    }

    /// Top of the stack, if any
    pub fn current(&self) -> Option<&D> {
        self.stack.last().map(|entry| &entry.destination)
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if a modal is presented
    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Shared handle to the application's navigation state
///
/// Cloning is cheap; every clone refers to the same state. All mutation goes
/// through the methods below, which are serialized by the underlying watch
/// channel, so concurrent stores never interleave a stack update.
pub struct Navigator<D> {
    state: Arc<watch::Sender<NavigationState<D>>>,
}

impl<D> Clone for Navigator<D> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<D> Default for Navigator<D> {
    fn default() -> Self {
        Self::with_state(NavigationState::default())
    }
}

impl<D> fmt::Debug for Navigator<D>
where
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl<D> Navigator<D> {
    /// Create a navigator with an empty stack and no modal
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator from a previously captured state
    pub fn with_state(state: NavigationState<D>) -> Self {
        let (tx, _) = watch::channel(state);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Push a destination; equal destinations are never deduplicated
    pub fn push(&self, destination: D) {
        self.state.send_modify(|state| state.stack.push(StackEntry::new(destination)));
    }

    /// Pop the top destination
    ///
    /// Returns `false` (and leaves the state untouched) when the stack is
    /// already empty.
    pub fn pop(&self) -> bool {
        let popped = self
            .state
            .send_if_modified(|state| state.stack.pop().is_some());
        if !popped {
            tracing::warn!("pop requested on an empty navigation stack; ignoring");
        }
        popped
    }

    /// Clear the stack regardless of depth
    pub fn pop_to_root(&self) {
        self.state.send_if_modified(|state| {
            let had_entries = !state.stack.is_empty();
            state.stack.clear();
            had_entries
        });
    }

    /// Present a destination modally; the last presentation wins
    pub fn present_modal(&self, destination: D) {
        self.state
            .send_modify(|state| state.modal = Some(StackEntry::new(destination)));
    }

    /// Clear the modal slot (returns `false` if nothing was presented)
    pub fn dismiss_modal(&self) -> bool {
        self.state.send_if_modified(|state| state.modal.take().is_some())
    }

    /// Apply a navigation action
    pub fn apply(&self, action: NavigationAction<D>)
    where
        D: fmt::Debug,
    {
        tracing::debug!(?action, "navigation");
        match action {
            NavigationAction::Push(destination) => self.push(destination),
            NavigationAction::PresentModal(destination) => self.present_modal(destination),
            NavigationAction::Pop => {
                self.pop();
            }
            NavigationAction::PopToRoot => self.pop_to_root(),
            NavigationAction::DismissModal => {
                self.dismiss_modal();
            }
        }
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.state.borrow().depth()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.depth() > 0
    }

    /// Subscribe to navigation changes
    pub fn subscribe(&self) -> watch::Receiver<NavigationState<D>> {
        self.state.subscribe()
    }
}

impl<D: Clone> Navigator<D> {
    /// Copy of the current navigation state
    pub fn snapshot(&self) -> NavigationState<D> {
        self.state.borrow().clone()
    }

    /// Destinations on the stack, bottom to top
    pub fn path(&self) -> Vec<D> {
        self.state.borrow().path().cloned().collect()
    }

    /// Top of the stack, if any
    pub fn current(&self) -> Option<D> {
        self.state.borrow().current().cloned()
    }

    /// The presented modal destination, if any
    pub fn modal(&self) -> Option<D> {
        self.state
            .borrow()
            .modal
            .as_ref()
            .map(|entry| entry.destination.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
