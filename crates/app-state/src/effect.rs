//! Declarative side effects
//!
//! A reducer never performs work itself. It describes what should happen next
//! by returning exactly one [`Effect`], which the owning
//! [`Store`](crate::Store) interprets after committing the new state.

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::navigation::NavigationAction;

/// Side work requested by a reducer
///
/// `I` is the screen's intent type, `D` the application's destination type.
pub enum Effect<I, D> {
    /// No further action
    None,

    /// Re-enter the reducer with this intent
    Intent(I),

    /// Evaluate the closure, then re-enter the reducer with its intent
    Closure(Box<dyn FnOnce() -> I + Send>),

    /// Run the future off the dispatch path and interpret the effect it yields
    Task(BoxFuture<'static, Effect<I, D>>),

    /// Send every intent the stream yields until the store is torn down
    Publisher(BoxStream<'static, I>),

    /// Dispatch the intents in order, each fully processed before the next
    Sequence(Vec<I>),

    /// Dispatch all intents concurrently, without ordering guarantees
    Parallel(Vec<I>),

    /// Dispatch the intent once after the delay elapses
    Delayed(I, Duration),

    /// Forward the action to the navigator instead of the reducer
    Navigate(NavigationAction<D>),
}

impl<I, D> Effect<I, D> {
    /// Create a closure effect
    pub fn closure(f: impl FnOnce() -> I + Send + 'static) -> Self {
        Effect::Closure(Box::new(f))
    }

    /// Create an async task effect
    ///
    /// Fallible work belongs inside the future; map failures to an intent
    /// instead of propagating them.
    pub fn task<F>(future: F) -> Self
    where
        F: Future<Output = Effect<I, D>> + Send + 'static,
    {
        Effect::Task(future.boxed())
    }

    /// Create a publisher effect from any stream of intents
    pub fn publisher<S>(stream: S) -> Self
    where
        S: Stream<Item = I> + Send + 'static,
    {
        Effect::Publisher(stream.boxed())
    }

    /// Dispatch `intent` after `delay`
    pub fn delayed(intent: I, delay: Duration) -> Self {
        Effect::Delayed(intent, delay)
    }

    /// Push a destination onto the navigation stack
    pub fn push(destination: D) -> Self {
        Effect::Navigate(NavigationAction::Push(destination))
    }

    /// Present a destination in the modal slot
    pub fn present_modal(destination: D) -> Self {
        Effect::Navigate(NavigationAction::PresentModal(destination))
    }

    /// Pop the top of the navigation stack
    pub fn pop() -> Self {
        Effect::Navigate(NavigationAction::Pop)
    }

    /// Clear the navigation stack
    pub fn pop_to_root() -> Self {
        Effect::Navigate(NavigationAction::PopToRoot)
    }

    /// Clear the modal slot
    pub fn dismiss_modal() -> Self {
        Effect::Navigate(NavigationAction::DismissModal)
    }

    /// Check whether this is [`Effect::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Short variant name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Intent(_) => "intent",
            Effect::Closure(_) => "closure",
            Effect::Task(_) => "task",
            Effect::Publisher(_) => "publisher",
            Effect::Sequence(_) => "sequence",
            Effect::Parallel(_) => "parallel",
            Effect::Delayed(..) => "delayed",
            Effect::Navigate(_) => "navigate",
        }
    }
}

impl<I, D> Default for Effect<I, D> {
    fn default() -> Self {
        Effect::None
    }
}

impl<I, D> From<NavigationAction<D>> for Effect<I, D> {
    fn from(action: NavigationAction<D>) -> Self {
        Effect::Navigate(action)
    }
}

impl<I: fmt::Debug, D: fmt::Debug> fmt::Debug for Effect<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Intent(intent) => f.debug_tuple("Intent").field(intent).finish(),
            Effect::Closure(_) => f.write_str("Closure(..)"),
            Effect::Task(_) => f.write_str("Task(..)"),
            Effect::Publisher(_) => f.write_str("Publisher(..)"),
            Effect::Sequence(intents) => f.debug_tuple("Sequence").field(intents).finish(),
            Effect::Parallel(intents) => f.debug_tuple("Parallel").field(intents).finish(),
            Effect::Delayed(intent, delay) => {
                f.debug_tuple("Delayed").field(intent).field(delay).finish()
            }
            Effect::Navigate(action) => f.debug_tuple("Navigate").field(action).finish(),
        }
    }
}

/// Structural equality for the data-carrying variants.
///
/// `Closure`, `Task` and `Publisher` hold opaque code and never compare equal.
impl<I: PartialEq, D: PartialEq> PartialEq for Effect<I, D> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Effect::None, Effect::None) => true,
            (Effect::Intent(a), Effect::Intent(b)) => a == b,
            (Effect::Sequence(a), Effect::Sequence(b)) => a == b,
            (Effect::Parallel(a), Effect::Parallel(b)) => a == b,
            (Effect::Delayed(a, da), Effect::Delayed(b, db)) => a == b && da == db,
            (Effect::Navigate(a), Effect::Navigate(b)) => a == b,
            _ => false,
        }
    }
}
