//! Application state management for Lynz
//!
//! This crate provides the unidirectional data-flow runtime every screen is
//! built on: a per-screen [`Store`] that funnels intents through a pure
//! [`Reducer`], the declarative [`Effect`] the reducer returns, and the
//! shared [`Navigator`] that owns the screen stack and the modal slot.
//! [`AppState`] holds the app-wide flags: which root view is showing and
//! whether onboarding was completed.
//!
//! # Example
//!
//! ```rust
//! use app_state::{Effect, Navigator, Reducer, Store};
//!
//! #[derive(Clone, Default)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum CounterIntent {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = Counter;
//!     type Intent = CounterIntent;
//!     type Destination = ();
//!
//!     fn reduce(&self, state: &mut Counter, intent: CounterIntent) -> Effect<CounterIntent, ()> {
//!         match intent {
//!             CounterIntent::Increment => state.count += 1,
//!         }
//!         Effect::None
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Store::new(CounterReducer, Counter::default(), Navigator::new());
//! store.send_and_wait(CounterIntent::Increment).await.unwrap();
//! assert_eq!(store.state().count, 1);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod effect;
pub mod navigation;
pub mod store;

pub use app::{AppSnapshot, AppState, AppViewState, FlagStore};
pub use effect::Effect;
pub use navigation::{NavigationAction, NavigationState, Navigator, StackEntry};
pub use store::{Reducer, Store, StoreConfig, StoreError};
