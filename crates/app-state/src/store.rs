//! Per-screen state container
//!
//! A [`Store`] owns one screen's state and is the only place that state is
//! ever mutated. Every intent goes through [`Reducer::reduce`]; the returned
//! [`Effect`] is interpreted afterwards.
//!
//! Each store runs a single consumer task on the tokio runtime. Intents sent
//! from the UI, results of async tasks and publisher items all funnel through
//! one channel into that task, so two dispatches never interleave mid-reduce.
//! Effect work (tasks, timers, subscriptions) is owned by the consumer and is
//! aborted when the store is torn down.

use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::effect::Effect;
use crate::navigation::Navigator;

/// Store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store was torn down before the intent could be processed
    #[error("Store has been torn down")]
    Closed,
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

// =============================================================================
// Reducer
// =============================================================================

/// Screen logic: a pure transition from (state, intent) to the next state
/// plus one effect
pub trait Reducer: Send + 'static {
    /// Screen state
    type State: Clone + Send + Sync + 'static;

    /// Things that can happen to the screen
    type Intent: fmt::Debug + Send + 'static;

    /// Navigation destinations this screen can reach
    type Destination: fmt::Debug + Clone + Send + Sync + 'static;

    /// Apply `intent` to `state`
    ///
    /// Must not perform I/O or schedule work; defer both to the returned
    /// effect. The default implementation ignores every intent.
    fn reduce(
        &self,
        _state: &mut Self::State,
        _intent: Self::Intent,
    ) -> Effect<Self::Intent, Self::Destination> {
        Effect::None
    }
}

type EffectOf<R> = Effect<<R as Reducer>::Intent, <R as Reducer>::Destination>;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name used in log output
    pub name: &'static str,
    /// Pause between the steps of a sequence effect
    pub sequence_step: Duration,
    /// Maximum number of intents one dispatch may chain synchronously
    pub max_chain: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store",
            sequence_step: Duration::from_millis(50),
            max_chain: 1024,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with a store name
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the pause between sequence steps
    pub fn sequence_step(mut self, step: Duration) -> Self {
        self.sequence_step = step;
        self
    }

    /// Set the synchronous chain limit
    pub fn max_chain(mut self, max: usize) -> Self {
        self.max_chain = max;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

enum Command<R: Reducer> {
    Dispatch {
        intent: R::Intent,
        ack: Option<oneshot::Sender<()>>,
    },
    Interpret(EffectOf<R>),
}

impl<R: Reducer> Command<R> {
    fn dispatch(intent: R::Intent) -> Self {
        Command::Dispatch { intent, ack: None }
    }
}

/// Handle to a running screen store
///
/// Dropping the handle tears the store down: pending tasks, delayed intents
/// and publisher subscriptions are cancelled and never dispatch again.
pub struct Store<R: Reducer> {
    name: &'static str,
    commands: mpsc::UnboundedSender<Command<R>>,
    state: watch::Receiver<R::State>,
    stop: Mutex<Option<oneshot::Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<R: Reducer> Store<R> {
    /// Create a store with the default configuration
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(reducer: R, initial_state: R::State, navigator: Navigator<R::Destination>) -> Self {
        Self::with_config(reducer, initial_state, navigator, StoreConfig::default())
    }

    /// Create a store with a custom configuration
    ///
    /// The initial state is published as-is; no effect is interpreted.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn with_config(
        reducer: R,
        initial_state: R::State,
        navigator: Navigator<R::Destination>,
        config: StoreConfig,
    ) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial_state);
        let (stop_tx, stop_rx) = oneshot::channel();

        let name = config.name;
        let runtime = Runtime {
            reducer,
            state: state_tx,
            navigator,
            commands: commands.clone(),
            tasks: JoinSet::new(),
            config,
        };
        let worker = tokio::spawn(runtime.run(inbox, stop_rx));
        tracing::debug!(store = name, "store started");

        Self {
            name,
            commands,
            state: state_rx,
            stop: Mutex::new(Some(stop_tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Send an intent
    ///
    /// Never fails: an intent sent to a torn-down store is logged and dropped.
    pub fn send(&self, intent: R::Intent) {
        if self.commands.send(Command::dispatch(intent)).is_err() {
            tracing::warn!(store = self.name, "intent sent to a torn-down store; dropping");
        }
    }

    /// Send an intent and wait until it, and every intent it chains
    /// synchronously, has been reduced and committed
    pub async fn send_and_wait(&self, intent: R::Intent) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.commands
            .send(Command::Dispatch {
                intent,
                ack: Some(ack),
            })
            .map_err(|_| StoreError::Closed)?;
        done.await.map_err(|_| StoreError::Closed)
    }

    /// Copy of the current state
    pub fn state(&self) -> R::State {
        self.state.borrow().clone()
    }

    /// Subscribe to committed state changes
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.clone()
    }

    /// Wait until the committed state satisfies `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&R::State) -> bool,
    ) -> Result<R::State> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|state| predicate(state))
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(state.clone())
    }

    /// Check whether the store has been torn down
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Tear the store down and wait for its consumer to finish
    pub async fn shutdown(&self) {
        if let Some(stop) = self.stop.lock().take() {
            let _ = stop.send(());
        }
        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            if let Err(err) = worker.await {
                tracing::error!(store = self.name, error = %err, "store worker failed");
            }
        }
    }
}

impl<R: Reducer> Drop for Store<R> {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.get_mut().take() {
            let _ = stop.send(());
        }
    }
}

impl<R: Reducer> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

// =============================================================================
// Effect interpreter
// =============================================================================

/// State owned by the consumer task
struct Runtime<R: Reducer> {
    reducer: R,
    state: watch::Sender<R::State>,
    navigator: Navigator<R::Destination>,
    commands: mpsc::UnboundedSender<Command<R>>,
    tasks: JoinSet<()>,
    config: StoreConfig,
}

impl<R: Reducer> Runtime<R> {
    async fn run(
        mut self,
        mut inbox: mpsc::UnboundedReceiver<Command<R>>,
        mut stop: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                biased;
                // Fires on an explicit stop and when the handle is dropped
                _ = &mut stop => break,
                Some(command) = inbox.recv() => self.handle(command),
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Err(err) = joined {
                        if err.is_panic() {
                            tracing::error!(store = self.config.name, "effect task panicked");
                        }
                    }
                }
            }
        }

        let pending = self.tasks.len();
        self.tasks.abort_all();
        tracing::debug!(store = self.config.name, pending, "store torn down");
    }

    fn handle(&mut self, command: Command<R>) {
        let mut queue = VecDeque::new();
        match command {
            Command::Dispatch { intent, ack } => {
                queue.push_back(intent);
                self.drain(&mut queue);
                if let Some(ack) = ack {
                    let _ = ack.send(());
                }
            }
            Command::Interpret(effect) => {
                self.interpret(effect, &mut queue);
                self.drain(&mut queue);
            }
        }
    }

    /// Reduce queued intents one at a time; immediate effects append to the
    /// queue instead of recursing
    fn drain(&mut self, queue: &mut VecDeque<R::Intent>) {
        let mut processed = 0;
        while let Some(intent) = queue.pop_front() {
            if processed == self.config.max_chain {
                tracing::error!(
                    store = self.config.name,
                    dropped = queue.len() + 1,
                    "immediate effect chain exceeded limit; dropping remaining intents"
                );
                queue.clear();
                return;
            }
            processed += 1;

            tracing::debug!(store = self.config.name, ?intent, "reduce");
            let mut next = self.state.borrow().clone();
            let effect = self.reducer.reduce(&mut next, intent);
            self.state.send_replace(next);
            self.interpret(effect, queue);
        }
    }

    fn interpret(&mut self, effect: EffectOf<R>, queue: &mut VecDeque<R::Intent>) {
        if !effect.is_none() {
            tracing::trace!(store = self.config.name, effect = effect.kind(), "interpret");
        }

        match effect {
            Effect::None => {}
            Effect::Intent(intent) => queue.push_back(intent),
            Effect::Closure(produce) => queue.push_back(produce()),
            Effect::Task(future) => {
                let commands = self.commands.clone();
                self.tasks.spawn(async move {
                    let effect = future.await;
                    let _ = commands.send(Command::Interpret(effect));
                });
            }
            Effect::Publisher(mut stream) => {
                let commands = self.commands.clone();
                self.tasks.spawn(async move {
                    while let Some(intent) = stream.next().await {
                        if commands.send(Command::dispatch(intent)).is_err() {
                            break;
                        }
                    }
                });
            }
            Effect::Sequence(intents) => {
                let commands = self.commands.clone();
                let step = self.config.sequence_step;
                self.tasks.spawn(async move {
                    let count = intents.len();
                    for (index, intent) in intents.into_iter().enumerate() {
                        let (ack, done) = oneshot::channel();
                        let command = Command::Dispatch {
                            intent,
                            ack: Some(ack),
                        };
                        if commands.send(command).is_err() || done.await.is_err() {
                            return;
                        }
                        if index + 1 < count {
                            tokio::time::sleep(step).await;
                        }
                    }
                });
            }
            Effect::Parallel(intents) => {
                for intent in intents {
                    let commands = self.commands.clone();
                    self.tasks.spawn(async move {
                        let _ = commands.send(Command::dispatch(intent));
                    });
                }
            }
            Effect::Delayed(intent, delay) => {
                let commands = self.commands.clone();
                self.tasks.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = commands.send(Command::dispatch(intent));
                });
            }
            Effect::Navigate(action) => self.navigator.apply(action),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
