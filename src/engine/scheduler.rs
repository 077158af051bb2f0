//! Step scheduler: drives one adapter over one model with observable pauses
//!
//! A [`Run`] binds a model, an [`Adapter`], a [`CancelFlag`] and pacing
//! [`RunOptions`]. Driving it hands the adapter a [`StepContext`]; every call to
//! [`StepContext::step`] or [`StepContext::pause`] is a suspend point:
//!
//! 1. the model is copied into a snapshot,
//! 2. the snapshot goes to the caller's [`Observer`], which renders it,
//! 3. the observer waits out the pacing delay (cancellable),
//! 4. the cancellation flag is checked; if set, the adapter unwinds with `?`.
//!
//! The adapter does not continue until the observer returns, so snapshots reach
//! the caller one at a time, in emission order, and nothing is batched.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──drive──▶ Running ──adapter returns──▶ Completed
//!                    │
//!                    └──flag observed────────▶ Cancelled
//! ```
//!
//! A terminal run is never driven again; [`Session::start`] builds a new one.

use crate::engine::adapters::Adapter;
use crate::engine::errors::EngineError;
use crate::model::Model;
use log::{debug, trace};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep while waiting out a delay, so a cancel request is noticed quickly
pub const WAIT_SLICE: Duration = Duration::from_millis(5);

/// Shared early-termination request for one run
///
/// The caller sets it, the adapter only reads it. Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Marker returned through `?` when an adapter observes cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Result of an adapter step; `Err` means stop now
pub type StepResult = Result<(), Cancelled>;

/// How long a suspend point should wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// A visible comparison, swap or mark (uses [`RunOptions::delay`])
    Step,
    /// A per-node search visit (uses [`RunOptions::visit_delay`])
    Visit,
}

/// Pacing for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub delay: Duration,
    pub visit_delay: Duration,
}

impl RunOptions {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);
    pub const DEFAULT_VISIT_DELAY: Duration = Duration::from_millis(10);

    /// No waiting at any suspend point
    pub fn immediate() -> Self {
        RunOptions {
            delay: Duration::ZERO,
            visit_delay: Duration::ZERO,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        RunOptions {
            delay,
            ..RunOptions::default()
        }
    }

    pub fn delay_for(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Step => self.delay,
            Pace::Visit => self.visit_delay,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            delay: Self::DEFAULT_DELAY,
            visit_delay: Self::DEFAULT_VISIT_DELAY,
        }
    }
}

/// Receives each snapshot as it is emitted and paces the run
pub trait Observer<S> {
    /// Called once per suspend point; `step` counts from 1
    fn on_snapshot(&mut self, step: usize, snapshot: &S);

    /// Wait before the adapter resumes. Must return early once `cancel` is set.
    fn wait(&mut self, delay: Duration, cancel: &CancelFlag) {
        sleep_cancellable(delay, cancel);
    }
}

impl<S, F: FnMut(usize, &S)> Observer<S> for F {
    fn on_snapshot(&mut self, step: usize, snapshot: &S) {
        self(step, snapshot)
    }
}

/// Sleep for `delay` in short slices, returning as soon as `cancel` is set
pub fn sleep_cancellable(delay: Duration, cancel: &CancelFlag) {
    let deadline = Instant::now() + delay;
    while !cancel.is_cancelled() {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(WAIT_SLICE));
    }
}

/// Handle an adapter uses to mutate the model and suspend
pub struct StepContext<'a, M: Model> {
    model: &'a mut M,
    observer: &'a mut dyn Observer<M::Snapshot>,
    options: RunOptions,
    cancel: &'a CancelFlag,
    steps: usize,
}

impl<'a, M: Model> StepContext<'a, M> {
    pub fn model(&self) -> &M {
        self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        self.model
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Check the flag before starting a new mutation
    pub fn checkpoint(&self) -> StepResult {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Suspend with the regular step delay
    pub fn step(&mut self) -> StepResult {
        self.pause(Pace::Step)
    }

    /// Emit a snapshot, wait according to `pace`, then check for cancellation
    pub fn pause(&mut self, pace: Pace) -> StepResult {
        let snapshot = self.model.snapshot();
        self.steps += 1;
        trace!("step {} ({:?})", self.steps, pace);
        self.observer.on_snapshot(self.steps, &snapshot);
        self.observer.wait(self.options.delay_for(pace), self.cancel);
        self.checkpoint()
    }

    /// Number of snapshots emitted so far
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Observable lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub state: RunState,
    pub steps: usize,
}

/// One execution of an adapter over a model
pub struct Run<M: Model> {
    initial: M,
    model: M,
    adapter: Box<dyn Adapter<M>>,
    options: RunOptions,
    cancel: CancelFlag,
    state: RunState,
    steps: usize,
}

impl<M: Model> Run<M> {
    /// Create an idle run with its own cancellation flag
    pub fn new(model: M, adapter: Box<dyn Adapter<M>>, options: RunOptions) -> Self {
        Run {
            initial: model.clone(),
            model,
            adapter,
            options,
            cancel: CancelFlag::new(),
            state: RunState::Idle,
            steps: 0,
        }
    }

    pub fn adapter_name(&self) -> &'static str {
        self.adapter.name()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// A handle to this run's flag, for cancelling from elsewhere
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn snapshot(&self) -> M::Snapshot {
        self.model.snapshot()
    }

    pub fn initial_snapshot(&self) -> M::Snapshot {
        self.initial.snapshot()
    }

    /// Drive the adapter to a terminal state, handing every snapshot to `observer`
    pub fn drive<O: Observer<M::Snapshot>>(
        &mut self,
        observer: &mut O,
    ) -> Result<RunOutcome, EngineError> {
        if self.state != RunState::Idle {
            return Err(EngineError::RunNotIdle(self.state));
        }

        self.state = RunState::Running;
        debug!("run started: {}", self.adapter.name());

        let mut ctx = StepContext {
            model: &mut self.model,
            observer,
            options: self.options,
            cancel: &self.cancel,
            steps: 0,
        };
        let result = match ctx.checkpoint() {
            Ok(()) => self.adapter.run(&mut ctx),
            Err(cancelled) => Err(cancelled),
        };
        self.steps = ctx.steps;

        self.state = match result {
            Ok(()) => RunState::Completed,
            Err(Cancelled) => RunState::Cancelled,
        };
        debug!(
            "run {}: {} after {} step(s)",
            self.state,
            self.adapter.name(),
            self.steps
        );

        Ok(RunOutcome {
            state: self.state,
            steps: self.steps,
        })
    }

    /// Drive without pacing observers and collect every snapshot in order
    pub fn collect_snapshots(
        &mut self,
    ) -> Result<(RunOutcome, Vec<M::Snapshot>), EngineError> {
        let mut snapshots = Vec::new();
        let mut collect = |_step: usize, snapshot: &M::Snapshot| snapshots.push(snapshot.clone());
        let outcome = self.drive(&mut collect)?;
        Ok((outcome, snapshots))
    }

    /// Restore the model to the input the run started from
    pub fn reset(&mut self) {
        self.model = self.initial.clone();
    }
}

/// The controls an embedding layer uses: start, cancel, reset
///
/// A session owns the current input and at most one run over it. Starting a
/// new run always cancels and discards the previous one first.
pub struct Session<M: Model> {
    input: M,
    run: Option<Run<M>>,
}

impl<M: Model> Session<M> {
    pub fn new(input: M) -> Self {
        Session { input, run: None }
    }

    pub fn input(&self) -> &M {
        &self.input
    }

    /// Replace the input, discarding any run over the old one
    pub fn load(&mut self, input: M) {
        self.discard_run();
        self.input = input;
    }

    /// Modify the input in place (e.g. toggling walls), discarding any run
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut M) -> T) -> T {
        self.discard_run();
        f(&mut self.input)
    }

    /// Start a new idle run over a copy of the current input
    pub fn start(&mut self, adapter: Box<dyn Adapter<M>>, options: RunOptions) -> &mut Run<M> {
        self.discard_run();
        debug!("session start: {}", adapter.name());
        self.run.insert(Run::new(self.input.clone(), adapter, options))
    }

    /// Load `input` and start a run over it
    pub fn start_with(
        &mut self,
        input: M,
        adapter: Box<dyn Adapter<M>>,
        options: RunOptions,
    ) -> &mut Run<M> {
        self.load(input);
        self.start(adapter, options)
    }

    pub fn cancel(&self) {
        if let Some(run) = &self.run {
            debug!("session cancel: {}", run.adapter_name());
            run.cancel();
        }
    }

    /// Drop the current run so the visible model is the input again
    pub fn reset(&mut self) {
        debug!("session reset");
        self.discard_run();
    }

    pub fn run(&self) -> Option<&Run<M>> {
        self.run.as_ref()
    }

    pub fn run_mut(&mut self) -> Option<&mut Run<M>> {
        self.run.as_mut()
    }

    pub fn state(&self) -> RunState {
        self.run.as_ref().map_or(RunState::Idle, Run::state)
    }

    /// The model a renderer should show right now
    pub fn snapshot(&self) -> M::Snapshot {
        match &self.run {
            Some(run) => run.snapshot(),
            None => self.input.snapshot(),
        }
    }

    fn discard_run(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel();
        }
    }
}
