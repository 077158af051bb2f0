//! Visualization engine
//!
//! This module provides the stepping logic:
//! - [`scheduler`]: runs, sessions, pacing, observers and cooperative cancellation
//! - [`adapters`]: the algorithms that mutate a model through a [`scheduler::StepContext`]
//! - [`errors`]: engine error types
//!
//! # Execution Model
//!
//! Everything runs on the caller's thread. An adapter mutates the model and
//! calls `step()`; the scheduler copies the model into a snapshot, hands it to
//! the caller's observer, waits out the delay, and resumes the adapter only if
//! cancellation has not been requested. No two runs share a model.

pub mod adapters;
pub mod errors;
pub mod scheduler;
