//! # Introduction
//!
//! algoTTY animates sorting algorithms and grid path search one step at a time.
//! An algorithm mutates a model, pauses at every comparison, swap or visit, and
//! the caller renders the snapshot it receives before letting the algorithm
//! continue. A run can be cancelled at any pause; a finished run's snapshots can
//! be scrubbed forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Input → Model → Adapter ⇄ Scheduler → Snapshots → Observer (TUI / Recorder)
//! ```
//!
//! 1. [`model`]: visual models, [`model::element::ArrayModel`] for sorting
//!    and [`model::grid::Grid`] for path search.
//! 2. [`engine`]: the [`engine::scheduler::Run`] lifecycle, pacing and
//!    cancellation, plus the [`engine::adapters`] themselves.
//! 3. [`snapshot`]: memory-bounded snapshot [`snapshot::Trace`] and the
//!    [`snapshot::Recorder`] observer that fills it.
//! 4. [`config`]: TOML configuration for pacing, input shape and grid layout.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Sorting: bubble, selection, insertion, merge, quick (Lomuto).
//! Search: breadth-first over a grid with walls.

pub mod config;
pub mod engine;
pub mod model;
pub mod snapshot;
pub mod ui;
