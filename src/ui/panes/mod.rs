//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`bars`]: Array snapshots as a colored bar chart
//! - [`grid`]: Grid snapshots as colored cells with an edit cursor
//! - [`info`]: Algorithm, run state, trace position and color legend
//! - [`status`]: Status bar with keybindings and run state
//!
//! Each pane module exports a stateless `render_*` function that draws one
//! snapshot; panes never touch the engine.

pub mod bars;
pub mod grid;
pub mod info;
pub mod status;

// Re-export render functions for convenience
pub use bars::render_bars_pane;
pub use grid::render_grid_pane;
pub use info::{render_info_pane, InfoRenderData, Legend};
pub use status::{render_status_bar, StatusRenderData};
