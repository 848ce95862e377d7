//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`grid`]: The playfield with instruction coloring and cursor indicator
//! - [`stack`]: Operand stack, top first, with character annotations
//! - [`terminal`]: Output from `.` and `,`
//! - [`status`]: Status bar with keybindings and execution state
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function, plus the scroll
//! state and render data types it needs.

pub mod grid;
pub mod stack;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use grid::{render_grid_pane, GridRenderData, GridScrollState};
pub use stack::{render_stack_pane, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
