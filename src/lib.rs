//! # Introduction
//!
//! fungetty runs Befunge programs on a toroidal grid, capturing a snapshot of
//! the full interpreter state after each step. The snapshot history is then
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Grid → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`memory`] — the [`memory::grid::Grid`] playfield, which is both code
//!    and data, and the zero-on-underflow [`memory::stack::Stack`].
//! 2. [`interpreter`] — cursor movement, instruction dispatch and the main
//!    loop; [`interpret`] is the one-call entry point.
//! 3. [`snapshot`] — snapshot history with a configurable memory limit and
//!    the [`snapshot::OutputBuffer`] that collects `.` and `,` output.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! assert_eq!(fungetty::interpret("\"iH\",,@"), "Hi");
//! assert_eq!(fungetty::interpret("54+.@"), "9");
//! ```

pub mod interpreter;
pub mod memory;
pub mod snapshot;
pub mod ui;

pub use interpreter::engine::{interpret, interpret_bounded, Interpreter, StepOutcome};
pub use interpreter::errors::RuntimeError;
