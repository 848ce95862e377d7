//! Befunge execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`Interpreter`](engine::Interpreter) and its
//!   fetch-execute-advance loop, plus snapshot-based history navigation
//! - [`dispatch`]: Instruction decoding and semantics
//! - [`cursor`]: Instruction pointer position, direction and wraparound
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! Each cycle reads the cell under the cursor. `@` halts. `"` toggles string
//! mode. In string mode every other character is pushed as its code point;
//! otherwise it is decoded and executed. The cursor then advances one cell.
//! There is no step cap: a program without a reachable `@` runs forever
//! unless the caller bounds it with
//! [`run_with_limit`](engine::Interpreter::run_with_limit).

pub mod constants;
pub mod cursor;
pub mod dispatch;
pub mod engine;
pub mod errors;
