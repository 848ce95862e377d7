//! Runtime error types for the Befunge interpreter
//!
//! This module defines [`RuntimeError`]. The instruction set itself has no
//! faults: underflow reads zero, division by zero pushes zero, and grid
//! addressing wraps. What remains are conditions imposed from outside the
//! program, such as an empty source, a caller's step limit, or the snapshot
//! memory budget.

use std::fmt;

/// Errors that can occur while loading, running or replaying a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Source text was empty; there is no grid to execute
    EmptyProgram,

    /// The caller's step bound was reached before `@`
    StepLimitExceeded { limit: usize },

    /// Snapshot history limit exceeded; `current` includes the rejected snapshot
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation failed (already at an end, or nothing recorded)
    HistoryOperationFailed { message: String },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EmptyProgram => write!(f, "Program source is empty"),
            RuntimeError::StepLimitExceeded { limit } => {
                write!(f, "Program did not halt within {} steps", limit)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes needed, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
