//! Memory model for the Befunge interpreter
//!
//! This module provides the two stores a program can touch:
//! - [`grid`]: The playfield, holding both code and data
//! - [`stack`]: The operand stack with zero-on-underflow reads
//!
//! # Addressing
//!
//! The grid is a torus. Cursor movement wraps one step at a time with
//! [`repeat`]; `p` and `g` may name any coordinate and go through
//! [`grid::Grid::wrap`] instead. Both agree on every in-range step:
//!
//! ```text
//! repeat(-1, 0, 4)  →  4
//! repeat( 5, 0, 4)  →  0
//! ```

pub mod grid;
pub mod stack;

/// Wrap a coordinate that stepped at most one cell past `[min, max]`
pub fn repeat(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        return max - (min - value) + 1;
    }

    if value > max {
        return min + (value - max) - 1;
    }

    value
}
