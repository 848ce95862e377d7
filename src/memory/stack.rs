//! Operand stack
//!
//! A single unbounded LIFO of `i32` values shared by every instruction.
//!
//! # Underflow
//!
//! Popping or peeking an empty stack is not a fault: both return `0`. Most
//! arithmetic relies on this, e.g. `+` on an empty stack pushes `0`. The raw
//! `Vec::pop` is never exposed so the zero default cannot be bypassed.

/// The operand stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i32>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push a value on top
    pub fn push(&mut self, value: i32) {
        self.values.push(value);
    }

    /// Remove and return the top value, or `0` if empty
    pub fn pop(&mut self) -> i32 {
        self.values.pop().unwrap_or(0)
    }

    /// Return the top value without removing it, or `0` if empty
    pub fn peek(&self) -> i32 {
        self.values.last().copied().unwrap_or(0)
    }

    /// Get the depth of the stack
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, bottom first (for UI display)
    pub fn values(&self) -> &[i32] {
        &self.values
    }
}
