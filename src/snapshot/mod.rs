// Snapshot management for reverse execution

use crate::interpreter::cursor::Cursor;
use crate::memory::{grid::Grid, stack::Stack};
use rustc_hash::FxHashMap;

/// Grid cell address as (row, col)
pub type Cell = (usize, usize);

/// Output produced by `.` and `,`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    last_write_step: Option<usize>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer {
            text: String::new(),
            last_write_step: None,
        }
    }

    /// Append text produced at `step`
    pub fn print(&mut self, text: &str, step: usize) {
        self.text.push_str(text);
        self.last_write_step = Some(step);
    }

    /// Everything written so far
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Step of the most recent write, if any
    pub fn last_write_step(&self) -> Option<usize> {
        self.last_write_step
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get all lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        let mut result: Vec<String> = self.text.split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub stack: Stack,
    pub cursor: Cursor,
    pub output: OutputBuffer,
    pub string_mode: bool,
    pub halted: bool,
    pub steps: usize,
    /// Cells overwritten by `p`, with the step that last wrote each
    pub modified_cells: FxHashMap<Cell, usize>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough figures: 4 bytes per char cell and stack slot, ~24 per map entry
        let grid_size = self.grid.area() * 4 + self.grid.rows() * 24;
        let stack_size = self.stack.len() * 4;
        let output_size = self.output.len();
        let modified_size = self.modified_cells.len() * 24;

        64 + grid_size + stack_size + output_size + modified_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(source: &str) -> Snapshot {
        Snapshot {
            grid: Grid::from_source(source).unwrap(),
            stack: Stack::new(),
            cursor: Cursor::new(),
            output: OutputBuffer::new(),
            string_mode: false,
            halted: false,
            steps: 0,
            modified_cells: FxHashMap::default(),
        }
    }

    #[test]
    fn test_output_lines() {
        let mut output = OutputBuffer::new();
        output.print("ab\n", 1);
        output.print("c", 4);

        assert_eq!(output.as_str(), "ab\nc");
        assert_eq!(output.get_output(), vec!["ab", "c"]);
        assert_eq!(output.last_write_step(), Some(4));
    }

    #[test]
    fn test_trailing_newline_dropped_from_lines() {
        let mut output = OutputBuffer::new();
        output.print("x\n", 0);
        assert_eq!(output.get_output(), vec!["x"]);
    }

    #[test]
    fn test_budget_is_enforced() {
        let one = snapshot("@").estimated_size();
        let mut manager = SnapshotManager::new(one * 2);

        assert!(manager.push(snapshot("@")).is_ok());
        assert!(manager.push(snapshot("@")).is_ok());
        assert!(manager.push(snapshot("@")).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), one * 2);
    }

    #[test]
    fn test_larger_grid_costs_more() {
        assert!(snapshot("@@@@\n@@@@").estimated_size() > snapshot("@").estimated_size());
    }
}
