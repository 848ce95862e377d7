// Execution engine for the Befunge interpreter

use crate::interpreter::constants::{DEFAULT_SNAPSHOT_LIMIT, HALT, QUOTE};
use crate::interpreter::cursor::Cursor;
use crate::interpreter::dispatch::Instruction;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{grid::Grid, stack::Stack};
use crate::snapshot::{Cell, OutputBuffer, Snapshot, SnapshotManager};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

/// Result of a single fetch-execute-advance cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction ran and the cursor moved on
    Continue,
    /// The cursor is on `@`; nothing more will run
    Halted,
}

/// The main interpreter that executes a Befunge program
pub struct Interpreter {
    /// Playfield (code and data)
    pub(crate) grid: Grid,

    /// Operand stack
    pub(crate) stack: Stack,

    /// Instruction pointer
    pub(crate) cursor: Cursor,

    /// Text produced by `.` and `,`
    pub(crate) output: OutputBuffer,

    /// Whether `"` has opened a string literal
    pub(crate) string_mode: bool,

    /// Whether `@` has been reached
    halted: bool,

    /// Executed cycles so far (the halting read is not counted)
    pub(crate) steps: usize,

    /// Cells written by `p`, with the step of the latest write
    pub(crate) modified_cells: FxHashMap<Cell, usize>,

    /// Source of randomness for `?`
    pub(crate) rng: StdRng,

    /// Snapshot manager for reverse execution
    snapshot_manager: SnapshotManager,

    /// Current position in execution history (for stepping backward/forward)
    history_position: usize,
}

impl Interpreter {
    /// Load a program. Fails only if the source is empty.
    pub fn new(source: &str) -> Result<Self, RuntimeError> {
        Self::with_rng(source, StdRng::from_entropy())
    }

    /// Load a program with a fixed seed for `?`, making runs reproducible
    pub fn with_seed(source: &str, seed: u64) -> Result<Self, RuntimeError> {
        Self::with_rng(source, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: &str, rng: StdRng) -> Result<Self, RuntimeError> {
        let grid = Grid::from_source(source).ok_or(RuntimeError::EmptyProgram)?;

        Ok(Interpreter {
            grid,
            stack: Stack::new(),
            cursor: Cursor::new(),
            output: OutputBuffer::new(),
            string_mode: false,
            halted: false,
            steps: 0,
            modified_cells: FxHashMap::default(),
            rng,
            snapshot_manager: SnapshotManager::new(DEFAULT_SNAPSHOT_LIMIT),
            history_position: 0,
        })
    }

    /// Replace the snapshot memory budget. Only meaningful before [`record`].
    ///
    /// [`record`]: Interpreter::record
    pub fn with_snapshot_limit(mut self, limit: usize) -> Self {
        self.snapshot_manager = SnapshotManager::new(limit);
        self
    }

    /// Character under the cursor
    pub fn current_char(&self) -> char {
        self.grid.get(self.cursor.row, self.cursor.col)
    }

    /// Execute one cycle: halt check, then string-mode toggle, string push,
    /// or instruction dispatch, then advance.
    pub fn step(&mut self) -> StepOutcome {
        if self.halted {
            return StepOutcome::Halted;
        }

        let current = self.current_char();

        if current == HALT {
            self.halted = true;
            return StepOutcome::Halted;
        }

        if current == QUOTE {
            self.string_mode = !self.string_mode;
        } else if self.string_mode {
            self.stack.push(current as i32);
        } else {
            self.execute(Instruction::decode(current));
        }

        self.advance();
        self.steps += 1;
        StepOutcome::Continue
    }

    /// Move the cursor one cell with wraparound
    pub(crate) fn advance(&mut self) {
        self.cursor.advance(self.grid.rows(), self.grid.cols());
    }

    /// Run until `@`. Never returns for a program that does not halt.
    pub fn run(&mut self) -> &str {
        while self.step() == StepOutcome::Continue {}
        self.output.as_str()
    }

    /// Run until `@` or until `max_steps` further cycles have executed.
    ///
    /// On [`RuntimeError::StepLimitExceeded`] the interpreter is left where
    /// it stopped, so the partial output and state remain readable.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<(), RuntimeError> {
        for _ in 0..max_steps {
            if self.step() == StepOutcome::Halted {
                return Ok(());
            }
        }

        // Reading `@` is not a cycle, so landing on it exactly at the bound still halts
        if self.step_is_halt() {
            self.halted = true;
            return Ok(());
        }

        Err(RuntimeError::StepLimitExceeded { limit: max_steps })
    }

    fn step_is_halt(&self) -> bool {
        self.halted || self.current_char() == HALT
    }

    /// Run up to `max_steps` cycles, taking a snapshot before the first and
    /// after every cycle so the run can be replayed with [`step_backward`] and
    /// [`step_forward`].
    ///
    /// Stops with an error when the snapshot budget is exhausted or the step
    /// bound is reached; everything recorded up to that point stays navigable.
    ///
    /// [`step_backward`]: Interpreter::step_backward
    /// [`step_forward`]: Interpreter::step_forward
    pub fn record(&mut self, max_steps: usize) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            self.take_snapshot()?;
        }

        if self.halted {
            return Ok(());
        }

        for _ in 0..max_steps {
            let outcome = self.step();
            self.commit_snapshot()?;
            if outcome == StepOutcome::Halted {
                return Ok(());
            }
        }

        if self.step_is_halt() {
            self.halted = true;
            self.commit_snapshot()?;
            return Ok(());
        }

        Err(RuntimeError::StepLimitExceeded { limit: max_steps })
    }

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let snapshot = Snapshot {
            grid: self.grid.clone(),
            stack: self.stack.clone(),
            cursor: self.cursor,
            output: self.output.clone(),
            string_mode: self.string_mode,
            halted: self.halted,
            steps: self.steps,
            modified_cells: self.modified_cells.clone(),
        };

        let size = snapshot.estimated_size();
        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage() + size,
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Snapshot the cycle that just ran. If the budget rejects it, roll the
    /// live state back to the last recorded snapshot so it never runs ahead
    /// of `history_position`.
    fn commit_snapshot(&mut self) -> Result<(), RuntimeError> {
        let Err(error) = self.take_snapshot() else {
            return Ok(());
        };

        if let Some(last) = self.snapshot_manager.len().checked_sub(1) {
            self.restore_position(last)?;
        }
        Err(error)
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.grid = snapshot.grid.clone();
        self.stack = snapshot.stack.clone();
        self.cursor = snapshot.cursor;
        self.output = snapshot.output.clone();
        self.string_mode = snapshot.string_mode;
        self.halted = snapshot.halted;
        self.steps = snapshot.steps;
        self.modified_cells = snapshot.modified_cells.clone();
    }

    fn restore_position(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self.snapshot_manager.get(index).cloned().ok_or_else(|| {
            RuntimeError::HistoryOperationFailed {
                message: "Snapshot not found in history".to_string(),
            }
        })?;

        self.history_position = index;
        self.restore_snapshot(&snapshot);
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }

        self.restore_position(self.history_position - 1)
    }

    /// Step forward in execution.
    ///
    /// Replays the next snapshot if one exists; at the end of a recorded
    /// history of a program that has not halted, executes one new cycle and
    /// records it.
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }

        if self.history_position + 1 < self.snapshot_manager.len() {
            return self.restore_position(self.history_position + 1);
        }

        if self.halted {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Program has halted".to_string(),
            });
        }

        self.step();
        self.commit_snapshot()
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }

        self.restore_position(0)
    }

    /// Jump to the last recorded snapshot
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.snapshot_manager.len() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }),
            len => self.restore_position(len - 1),
        }
    }

    // ========== Getter methods for UI ==========

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Output produced so far
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    pub fn output_buffer(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn is_string_mode(&self) -> bool {
        self.string_mode
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Cells rewritten by `p`, keyed by position, valued by step
    pub fn modified_cells(&self) -> &FxHashMap<Cell, usize> {
        &self.modified_cells
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    /// Get snapshot memory usage in bytes
    pub fn snapshot_memory(&self) -> usize {
        self.snapshot_manager.memory_usage()
    }

    /// Consume the interpreter, keeping only its output
    pub fn into_output(self) -> String {
        self.output.into_string()
    }
}

/// Run a program to completion and return its output.
///
/// Empty source yields empty output. A program that never reaches `@` makes
/// this call run forever; use [`interpret_bounded`] to guard against that.
pub fn interpret(source: &str) -> String {
    match Interpreter::new(source) {
        Ok(mut interpreter) => {
            interpreter.run();
            interpreter.into_output()
        }
        Err(_) => String::new(),
    }
}

/// Like [`interpret`], but gives up after `max_steps` cycles
pub fn interpret_bounded(source: &str, max_steps: usize) -> Result<String, RuntimeError> {
    let mut interpreter = match Interpreter::new(source) {
        Ok(interpreter) => interpreter,
        Err(RuntimeError::EmptyProgram) => return Ok(String::new()),
        Err(e) => return Err(e),
    };

    interpreter.run_with_limit(max_steps)?;
    Ok(interpreter.into_output())
}
