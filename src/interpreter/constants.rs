// Constants for the Befunge interpreter

/// Snapshot history budget used by the binary (256 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 256 * 1024 * 1024;

/// Steps recorded for the TUI when `--steps` is not given.
/// Programs may loop forever, so recording always needs a bound.
pub const DEFAULT_RECORD_STEPS: usize = 10_000;

/// Delay between steps while the TUI is auto-playing
pub const AUTOPLAY_INTERVAL_MS: u64 = 250;

/// Halt instruction
pub const HALT: char = '@';

/// String mode toggle
pub const QUOTE: char = '"';
