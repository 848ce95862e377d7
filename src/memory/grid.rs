//! Playfield storage
//!
//! The [`Grid`] is the program's code and its only addressable data store.
//! It is built once from source text and afterwards only changes through the
//! `p` instruction.
//!
//! # Shape
//!
//! The source is split on CRLF, bare CR and bare LF. Every row is padded on
//! the right with spaces to the length of the longest row, so the grid is
//! always a true rectangle:
//!
//! ```text
//! "v@\n>^"      →   [v][@]
//!                   [>][^]
//! "12\n3"       →   [1][2]
//!                   [3][ ]
//! ```
//!
//! [`Grid::get`] and [`Grid::set`] take coordinates that are already inside
//! the rectangle. Callers that hold arbitrary signed coordinates go through
//! [`Grid::wrap`] first.

/// Cell value used to pad short rows
pub const BLANK: char = ' ';

/// Rectangular character memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    cols: usize,
}

impl Grid {
    /// Build a grid from program source.
    ///
    /// Returns `None` for empty source; there is nothing to execute.
    pub fn from_source(source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }

        let lines = split_lines(source);
        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            // A source made only of line breaks still needs one column to read
            .max(1);

        let cells = lines
            .iter()
            .map(|line| {
                let mut row: Vec<char> = line.chars().collect();
                row.resize(cols, BLANK);
                row
            })
            .collect();

        Some(Grid { cells, cols })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (length of the longest source line)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read the cell at an in-range position
    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row][col]
    }

    /// Overwrite the cell at an in-range position
    pub fn set(&mut self, row: usize, col: usize, value: char) {
        self.cells[row][col] = value;
    }

    /// Map arbitrary signed coordinates onto the torus
    pub fn wrap(&self, row: i64, col: i64) -> (usize, usize) {
        (
            row.rem_euclid(self.rows() as i64) as usize,
            col.rem_euclid(self.cols as i64) as usize,
        )
    }

    /// Get one row of cells (for UI display)
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row]
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.rows() * self.cols
    }
}

/// Split source text on CRLF, CR or LF without keeping the separators.
///
/// Unlike [`str::lines`], a trailing break yields a final empty line and a
/// lone `\r` is a break of its own.
fn split_lines(source: &str) -> Vec<&str> {
    let bytes = source.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&source[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    lines.push(&source[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_rows(grid: &Grid) -> Vec<String> {
        (0..grid.rows())
            .map(|r| grid.row(r).iter().collect())
            .collect()
    }

    #[test]
    fn test_empty_source_has_no_grid() {
        assert!(Grid::from_source("").is_none());
    }

    #[test]
    fn test_single_line() {
        let grid = Grid::from_source("12+.@").unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.get(0, 2), '+');
    }

    #[test]
    fn test_short_rows_are_padded() {
        let grid = Grid::from_source("abc\nd\nef").unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(text_rows(&grid), vec!["abc", "d  ", "ef "]);
    }

    #[test]
    fn test_line_break_forms() {
        let lf = Grid::from_source("ab\ncd").unwrap();
        let cr = Grid::from_source("ab\rcd").unwrap();
        let crlf = Grid::from_source("ab\r\ncd").unwrap();

        assert_eq!(lf, cr);
        assert_eq!(lf, crlf);
        assert_eq!(crlf.rows(), 2);
    }

    #[test]
    fn test_mixed_breaks_and_trailing_newline() {
        let grid = Grid::from_source("a\r\nb\rc\n").unwrap();
        assert_eq!(text_rows(&grid), vec!["a", "b", "c", " "]);
    }

    #[test]
    fn test_only_line_breaks_gets_one_column() {
        let grid = Grid::from_source("\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.get(1, 0), BLANK);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::from_source("...\n...").unwrap();
        grid.set(1, 2, '@');
        assert_eq!(grid.get(1, 2), '@');
        assert_eq!(grid.row(1), &['.', '.', '@']);
    }

    #[test]
    fn test_wrap_is_toroidal() {
        let grid = Grid::from_source("abcd\nefgh\nijkl").unwrap();
        assert_eq!(grid.wrap(0, 0), (0, 0));
        assert_eq!(grid.wrap(3, 4), (0, 0));
        assert_eq!(grid.wrap(-1, -1), (2, 3));
        assert_eq!(grid.wrap(7, -9), (1, 3));
    }

    #[test]
    fn test_wide_characters_count_as_one_cell() {
        let grid = Grid::from_source("é@\nx").unwrap();
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(0, 1), '@');
    }
}
