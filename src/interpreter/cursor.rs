//! Instruction pointer
//!
//! The [`Cursor`] holds a position on the grid and one of four cardinal
//! [`Direction`]s. Only [`Cursor::advance`] moves it; control-flow
//! instructions change the direction.

use crate::memory::repeat;
use rand::Rng;

/// Cardinal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Unit vector as (Δrow, Δcol)
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// Pick a direction uniformly at random.
    ///
    /// The axis is chosen first, then the sign along it; each stage is a fair
    /// coin, so each of the four directions has probability 1/4.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vertical = rng.gen_bool(0.5);
        let positive = rng.gen_bool(0.5);
        match (vertical, positive) {
            (true, true) => Direction::Down,
            (true, false) => Direction::Up,
            (false, true) => Direction::Right,
            (false, false) => Direction::Left,
        }
    }

    /// Glyph used by the grid pane
    pub fn arrow(self) -> char {
        match self {
            Direction::Right => '→',
            Direction::Left => '←',
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }
}

/// Position and heading of the instruction pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Cursor {
    /// Cursor at the top-left cell, facing right
    pub fn new() -> Self {
        Cursor::default()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move one cell along the current direction, wrapping each axis
    /// independently within a `rows × cols` grid.
    pub fn advance(&mut self, rows: usize, cols: usize) {
        let (d_row, d_col) = self.direction.delta();
        self.row = repeat(self.row as i64 + d_row, 0, rows as i64 - 1) as usize;
        self.col = repeat(self.col as i64 + d_col, 0, cols as i64 - 1) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(row: usize, col: usize, direction: Direction) -> Cursor {
        Cursor {
            row,
            col,
            direction,
        }
    }

    #[test]
    fn test_starts_top_left_facing_right() {
        assert_eq!(Cursor::new(), at(0, 0, Direction::Right));
    }

    #[test]
    fn test_advance_inside_grid() {
        let mut cursor = at(1, 1, Direction::Down);
        cursor.advance(3, 3);
        assert_eq!((cursor.row, cursor.col), (2, 1));
    }

    #[test]
    fn test_wraps_at_all_four_edges() {
        let mut right = at(1, 4, Direction::Right);
        right.advance(3, 5);
        assert_eq!((right.row, right.col), (1, 0));

        let mut left = at(1, 0, Direction::Left);
        left.advance(3, 5);
        assert_eq!((left.row, left.col), (1, 4));

        let mut up = at(0, 2, Direction::Up);
        up.advance(3, 5);
        assert_eq!((up.row, up.col), (2, 2));

        let mut down = at(2, 2, Direction::Down);
        down.advance(3, 5);
        assert_eq!((down.row, down.col), (0, 2));
    }

    #[test]
    fn test_single_cell_grid_stays_put() {
        let mut cursor = at(0, 0, Direction::Left);
        cursor.advance(1, 1);
        assert_eq!((cursor.row, cursor.col), (0, 0));
    }

    #[test]
    fn test_random_direction_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(0xbef0);
        let samples = 40_000;
        let mut counts = [0usize; 4];

        for _ in 0..samples {
            let idx = match Direction::random(&mut rng) {
                Direction::Right => 0,
                Direction::Left => 1,
                Direction::Up => 2,
                Direction::Down => 3,
            };
            counts[idx] += 1;
        }

        for count in counts {
            // Expect 10_000 each; allow 5%
            assert!(
                (9_500..=10_500).contains(&count),
                "skewed distribution: {:?}",
                counts
            );
        }
    }
}
