//! Instruction decoding and execution
//!
//! [`Instruction::decode`] maps a grid character to an [`Instruction`];
//! [`Interpreter::execute`] applies it to the stack, grid, cursor and output.
//! The quote and `@` characters never reach this module: the engine handles
//! string mode and halting before dispatch.
//!
//! # Faults
//!
//! No instruction can fail. Missing operands read as zero, division and
//! modulo by zero push zero, arithmetic wraps on overflow, and `p`/`g`
//! coordinates outside the grid wrap around it.

use crate::interpreter::cursor::Direction;
use crate::interpreter::engine::Interpreter;

/// A decoded grid character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0`-`9`
    PushDigit(i32),
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `!`
    Not,
    /// `` ` ``
    GreaterThan,
    /// `>` `<` `^` `v`
    Go(Direction),
    /// `?`
    GoRandom,
    /// `_`
    HorizontalIf,
    /// `|`
    VerticalIf,
    /// `:`
    Duplicate,
    /// `\`
    Swap,
    /// `$`
    Discard,
    /// `.`
    OutputInt,
    /// `,`
    OutputChar,
    /// `#`
    Trampoline,
    /// `p`
    Put,
    /// `g`
    Get,
    /// Anything else, including space
    Nop,
}

impl Instruction {
    pub fn decode(c: char) -> Self {
        match c {
            '0'..='9' => Instruction::PushDigit(c as i32 - '0' as i32),
            '+' => Instruction::Add,
            '-' => Instruction::Subtract,
            '*' => Instruction::Multiply,
            '/' => Instruction::Divide,
            '%' => Instruction::Modulo,
            '!' => Instruction::Not,
            '`' => Instruction::GreaterThan,
            '>' => Instruction::Go(Direction::Right),
            '<' => Instruction::Go(Direction::Left),
            '^' => Instruction::Go(Direction::Up),
            'v' => Instruction::Go(Direction::Down),
            '?' => Instruction::GoRandom,
            '_' => Instruction::HorizontalIf,
            '|' => Instruction::VerticalIf,
            ':' => Instruction::Duplicate,
            '\\' => Instruction::Swap,
            '$' => Instruction::Discard,
            '.' => Instruction::OutputInt,
            ',' => Instruction::OutputChar,
            '#' => Instruction::Trampoline,
            'p' => Instruction::Put,
            'g' => Instruction::Get,
            _ => Instruction::Nop,
        }
    }
}

/// Character for a stack value; invalid code points become U+FFFD
fn to_char(value: i32) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl Interpreter {
    /// Apply one instruction to the machine state
    pub(crate) fn execute(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::PushDigit(digit) => self.stack.push(digit),
            Instruction::Add => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(a.wrapping_add(b));
            }
            Instruction::Subtract => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(b.wrapping_sub(a));
            }
            Instruction::Multiply => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(a.wrapping_mul(b));
            }
            Instruction::Divide => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(if a == 0 { 0 } else { b.wrapping_div(a) });
            }
            Instruction::Modulo => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(if a == 0 { 0 } else { b.wrapping_rem(a) });
            }
            Instruction::Not => {
                let a = self.stack.pop();
                self.stack.push((a == 0) as i32);
            }
            Instruction::GreaterThan => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push((b > a) as i32);
            }
            Instruction::Go(direction) => self.cursor.set_direction(direction),
            Instruction::GoRandom => {
                let direction = Direction::random(&mut self.rng);
                self.cursor.set_direction(direction);
            }
            Instruction::HorizontalIf => {
                let direction = if self.stack.pop() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
                self.cursor.set_direction(direction);
            }
            Instruction::VerticalIf => {
                let direction = if self.stack.pop() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                self.cursor.set_direction(direction);
            }
            Instruction::Duplicate => {
                let top = self.stack.peek();
                self.stack.push(top);
            }
            Instruction::Swap => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                // Two zeros are dropped rather than pushed back
                if a != 0 || b != 0 {
                    self.stack.push(a);
                    self.stack.push(b);
                }
            }
            Instruction::Discard => {
                self.stack.pop();
            }
            Instruction::OutputInt => {
                let value = self.stack.pop();
                self.output.print(&value.to_string(), self.steps + 1);
            }
            Instruction::OutputChar => {
                let value = self.stack.pop();
                let mut buf = [0u8; 4];
                self.output
                    .print(to_char(value).encode_utf8(&mut buf), self.steps + 1);
            }
            Instruction::Trampoline => self.advance(),
            Instruction::Put => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let v = self.stack.pop();
                let (row, col) = self.grid.wrap(y as i64, x as i64);
                self.grid.set(row, col, to_char(v));
                self.modified_cells.insert((row, col), self.steps + 1);
            }
            Instruction::Get => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let (row, col) = self.grid.wrap(y as i64, x as i64);
                self.stack.push(self.grid.get(row, col) as i32);
            }
            Instruction::Nop => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Interpreter over a blank 3×4 grid with the given stack, bottom first
    fn machine(stack: &[i32]) -> Interpreter {
        let mut interpreter = Interpreter::with_seed("    \n    \n    ", 7).unwrap();
        for &value in stack {
            interpreter.stack.push(value);
        }
        interpreter
    }

    fn after(stack: &[i32], instruction: Instruction) -> Vec<i32> {
        let mut interpreter = machine(stack);
        interpreter.execute(instruction);
        interpreter.stack().values().to_vec()
    }

    #[test]
    fn test_decode_digits_and_nop() {
        assert_eq!(Instruction::decode('0'), Instruction::PushDigit(0));
        assert_eq!(Instruction::decode('9'), Instruction::PushDigit(9));
        assert_eq!(Instruction::decode(' '), Instruction::Nop);
        assert_eq!(Instruction::decode('x'), Instruction::Nop);
        assert_eq!(Instruction::decode('V'), Instruction::Nop);
        assert_eq!(Instruction::decode('v'), Instruction::Go(Direction::Down));
    }

    #[test]
    fn test_arithmetic_operand_order() {
        assert_eq!(after(&[7, 3], Instruction::Add), vec![10]);
        assert_eq!(after(&[7, 3], Instruction::Subtract), vec![4]);
        assert_eq!(after(&[7, 3], Instruction::Multiply), vec![21]);
        assert_eq!(after(&[7, 3], Instruction::Divide), vec![2]);
        assert_eq!(after(&[7, 3], Instruction::Modulo), vec![1]);
        assert_eq!(after(&[-7, 2], Instruction::Divide), vec![-3]);
    }

    #[test]
    fn test_arithmetic_on_empty_stack() {
        assert_eq!(after(&[], Instruction::Add), vec![0]);
        assert_eq!(after(&[], Instruction::Subtract), vec![0]);
        assert_eq!(after(&[5], Instruction::Subtract), vec![-5]);
        assert_eq!(after(&[], Instruction::Multiply), vec![0]);
    }

    #[test]
    fn test_division_by_zero_pushes_zero() {
        assert_eq!(after(&[9, 0], Instruction::Divide), vec![0]);
        assert_eq!(after(&[9, 0], Instruction::Modulo), vec![0]);
        assert_eq!(after(&[], Instruction::Divide), vec![0]);
        assert_eq!(after(&[4, 9, 0], Instruction::Modulo), vec![4, 0]);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(after(&[i32::MAX, 1], Instruction::Add), vec![i32::MIN]);
        assert_eq!(after(&[i32::MIN, -1], Instruction::Divide), vec![i32::MIN]);
        assert_eq!(after(&[i32::MIN, -1], Instruction::Modulo), vec![0]);
    }

    #[test]
    fn test_logic() {
        assert_eq!(after(&[0], Instruction::Not), vec![1]);
        assert_eq!(after(&[5], Instruction::Not), vec![0]);
        assert_eq!(after(&[], Instruction::Not), vec![1]);
        assert_eq!(after(&[5, 3], Instruction::GreaterThan), vec![1]);
        assert_eq!(after(&[3, 5], Instruction::GreaterThan), vec![0]);
        assert_eq!(after(&[4, 4], Instruction::GreaterThan), vec![0]);
    }

    #[test]
    fn test_stack_manipulation() {
        assert_eq!(after(&[1, 2], Instruction::Duplicate), vec![1, 2, 2]);
        assert_eq!(after(&[], Instruction::Duplicate), vec![0]);
        assert_eq!(after(&[1, 2], Instruction::Discard), vec![1]);
        assert_eq!(after(&[], Instruction::Discard), Vec::<i32>::new());
    }

    #[test]
    fn test_swap() {
        assert_eq!(after(&[1, 2], Instruction::Swap), vec![2, 1]);
        assert_eq!(after(&[7], Instruction::Swap), vec![7, 0]);
        assert_eq!(after(&[0, 3], Instruction::Swap), vec![3, 0]);
    }

    #[test]
    fn test_swap_drops_double_zero() {
        assert_eq!(after(&[0, 0], Instruction::Swap), Vec::<i32>::new());
        assert_eq!(after(&[5, 0, 0], Instruction::Swap), vec![5]);
        assert_eq!(after(&[], Instruction::Swap), Vec::<i32>::new());
    }

    #[test]
    fn test_conditionals() {
        let mut m = machine(&[0]);
        m.execute(Instruction::HorizontalIf);
        assert_eq!(m.cursor().direction, Direction::Right);

        let mut m = machine(&[3]);
        m.execute(Instruction::HorizontalIf);
        assert_eq!(m.cursor().direction, Direction::Left);

        let mut m = machine(&[]);
        m.execute(Instruction::VerticalIf);
        assert_eq!(m.cursor().direction, Direction::Down);

        let mut m = machine(&[-1]);
        m.execute(Instruction::VerticalIf);
        assert_eq!(m.cursor().direction, Direction::Up);
    }

    #[test]
    fn test_output() {
        let mut m = machine(&[72, 105, -12]);
        m.execute(Instruction::OutputInt);
        m.execute(Instruction::OutputChar);
        m.execute(Instruction::OutputChar);
        assert_eq!(m.output(), "-12iH");
    }

    #[test]
    fn test_output_invalid_code_point() {
        let mut m = machine(&[-1]);
        m.execute(Instruction::OutputChar);
        assert_eq!(m.output(), "\u{FFFD}");
    }

    #[test]
    fn test_trampoline_moves_one_cell() {
        let mut m = machine(&[]);
        m.execute(Instruction::Trampoline);
        assert_eq!((m.cursor().row, m.cursor().col), (0, 1));
    }

    #[test]
    fn test_put_addresses_row_then_column() {
        // v = 'A', x = 3, y = 1
        let mut m = machine(&[65, 3, 1]);
        m.execute(Instruction::Put);
        assert_eq!(m.grid().get(1, 3), 'A');
        assert!(m.stack().is_empty());
        assert!(m.modified_cells().contains_key(&(1, 3)));
    }

    #[test]
    fn test_get_reads_row_then_column() {
        let mut m = machine(&[]);
        m.grid.set(2, 1, 'z');
        m.stack.push(1); // x
        m.stack.push(2); // y
        m.execute(Instruction::Get);
        assert_eq!(m.stack().values(), &['z' as i32]);
    }

    #[test]
    fn test_put_and_get_wrap_out_of_range() {
        // x = 5 → 1 in a 4-wide grid, y = -1 → 2 in a 3-tall grid
        let mut m = machine(&[66, 5, -1]);
        m.execute(Instruction::Put);
        assert_eq!(m.grid().get(2, 1), 'B');

        m.stack.push(-3); // x → 1
        m.stack.push(5); // y → 2
        m.execute(Instruction::Get);
        assert_eq!(m.stack().values(), &[66]);
    }

    #[test]
    fn test_get_on_empty_stack_reads_origin() {
        let mut m = machine(&[]);
        m.grid.set(0, 0, '#');
        m.execute(Instruction::Get);
        assert_eq!(m.stack().values(), &['#' as i32]);
    }

    #[test]
    fn test_random_direction_is_cardinal() {
        let mut m = machine(&[]);
        for _ in 0..32 {
            m.execute(Instruction::GoRandom);
            let (dr, dc) = m.cursor().direction.delta();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }

    #[test]
    fn test_nop_changes_nothing() {
        let mut m = machine(&[4]);
        let before = m.cursor();
        m.execute(Instruction::Nop);
        assert_eq!(m.cursor(), before);
        assert_eq!(m.stack().values(), &[4]);
    }
}
