//! Grid pane rendering with instruction highlighting
//!
//! This module renders the playfield, coloring each cell by the kind of
//! instruction it holds and marking the cursor.
//!
//! # Features
//!
//! - Per-instruction coloring (digits, arrows, branches, operators, I/O)
//! - Quoted text colored as string literals
//! - Cursor cell highlighted, red once the program has halted
//! - Cells rewritten by `p` underlined, bold if written in the last step
//! - Row numbers; the view scrolls to keep the cursor on screen
//!
//! # Rendering
//!
//! String-mode coloring is a per-row scan for quote pairs. It does not follow
//! the cursor's actual path, so a literal that spans rows or runs vertically
//! is colored as code.

use crate::interpreter::constants::QUOTE;
use crate::interpreter::cursor::Cursor;
use crate::interpreter::dispatch::Instruction;
use crate::memory::grid::Grid;
use crate::snapshot::Cell;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Width of the row number gutter, including the trailing space
const GUTTER: usize = 5;

/// Scroll state for the grid pane
#[derive(Debug, Default)]
pub struct GridScrollState {
    pub row_offset: usize,
    pub col_offset: usize,
    /// Visual row the cursor is held at (None = not initialized yet)
    pub target_row: Option<usize>,
}

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    pub grid: &'a Grid,
    pub cursor: Cursor,
    pub modified_cells: &'a FxHashMap<Cell, usize>,
    pub steps: usize,
    pub is_halted: bool,
    pub is_string_mode: bool,
}

/// Style for a cell outside string literals
fn instruction_style(c: char) -> Style {
    let color = match Instruction::decode(c) {
        Instruction::PushDigit(_) => DEFAULT_THEME.number,
        Instruction::Go(_) => DEFAULT_THEME.arrow,
        Instruction::GoRandom
        | Instruction::HorizontalIf
        | Instruction::VerticalIf
        | Instruction::Trampoline => DEFAULT_THEME.branch,
        Instruction::OutputInt | Instruction::OutputChar | Instruction::Put | Instruction::Get => {
            DEFAULT_THEME.io
        }
        Instruction::Nop => match c {
            '@' => DEFAULT_THEME.error,
            '"' => DEFAULT_THEME.string,
            _ => DEFAULT_THEME.comment,
        },
        _ => DEFAULT_THEME.operator,
    };

    Style::default().fg(color)
}

/// Displayable form of a cell; control characters written by `p` show as a dot
fn display_char(c: char) -> char {
    if c.is_control() {
        '·'
    } else {
        c
    }
}

/// Styles for one row, before cursor and modification overlays
fn highlight_row(row: &[char]) -> Vec<Style> {
    let mut in_string = false;

    row.iter()
        .map(|&c| {
            if c == QUOTE {
                in_string = !in_string;
                Style::default().fg(DEFAULT_THEME.string)
            } else if in_string {
                Style::default().fg(DEFAULT_THEME.string)
            } else {
                instruction_style(c)
            }
        })
        .collect()
}

/// Adjust an offset so that `position` lies within `[offset, offset + visible)`
fn keep_visible(offset: usize, position: usize, visible: usize) -> usize {
    if position < offset {
        position
    } else if position >= offset + visible {
        position + 1 - visible
    } else {
        offset
    }
}

/// Render the grid pane
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    data: GridRenderData,
    is_focused: bool,
    scroll_state: &mut GridScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = format!(
        " Grid {}×{} {} ",
        data.grid.rows(),
        data.grid.cols(),
        data.cursor.direction.arrow()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_rows = data.grid.rows();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    let visible_width = (area.width.saturating_sub(2) as usize)
        .saturating_sub(GUTTER)
        .max(1);

    // Initialize target row to center if not set
    if scroll_state.target_row.is_none() {
        scroll_state.target_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_row = Some(target_row);

    // Keep the cursor row at the target visual row
    scroll_state.row_offset = data.cursor.row.saturating_sub(target_row);
    if total_rows > visible_height {
        scroll_state.row_offset = scroll_state.row_offset.min(total_rows - visible_height);
    } else {
        scroll_state.row_offset = 0;
    }

    scroll_state.col_offset = keep_visible(scroll_state.col_offset, data.cursor.col, visible_width);

    let cursor_style = if data.is_halted {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if data.is_string_mode {
        Style::default()
            .bg(DEFAULT_THEME.string)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.cursor_bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };

    let visible_lines: Vec<Line> = (scroll_state.row_offset..total_rows)
        .take(visible_height)
        .map(|row_idx| {
            let row = data.grid.row(row_idx);
            let styles = highlight_row(row);
            let is_cursor_row = row_idx == data.cursor.row;

            let num_style = if is_cursor_row {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", row_idx), num_style)];

            for (col_idx, (&c, &style)) in row
                .iter()
                .zip(styles.iter())
                .enumerate()
                .skip(scroll_state.col_offset)
                .take(visible_width)
            {
                let mut style = style;

                if is_cursor_row {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }

                if let Some(&written_at) = data.modified_cells.get(&(row_idx, col_idx)) {
                    style = style
                        .fg(DEFAULT_THEME.modified)
                        .add_modifier(Modifier::UNDERLINED);
                    if written_at == data.steps {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                }

                if is_cursor_row && col_idx == data.cursor.col {
                    style = cursor_style;
                }

                spans.push(Span::styled(display_char(c).to_string(), style));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_visible() {
        assert_eq!(keep_visible(0, 3, 10), 0);
        assert_eq!(keep_visible(0, 12, 10), 3);
        assert_eq!(keep_visible(5, 2, 10), 2);
    }

    #[test]
    fn test_quoted_text_is_string_colored() {
        let row: Vec<char> = "1\"1\"1".chars().collect();
        let styles = highlight_row(&row);
        assert_eq!(styles[0].fg, Some(DEFAULT_THEME.number));
        assert_eq!(styles[2].fg, Some(DEFAULT_THEME.string));
        assert_eq!(styles[4].fg, Some(DEFAULT_THEME.number));
    }
}
