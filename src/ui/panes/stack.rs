//! Stack pane rendering
//!
//! Shows the operand stack top-first. Each entry lists its depth, its
//! integer value and, when the value is a printable code point, the
//! character it stands for.

use crate::memory::stack::Stack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the stack pane
#[derive(Debug, Default)]
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Character annotation for a stack value, if it is printable
fn char_annotation(value: i32) -> Option<String> {
    let c = u32::try_from(value).ok().and_then(char::from_u32)?;
    match c {
        ' ' => Some("' '".to_string()),
        '\n' => Some("'\\n'".to_string()),
        c if c.is_control() => None,
        c => Some(format!("'{}'", c)),
    }
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &Stack,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Stack ({}) ", stack.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if stack.is_empty() {
        scroll_state.offset = 0;
        scroll_state.prev_item_count = 0;
        let paragraph = Paragraph::new("(empty, pops read 0)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize;

    let all_items: Vec<ListItem> = stack
        .values()
        .iter()
        .rev()
        .enumerate()
        .map(|(depth, &value)| {
            let is_top = depth == 0;
            let index_str = format!("{:4} ", depth);
            let value_str = value.to_string();
            let annotation = char_annotation(value).unwrap_or_default();

            // Right-align the character annotation
            let left_width = index_str.len() + value_str.len();
            let padding = content_width.saturating_sub(left_width + annotation.chars().count());

            let value_style = if is_top {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(index_str, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value_str, value_style),
                Span::raw(" ".repeat(padding)),
                Span::styled(annotation, Style::default().fg(DEFAULT_THEME.string)),
            ]))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Snap back to the top when the stack changes size
    if total_items != scroll_state.prev_item_count {
        scroll_state.offset = 0;
        scroll_state.prev_item_count = total_items;
    }

    if total_items > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_items - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
