use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub string: Color,
    pub arrow: Color,      // Direction changes
    pub branch: Color,     // _ | ? #
    pub operator: Color,   // Arithmetic and stack ops
    pub io: Color,         // . , p g
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub cursor_bg: Color,
    pub modified: Color, // Cells rewritten by `p`
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),         // Orange for digits
    string: Color::Rgb(166, 227, 161),         // Green for quoted text
    arrow: Color::Rgb(137, 180, 250),          // Blue for > < ^ v
    branch: Color::Rgb(249, 226, 175),         // Yellow for conditionals
    operator: Color::Rgb(148, 226, 213),       // Cyan/teal for operators
    io: Color::Rgb(245, 194, 231),             // Pink for output and p/g
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    cursor_bg: Color::Rgb(250, 179, 135),
    modified: Color::Rgb(243, 139, 168),
};
