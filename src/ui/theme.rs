use crate::model::element::ElementState;
use crate::model::grid::NodeType;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar_default: Color,
    pub comparing: Color,
    pub swapping: Color,
    pub current: Color,
    pub pivot: Color,
    pub sorted: Color,
    pub cell_empty: Color,
    pub cell_wall: Color,
    pub cell_start: Color,
    pub cell_end: Color,
    pub cell_visited: Color,
    pub cell_path: Color,
    pub cursor: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for status bar
    bar_default: Color::Rgb(137, 180, 250),    // Blue
    comparing: Color::Rgb(249, 226, 175),      // Yellow
    swapping: Color::Rgb(243, 139, 168),       // Red
    current: Color::Rgb(148, 226, 213),        // Teal
    pivot: Color::Rgb(203, 166, 247),          // Mauve
    sorted: Color::Rgb(166, 227, 161),         // Green
    cell_empty: Color::Rgb(49, 50, 68),
    cell_wall: Color::Rgb(147, 153, 178),
    cell_start: Color::Rgb(166, 227, 161),
    cell_end: Color::Rgb(243, 139, 168),
    cell_visited: Color::Rgb(116, 199, 236),
    cell_path: Color::Rgb(249, 226, 175),
    cursor: Color::Rgb(245, 194, 231), // Pink
};

impl Theme {
    pub fn element_color(&self, state: ElementState) -> Color {
        match state {
            ElementState::Default => self.bar_default,
            ElementState::Comparing => self.comparing,
            ElementState::Swapping => self.swapping,
            ElementState::Current => self.current,
            ElementState::Pivot => self.pivot,
            ElementState::Sorted => self.sorted,
        }
    }

    pub fn node_color(&self, kind: NodeType) -> Color {
        match kind {
            NodeType::Empty => self.cell_empty,
            NodeType::Wall => self.cell_wall,
            NodeType::Start => self.cell_start,
            NodeType::End => self.cell_end,
            NodeType::Visited => self.cell_visited,
            NodeType::Path => self.cell_path,
        }
    }
}
