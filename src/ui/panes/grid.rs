//! Grid pane for path-search snapshots
//!
//! Each node is drawn as a two-column cell colored by its
//! [`NodeType`](crate::model::grid::NodeType). The edit cursor, when shown, is
//! drawn as `[]` on top of the cell color.

use crate::model::grid::{Coord, Grid};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the grid, optionally highlighting the edit cursor
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    grid: &Grid,
    cursor: Option<Coord>,
    title: &str,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let lines: Vec<Line> = grid
        .nodes()
        .chunks(grid.cols())
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|node| {
                    let bg = DEFAULT_THEME.node_color(node.kind);
                    if cursor == Some(node.coord) {
                        Span::styled(
                            "[]",
                            Style::default()
                                .bg(bg)
                                .fg(DEFAULT_THEME.cursor)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled("  ", Style::default().bg(bg))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
