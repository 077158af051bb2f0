//! Bar chart pane for array snapshots
//!
//! Each element is one bar whose height is its value and whose color is its
//! [`ElementState`](crate::model::element::ElementState) tag. Bar width and gap
//! shrink with the element count so the whole array fits when possible; wider
//! arrays are clipped on the right.

use crate::model::element::Element;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Render the array as vertical bars
pub fn render_bars_pane(frame: &mut Frame, area: Rect, elements: &[Element], title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if elements.is_empty() {
        let paragraph = Paragraph::new("(empty array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize; // borders
    let (bar_width, bar_gap) = bar_layout(inner_width, elements.len());

    let bars: Vec<Bar> = elements
        .iter()
        .map(|element| {
            let color = DEFAULT_THEME.element_color(element.state);
            Bar::default()
                .value(element.value.max(0) as u64)
                .text_value(if bar_width >= 3 {
                    element.value.to_string()
                } else {
                    String::new()
                })
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    let max = elements.iter().map(|e| e.value.max(0) as u64).max().unwrap_or(0);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(max.max(1));

    frame.render_widget(chart, area);
}

/// Pick the widest bars (and a 1-column gap when there is room) that fit `count` bars
fn bar_layout(width: usize, count: usize) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let with_gap = (width + 1) / count;
    if with_gap >= 3 {
        ((with_gap - 1).min(u16::MAX as usize) as u16, 1)
    } else {
        ((width / count).max(1) as u16, 0)
    }
}
