//! Run information pane: algorithm, lifecycle state, trace position and legend

use crate::engine::scheduler::RunState;
use crate::model::element::ElementState;
use crate::model::grid::NodeType;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use std::time::Duration;

/// Which legend to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    Elements,
    Nodes,
}

/// Data needed to render the info pane
pub struct InfoRenderData<'a> {
    pub algorithm: &'a str,
    pub state: RunState,
    pub step: usize,
    pub last_step: Option<usize>,
    pub dropped: usize,
    pub delay: Duration,
    pub legend: Legend,
}

fn state_color(state: RunState) -> Color {
    match state {
        RunState::Idle => DEFAULT_THEME.comment,
        RunState::Running => DEFAULT_THEME.secondary,
        RunState::Completed => DEFAULT_THEME.success,
        RunState::Cancelled => DEFAULT_THEME.error,
    }
}

fn field<'a>(label: &'a str, value: String, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, value_style),
    ])
}

fn swatch(label: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default().bg(color)),
        Span::styled(format!(" {}", label), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the info pane
pub fn render_info_pane(frame: &mut Frame, area: Rect, data: InfoRenderData) {
    let block = Block::default()
        .title(" Run ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let plain = Style::default().fg(DEFAULT_THEME.fg);
    let step_text = match data.last_step {
        Some(last) => format!("{}/{}", data.step, last),
        None => data.step.to_string(),
    };

    let mut lines = vec![
        field(
            "algorithm",
            data.algorithm.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        field(
            "state",
            data.state.to_string(),
            Style::default()
                .fg(state_color(data.state))
                .add_modifier(Modifier::BOLD),
        ),
        field("step", step_text, plain),
        field("delay", format!("{} ms", data.delay.as_millis()), plain),
    ];
    if data.dropped > 0 {
        lines.push(field(
            "evicted",
            format!("{} step(s)", data.dropped),
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
    }

    lines.push(Line::default());
    match data.legend {
        Legend::Elements => {
            for state in ElementState::ALL {
                lines.push(swatch(state.label(), DEFAULT_THEME.element_color(state)));
            }
        }
        Legend::Nodes => {
            for kind in [
                NodeType::Empty,
                NodeType::Wall,
                NodeType::Start,
                NodeType::End,
                NodeType::Visited,
                NodeType::Path,
            ] {
                lines.push(swatch(kind.label(), DEFAULT_THEME.node_color(kind)));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
