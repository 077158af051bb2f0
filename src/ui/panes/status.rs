//! Status bar rendering with keybindings and state indicators

use crate::engine::scheduler::RunState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub state: RunState,
    pub grid_mode: bool,
    pub at_start: bool,
    pub at_end: bool,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let badge_bg = match data.state {
        RunState::Running => DEFAULT_THEME.secondary,
        RunState::Cancelled => DEFAULT_THEME.error,
        RunState::Completed => DEFAULT_THEME.success,
        RunState::Idle => DEFAULT_THEME.primary,
    };

    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.state.to_string().to_uppercase()),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings: &[(&str, &str)] = if data.state == RunState::Running {
        &[(" esc ", " cancel "), (" q ", " quit ")]
    } else if data.grid_mode {
        &[
            (" ↵ ", " run "),
            (" hjkl ", " move "),
            (" w ", " wall "),
            (" v ", " column "),
            (" x ", " clear "),
            (" ←/→ ", " scrub "),
            (" r ", " reset "),
            (" 1-5 ", " sort "),
            (" q ", " quit "),
        ]
    } else {
        &[
            (" ↵ ", " run "),
            (" 1-5 ", " algo "),
            (" g ", " grid "),
            (" n ", " new "),
            (" +/- ", " speed "),
            (" ←/→ ", " scrub "),
            (" r ", " reset "),
            (" q ", " quit "),
        ]
    };

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    // Show position indicators while scrubbing a finished run
    if data.state.is_terminal() {
        if data.at_end {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(
                " END ",
                Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ));
        } else if data.at_start {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(
                " START ",
                Style::default()
                    .bg(DEFAULT_THEME.success)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
