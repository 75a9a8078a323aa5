//! Pane rendering for the algotty TUI
//!
//! All render functions are stateless apart from the log pane's scroll
//! offset, which the caller owns (set to `usize::MAX` to snap to the
//! bottom).

use crate::drivers::{Algorithm, DriverParams};
use crate::engine::RunStatus;
use crate::ui::theme::DEFAULT_THEME;
use crate::vis::VisState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the working array as a bar chart, colored by marker
pub fn render_array_pane(frame: &mut Frame, area: Rect, vis: &VisState, algorithm: Algorithm) {
    let title = if algorithm.input_is_chain() {
        " Next pointers "
    } else {
        " Array "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if vis.values.is_empty() {
        let paragraph = Paragraph::new("(empty array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Shrink bars until the whole array fits the pane width
    let inner_width = area.width.saturating_sub(2) as usize;
    let n = vis.values.len();
    let bar_width = ((inner_width.saturating_sub(n)) / n).clamp(1, 3) as u16;

    let bars: Vec<Bar> = vis
        .values
        .iter()
        .zip(vis.markers.iter())
        .enumerate()
        .map(|(i, (&value, &marker))| {
            let color = DEFAULT_THEME.marker_color(marker);
            Bar::default()
                .value(value.max(0) as u64)
                .text_value(value.to_string())
                .label(Line::from(i.to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

/// Render the scrollable step log (one line per checkpoint)
pub fn render_log_pane(frame: &mut Frame, area: Rect, vis: &VisState, scroll_offset: &mut usize) {
    let block = Block::default()
        .title(" Step log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if vis.log.is_empty() {
        let paragraph = Paragraph::new("(no steps yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = vis.log.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = vis
        .log
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, line)| {
            // The most recent step stands out; older ones fade
            let style = if i + 1 == total_items {
                Style::default().fg(DEFAULT_THEME.fg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(format!("{:>4}  {}", i + 1, line)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Render the info pane: algorithm, parameters, counters, outcome, legend
pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    vis: &VisState,
    algorithm: Algorithm,
    params: DriverParams,
    speed_ms: u64,
    status: RunStatus,
) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let status_span = match status {
        RunStatus::Idle => Span::styled("Idle", Style::default().fg(DEFAULT_THEME.comment)),
        RunStatus::Running => Span::styled(
            "Running",
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        RunStatus::Paused => Span::styled("Paused", Style::default().fg(DEFAULT_THEME.secondary)),
        RunStatus::Completed => Span::styled(
            "Completed",
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ),
        RunStatus::Cancelled => Span::styled("Cancelled", Style::default().fg(DEFAULT_THEME.error)),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            algorithm.title(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            algorithm.description(),
            Style::default().fg(DEFAULT_THEME.comment),
        )),
        Line::default(),
        Line::from(vec![Span::raw("Status: "), status_span]),
        Line::from(format!("Speed:  {} ms/step", speed_ms)),
    ];
    if algorithm.uses_target() {
        lines.push(Line::from(format!("Target: {}", params.target)));
    }
    if algorithm.uses_window() {
        lines.push(Line::from(format!("Window: {}", params.window)));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!("Steps:       {}", vis.steps())));
    lines.push(Line::from(format!("Comparisons: {}", vis.comparisons)));
    lines.push(Line::from(format!("Writes:      {}", vis.writes)));
    lines.push(Line::default());
    if let Some(outcome) = &vis.outcome {
        lines.push(Line::from(Span::styled(
            outcome.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    // Legend
    let legend = [
        ("compare", DEFAULT_THEME.compare),
        ("swap/write", DEFAULT_THEME.swap),
        ("pivot", DEFAULT_THEME.pivot),
        ("pointer", DEFAULT_THEME.pointer),
        ("range/window", DEFAULT_THEME.window),
        ("sorted/found", DEFAULT_THEME.sorted),
        ("discarded", DEFAULT_THEME.discarded),
    ];
    for (label, color) in legend {
        lines.push(Line::from(vec![
            Span::styled("\u{25a0} ", Style::default().fg(color)),
            Span::styled(label, Style::default().fg(DEFAULT_THEME.comment)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(DEFAULT_THEME.fg))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    step: usize,
    status: RunStatus,
) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let step_bg = match status {
        RunStatus::Running => DEFAULT_THEME.primary,
        RunStatus::Paused => DEFAULT_THEME.secondary,
        RunStatus::Completed => DEFAULT_THEME.success,
        RunStatus::Cancelled => DEFAULT_THEME.error,
        RunStatus::Idle => DEFAULT_THEME.comment,
    };

    let left_spans = vec![
        Span::styled(
            format!(" Step {} ", step),
            Style::default()
                .bg(step_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(message, Style::default().fg(DEFAULT_THEME.fg)),
    ];
    let left = Paragraph::new(Line::from(left_spans)).alignment(Alignment::Left);
    frame.render_widget(left, layout[0]);

    let right = Paragraph::new(Line::from(Span::styled(
        "space play/pause | s step | r reset | n new | +/- speed | q quit ",
        Style::default().fg(DEFAULT_THEME.comment),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(right, layout[1]);
}
