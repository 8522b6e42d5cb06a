use std::str::FromStr;
use std::time::Duration;

use pomocycle_core::settings::FieldInput;
use pomocycle_core::{PageKey, PageView, SettingsView, TimerState, TimerView};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use crate::keymap;

const IDLE_COLOR: Color = Color::Rgb(0x4b, 0x44, 0x53);
const FALLBACK_ACCENT: Color = Color::Red;

pub fn render(frame: &mut Frame, page: PageKey, view: &PageView) {
    match view {
        PageView::Timer(view) => render_timer(frame, page, view),
        PageView::Settings(view) => render_settings(frame, page, view),
    }
}

fn accent(hex: &str) -> Color {
    Color::from_str(hex).unwrap_or(FALLBACK_ACCENT)
}

fn render_timer(frame: &mut Frame, page: PageKey, view: &TimerView) {
    let [tabs, _, clock, _, bar, _, counters, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let running = view.state == TimerState::Running;
    let active_color = view
        .tabs
        .iter()
        .find(|tab| tab.active)
        .map_or(FALLBACK_ACCENT, |tab| accent(tab.descriptor.accent_color));

    let mut tab_spans = Vec::with_capacity(view.tabs.len() * 2);
    for tab in &view.tabs {
        let style = if tab.active {
            Style::default()
                .fg(Color::White)
                .bg(accent(tab.descriptor.accent_color))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        tab_spans.push(Span::styled(format!(" {} ", tab.descriptor.title), style));
        tab_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), tabs);

    let mut clock_style = Style::default().add_modifier(Modifier::BOLD);
    if !running {
        clock_style = clock_style.add_modifier(Modifier::DIM);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(format_remaining(view.remaining), clock_style)),
        clock,
    );

    if let Some(progress) = view.progress {
        let color = if running { active_color } else { IDLE_COLOR };
        let area = Rect {
            width: bar.width.min(view.progress_width),
            ..bar
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
            .ratio(progress.clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, area);
    }

    let mut lines = vec![Line::from(format!("Total Work sessions: {}", view.total_work_sessions))];
    if let Some(left) = view.sessions_until_long_break {
        lines.push(Line::from(format!("Sessions left before the long break: {left}")));
    }
    frame.render_widget(Paragraph::new(lines), counters);

    frame.render_widget(help_paragraph(page, view.show_help), help);
}

fn render_settings(frame: &mut Frame, page: PageKey, view: &SettingsView) {
    let rows = u16::try_from(view.fields.len()).unwrap_or(u16::MAX);
    let [title, _, fields, _, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(rows),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            " Settings ",
            Style::default().fg(Color::White).bg(accent("#ba4949")).add_modifier(Modifier::BOLD),
        )),
        title,
    );

    let lines: Vec<Line> = view
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == view.cursor;
            let marker = if selected { "> " } else { "  " };
            let value = value_span(&field.input);
            let mut title_style = Style::default();
            if selected {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::raw(marker),
                value,
                Span::raw(" "),
                Span::styled(field.title, title_style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), fields);

    frame.render_widget(help_paragraph(page, view.show_help), help);
}

fn value_span(input: &FieldInput) -> Span<'static> {
    match input {
        FieldInput::Toggle(true) => Span::styled("on ", Style::default().fg(Color::Green)),
        FieldInput::Toggle(false) => Span::styled("off", Style::default().fg(Color::Red)),
        FieldInput::Number { value: 0, .. } => Span::styled("None", Style::default().fg(Color::Red)),
        FieldInput::Number { value, .. } => Span::styled(format!("{value:>4}"), Style::default().fg(Color::Cyan)),
    }
}

fn help_paragraph(page: PageKey, full: bool) -> Paragraph<'static> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    if !full {
        return Paragraph::new(Span::styled(keymap::short_help(page), dim));
    }
    let lines: Vec<Line> = keymap::full_help(page)
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<14}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(*what, dim),
            ])
        })
        .collect();
    Paragraph::new(lines)
}

/// `MM:SS`, or `H:MM:SS` past an hour. Partial seconds round up so a fresh
/// 25 minute session reads 25:00 rather than 24:59.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_millis().div_ceil(1000);
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_rounds_partial_seconds_up() {
        assert_eq!(format_remaining(Duration::from_secs(25 * 60)), "25:00");
        assert_eq!(format_remaining(Duration::from_millis(25 * 60 * 1000 - 250)), "25:00");
        assert_eq!(format_remaining(Duration::from_millis(999)), "00:01");
        assert_eq!(format_remaining(Duration::ZERO), "00:00");
    }

    #[test]
    fn long_sessions_show_hours() {
        assert_eq!(format_remaining(Duration::from_secs(9999 * 60)), "166:39:00");
        assert_eq!(format_remaining(Duration::from_secs(3600 + 5)), "1:00:05");
    }

    #[test]
    fn accent_colors_parse_from_hex() {
        assert_eq!(accent("#ba4949"), Color::Rgb(0xba, 0x49, 0x49));
        assert_eq!(accent("not a color"), FALLBACK_ACCENT);
    }

    #[test]
    fn number_zero_renders_as_none() {
        let span = value_span(&FieldInput::Number { value: 0, bounds: None });
        assert_eq!(span.content, "None");
        let span = value_span(&FieldInput::Toggle(false));
        assert_eq!(span.content, "off");
    }
}
