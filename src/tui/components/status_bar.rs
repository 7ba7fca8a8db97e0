//! Status bar - uptime, counts, focus hints, last log line

use crate::logging::{LogBuffer, LogLevel};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(
    f: &mut Frame,
    area: Rect,
    uptime: &str,
    post_count: usize,
    comment_count: usize,
    hint: &str,
    log_buffer: &LogBuffer,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Percentage(50)])
        .split(area);

    let left = Line::from(vec![
        Span::styled(format!(" {} ", uptime), Style::default().fg(theme.status_bar)),
        Span::styled(
            format!("│ {} posts │ {} comments │ ", post_count, comment_count),
            Style::default().fg(theme.muted),
        ),
        Span::styled(hint.to_string(), Style::default().fg(theme.foreground)),
    ]);
    f.render_widget(Paragraph::new(left), chunks[0]);

    // Most recent warn/error so failures are visible without a log panel
    if let Some(entry) = log_buffer.latest() {
        if matches!(entry.level, LogLevel::Error | LogLevel::Warn) {
            let color = if entry.level == LogLevel::Error {
                theme.error
            } else {
                theme.highlight
            };
            let right = Paragraph::new(Line::from(Span::styled(
                format!("{}: {} ", entry.level.as_str(), entry.message),
                Style::default().fg(color),
            )))
            .alignment(ratatui::layout::Alignment::Right);
            f.render_widget(right, chunks[1]);
        }
    }
}
