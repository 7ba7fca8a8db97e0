//! Title bar - app name, version, API endpoint

use crate::config::VERSION;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, api_url: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!(" postdesk v{} ", VERSION),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme.muted)),
        Span::styled(api_url.to_string(), Style::default().fg(theme.muted)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
