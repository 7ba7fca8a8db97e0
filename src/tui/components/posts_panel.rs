//! Posts panel component
//!
//! The selectable post list. Moving the cursor only highlights a row;
//! pressing Enter (handled by the event loop) makes that row the selected
//! post and triggers a comments load.

use crate::api::Post;
use crate::theme::Theme;
use crate::tui::component::{Handled, Interactive};
use crate::tui::scroll::ScrollState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Posts panel component
pub struct PostsPanel {
    /// Scroll state (offset follows the cursor)
    scroll: ScrollState,

    /// Cursor position in the list (None until posts arrive)
    pub cursor: Option<usize>,

    /// Cached post count (for bounds checking)
    post_count: usize,
}

impl PostsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            cursor: None,
            post_count: 0,
        }
    }

    /// Sync with the current post list (call each frame)
    pub fn sync(&mut self, post_count: usize, viewport_height: usize) {
        self.post_count = post_count;
        self.scroll.update_dimensions(post_count, viewport_height);

        // Clamp cursor, or place it on the first post once any exist
        match self.cursor {
            Some(idx) if idx >= post_count => self.cursor = post_count.checked_sub(1),
            None if post_count > 0 => self.cursor = Some(0),
            _ => {}
        }

        if let Some(idx) = self.cursor {
            self.scroll.ensure_visible(idx);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.post_count == 0 {
            return;
        }
        let current = self.cursor.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.post_count as isize - 1) as usize;
        self.cursor = Some(next);
        self.scroll.ensure_visible(next);
    }

    /// Render the post list
    ///
    /// `selected_id` marks the post whose details are open; `loading` and
    /// `error` describe the post-list fetch itself.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        posts: &[Post],
        selected_id: Option<u64>,
        loading: bool,
        error: Option<&str>,
        theme: &Theme,
        focused: bool,
        spinner: char,
    ) {
        let border_color = if focused {
            theme.panel_posts
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(format!(" Posts ({}) ", posts.len()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if loading {
            let msg = ratatui::widgets::Paragraph::new(format!("{} Loading posts...", spinner))
                .style(Style::default().fg(theme.muted));
            f.render_widget(msg, inner);
            return;
        }

        if let Some(error) = error {
            let msg = ratatui::widgets::Paragraph::new(format!("Something went wrong: {}", error))
                .style(Style::default().fg(theme.error))
                .wrap(ratatui::widgets::Wrap { trim: true });
            f.render_widget(msg, inner);
            return;
        }

        let max_width = inner.width.saturating_sub(8) as usize;
        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = posts[start..end]
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let absolute_idx = start + i;
                let marker = if selected_id == Some(post.id) { "▸" } else { " " };
                let line = format!("{} #{:<3} {}", marker, post.id, truncate(&post.title, max_width));

                let style = if focused && self.cursor == Some(absolute_idx) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else if selected_id == Some(post.id) {
                    Style::default().fg(theme.highlight)
                } else {
                    Style::default().fg(theme.foreground)
                };

                ListItem::new(line).style(style)
            })
            .collect();

        f.render_widget(List::new(items), inner);
    }
}

impl Default for PostsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for PostsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.move_cursor(isize::MIN / 2);
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.move_cursor(isize::MAX / 2);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:move  Enter:open post  Tab:comments  q:quit"
    }
}

/// Truncate to a display width, appending an ellipsis when cut
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamped_to_post_count() {
        let mut panel = PostsPanel::new();
        panel.sync(5, 10);
        assert_eq!(panel.cursor, Some(0));

        panel.move_cursor(100);
        assert_eq!(panel.cursor, Some(4));

        panel.sync(2, 10);
        assert_eq!(panel.cursor, Some(1));
    }

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 7), "a very…");
    }
}
