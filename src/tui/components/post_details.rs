//! Post details panel component
//!
//! Shows the selected post's header and its comments. The comments zone is a
//! straight condition chain over the store state:
//!
//! - not loaded            -> loading spinner
//! - loaded, error         -> error notification
//! - loaded, no comments   -> "No comments yet"
//! - loaded, comments      -> "Comments:" heading + one entry per comment
//!
//! Below that, either the "write a comment" affordance or the composition
//! form - never both.

use crate::api::Post;
use crate::store::CommentsState;
use crate::theme::Theme;
use crate::tui::component::{Handled, Interactive};
use crate::tui::components::comment_form::CommentForm;
use crate::tui::scroll::ScrollState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Height of the form sub-area when the form is visible
const FORM_HEIGHT: u16 = 9;

/// Post details panel component
pub struct DetailsPanel {
    /// Scroll state for the comments list (auto-follows appended comments)
    scroll: ScrollState,

    /// Cursor position in the comments list (None = nothing selected)
    pub cursor: Option<usize>,

    /// Cached comment count (for bounds checking)
    comment_count: usize,
}

impl DetailsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::following(),
            cursor: None,
            comment_count: 0,
        }
    }

    /// Sync with the current comment list (call each frame)
    pub fn sync(&mut self, comment_count: usize, viewport_height: usize) {
        self.comment_count = comment_count;
        // Each entry renders as two lines plus a blank spacer
        self.scroll
            .update_dimensions(comment_count, (viewport_height as usize) / 3);

        if let Some(idx) = self.cursor {
            if idx >= comment_count {
                self.cursor = comment_count.checked_sub(1);
            }
        }
        if let Some(idx) = self.cursor {
            self.scroll.ensure_visible(idx);
        }
    }

    /// Reset cursor and scroll (called when the selection changes)
    pub fn reset(&mut self) {
        self.cursor = None;
        self.scroll = ScrollState::following();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.comment_count == 0 {
            return;
        }
        let next = match self.cursor {
            None => {
                if delta >= 0 {
                    0
                } else {
                    self.comment_count - 1
                }
            }
            Some(current) => {
                (current as isize + delta).clamp(0, self.comment_count as isize - 1) as usize
            }
        };
        self.cursor = Some(next);
        self.scroll.ensure_visible(next);
    }

    /// Render the whole panel: header, comments zone, write affordance/form
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        post: Option<&Post>,
        state: &CommentsState,
        form: &CommentForm,
        form_visible: bool,
        theme: &Theme,
        focused: bool,
        spinner: char,
    ) {
        let border_color = if focused {
            theme.panel_details
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(" Post Details ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Header is always rendered, independent of comment-loading state
        let show_form = form_visible && state.loaded && !state.has_error;
        let constraints = if show_form {
            vec![
                Constraint::Length(5),
                Constraint::Min(1),
                Constraint::Length(FORM_HEIGHT),
            ]
        } else {
            vec![Constraint::Length(5), Constraint::Min(1)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        self.render_header(f, chunks[0], post, theme);
        self.render_comments(f, chunks[1], state, form_visible, theme, focused, spinner);

        if show_form {
            form.render(f, chunks[2], theme);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, post: Option<&Post>, theme: &Theme) {
        let lines = match post {
            Some(post) => vec![
                Line::from(Span::styled(
                    format!("#{}: {}", post.id, post.title),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(post.body.clone(), Style::default().fg(theme.foreground))),
            ],
            // Explicit placeholder instead of stringifying an absent post
            None => vec![Line::from(Span::styled(
                "no post selected",
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            ))],
        };

        let header = Paragraph::new(lines).wrap(Wrap { trim: false });
        f.render_widget(header, area);
    }

    fn render_comments(
        &self,
        f: &mut Frame,
        area: Rect,
        state: &CommentsState,
        form_visible: bool,
        theme: &Theme,
        focused: bool,
        spinner: char,
    ) {
        if !state.loaded {
            let msg = Paragraph::new(format!("{} Loading comments...", spinner))
                .style(Style::default().fg(theme.muted));
            f.render_widget(msg, area);
            return;
        }

        if state.has_error {
            let msg = Paragraph::new("Something went wrong")
                .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD));
            f.render_widget(msg, area);
            return;
        }

        if state.items.is_empty() {
            let mut lines = vec![Line::from(Span::styled(
                "No comments yet",
                Style::default().fg(theme.muted),
            ))];
            if !form_visible {
                lines.push(Line::from(""));
                lines.push(write_affordance(theme));
            }
            f.render_widget(Paragraph::new(lines), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(if form_visible { 0 } else { 1 }),
            ])
            .split(area);

        let heading = Paragraph::new("Comments:")
            .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));
        f.render_widget(heading, chunks[0]);

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = state.items[start..end]
            .iter()
            .enumerate()
            .map(|(i, comment)| {
                let absolute_idx = start + i;
                let selected = focused && self.cursor == Some(absolute_idx);

                let author_style = if selected {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.author)
                };

                let text = vec![
                    Line::from(Span::styled(
                        format!("{} <{}>", comment.name, comment.email),
                        author_style,
                    )),
                    Line::from(Span::styled(
                        format!("  {}", comment.body),
                        Style::default().fg(theme.foreground),
                    )),
                    Line::from(""),
                ];
                ListItem::new(text)
            })
            .collect();

        f.render_widget(List::new(items), chunks[1]);

        if !form_visible {
            f.render_widget(Paragraph::new(write_affordance(theme)), chunks[2]);
        }
    }
}

fn write_affordance(theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("[w]", Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)),
        Span::styled(" Write a comment", Style::default().fg(theme.foreground)),
    ])
}

impl Default for DetailsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for DetailsPanel {
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
            KeyCode::Esc if self.cursor.is_some() => {
                self.cursor = None;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:select  d:delete  w:write  r:reload  Tab:posts  q:quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_enters_list_from_either_end() {
        let mut panel = DetailsPanel::new();
        panel.sync(3, 30);

        panel.move_cursor(1);
        assert_eq!(panel.cursor, Some(0));

        panel.reset();
        panel.sync(3, 30);
        panel.move_cursor(-1);
        assert_eq!(panel.cursor, Some(2));
    }

    #[test]
    fn test_cursor_cleared_when_comments_removed() {
        let mut panel = DetailsPanel::new();
        panel.sync(2, 30);
        panel.move_cursor(1);
        panel.move_cursor(1);
        assert_eq!(panel.cursor, Some(1));

        panel.sync(1, 30);
        assert_eq!(panel.cursor, Some(0));

        panel.sync(0, 30);
        assert_eq!(panel.cursor, None);
    }
}
