//! Comment composition form
//!
//! Three text fields (name, email, body). The form performs no validation;
//! drafts are submitted as typed. Submission errors come back from the
//! network worker and are surfaced here as an inline error line, keeping
//! whatever the user typed.

use crate::api::CommentDraft;
use crate::theme::Theme;
use crate::tui::component::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the event loop should do after the form handled a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    /// Submit the current draft
    Submit(CommentDraft),
    /// Close the form without submitting
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Body,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Body,
            Self::Body => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Body,
            Self::Email => Self::Name,
            Self::Body => Self::Email,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Body => "Comment",
        }
    }
}

/// Comment composition form
pub struct CommentForm {
    name: String,
    email: String,
    body: String,
    focused_field: Field,

    /// A create request is in flight; input is ignored until it resolves
    pub submitting: bool,

    /// Error from the last failed submission
    pub error: Option<String>,

    /// Set by handle_key, consumed by the event loop
    pending_action: FormAction,
}

impl CommentForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            body: String::new(),
            focused_field: Field::Name,
            submitting: false,
            error: None,
            pending_action: FormAction::None,
        }
    }

    /// Current draft as typed
    pub fn draft(&self) -> CommentDraft {
        CommentDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            body: self.body.clone(),
        }
    }

    /// Clear everything (used when the selected post changes)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Called after the server confirmed creation: keep name and email for
    /// the next comment, clear the body and any stale error
    pub fn submitted(&mut self) {
        self.submitting = false;
        self.error = None;
        self.body.clear();
        self.focused_field = Field::Body;
    }

    /// Called when the create request failed
    pub fn submit_failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    /// Take the action produced by the last handled key
    pub fn take_action(&mut self) -> FormAction {
        std::mem::replace(&mut self.pending_action, FormAction::None)
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focused_field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Body => &mut self.body,
        }
    }

    /// Render the form into its sub-area of the details panel
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let title = if self.submitting {
            " New comment (sending...) "
        } else {
            " New comment "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        for (i, field) in [Field::Name, Field::Email, Field::Body].iter().enumerate() {
            let value = match field {
                Field::Name => &self.name,
                Field::Email => &self.email,
                Field::Body => &self.body,
            };
            let focused = self.focused_field == *field && !self.submitting;
            let cursor = if focused { "▏" } else { "" };
            let label_style = if focused {
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };

            let line = Line::from(vec![
                Span::styled(format!("{:>8}: ", field.label()), label_style),
                Span::styled(format!("{}{}", value, cursor), Style::default().fg(theme.foreground)),
            ]);
            f.render_widget(Paragraph::new(line), chunks[i]);
        }

        if let Some(error) = &self.error {
            let line = Paragraph::new(format!("✗ {}", error))
                .style(Style::default().fg(theme.error));
            f.render_widget(line, chunks[3]);
        }

        let hint = Paragraph::new("Enter:submit  Tab:next field  Esc:cancel")
            .style(Style::default().fg(theme.muted));
        f.render_widget(hint, chunks[4]);
    }
}

impl Default for CommentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for CommentForm {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        // While a submission is in flight only Esc is honored
        if self.submitting {
            if key.code == KeyCode::Esc {
                self.pending_action = FormAction::Cancel;
                return Handled::Yes;
            }
            return Handled::Yes;
        }

        match key.code {
            KeyCode::Esc => {
                self.pending_action = FormAction::Cancel;
                Handled::Yes
            }
            KeyCode::Enter => {
                self.pending_action = FormAction::Submit(self.draft());
                Handled::Yes
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = self.focused_field.next();
                Handled::Yes
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = self.focused_field.prev();
                Handled::Yes
            }
            KeyCode::Backspace => {
                self.field_mut().pop();
                Handled::Yes
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.field_mut().push(c);
                Handled::Yes
            }
            _ => Handled::Yes, // The form is modal: absorb everything
        }
    }

    fn focus_hint(&self) -> &'static str {
        "Enter:submit  Tab:next field  Esc:cancel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(form: &mut CommentForm, code: KeyCode) {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(form: &mut CommentForm, s: &str) {
        for c in s.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = CommentForm::new();
        type_str(&mut form, "A");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "a@x.com");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "hi");

        let draft = form.draft();
        assert_eq!(draft.name, "A");
        assert_eq!(draft.email, "a@x.com");
        assert_eq!(draft.body, "hi");
    }

    #[test]
    fn test_enter_produces_submit_action() {
        let mut form = CommentForm::new();
        type_str(&mut form, "A");
        press(&mut form, KeyCode::Enter);

        match form.take_action() {
            FormAction::Submit(draft) => assert_eq!(draft.name, "A"),
            other => panic!("expected submit, got {:?}", other),
        }
        // Action is consumed
        assert_eq!(form.take_action(), FormAction::None);
    }

    #[test]
    fn test_submitted_keeps_identity_clears_body() {
        let mut form = CommentForm::new();
        type_str(&mut form, "A");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "a@x.com");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "hi");

        form.submitting = true;
        form.submitted();

        let draft = form.draft();
        assert_eq!(draft.name, "A");
        assert_eq!(draft.email, "a@x.com");
        assert_eq!(draft.body, "");
        assert!(!form.submitting);
    }

    #[test]
    fn test_failed_submit_keeps_draft_and_sets_error() {
        let mut form = CommentForm::new();
        type_str(&mut form, "A");
        form.submitting = true;
        form.submit_failed("API error (500): nope".into());

        assert_eq!(form.draft().name, "A");
        assert_eq!(form.error.as_deref(), Some("API error (500): nope"));
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let mut form = CommentForm::new();
        form.submitting = true;
        type_str(&mut form, "ignored");
        assert_eq!(form.draft().name, "");
    }
}
