// Frame layout
//
// ┌ title bar ──────────────────────────────┐
// ├ posts (35%) ┬ post details (65%) ───────┤
// │             │ header                    │
// │             │ comments / form           │
// ├ status bar ─────────────────────────────┤
// └─────────────────────────────────────────┘
// Toast overlays the bottom-right corner.

use super::app::{App, Focus};
use super::component::Interactive;
use super::components::{status_bar, title_bar};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn draw(f: &mut Frame, app: &mut App, api_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], api_url, &app.theme);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    // Sync panel dimensions before rendering
    let posts_viewport = panels[0].height.saturating_sub(2) as usize;
    app.posts_panel.sync(app.posts.len(), posts_viewport);
    let details_viewport = panels[1].height.saturating_sub(8) as usize;
    app.details_panel
        .sync(app.store.state.items.len(), details_viewport.max(3));

    let spinner = app.spinner_char();
    app.posts_panel.render(
        f,
        panels[0],
        &app.posts,
        app.selected_post_id,
        app.posts_loading,
        app.posts_error.as_deref(),
        &app.theme,
        app.focus == Focus::Posts,
        spinner,
    );

    app.details_panel.render(
        f,
        panels[1],
        app.selected_post(),
        &app.store.state,
        &app.form,
        app.form_visible,
        &app.theme,
        app.focus == Focus::Details,
        spinner,
    );

    let hint = if app.form_visible {
        app.form.focus_hint()
    } else {
        match app.focus {
            Focus::Posts => app.posts_panel.focus_hint(),
            Focus::Details => app.details_panel.focus_hint(),
        }
    };
    status_bar::render(
        f,
        chunks[2],
        &app.uptime(),
        app.posts.len(),
        app.store.state.items.len(),
        hint,
        &app.log_buffer,
        &app.theme,
    );

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
