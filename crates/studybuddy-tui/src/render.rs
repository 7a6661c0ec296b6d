//! Top-level render function.
//!
//! Rendering is pure: it reads state and draws; it never mutates.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::decks::render_deck_editor;
use crate::features::login::render_login;
use crate::features::profile::render_dashboard;
use crate::state::{AppState, Route};

/// Spinner animation frames.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(frame.area());

    render_title_bar(app, frame, chunks[0]);
    let body = chunks[1];

    if app.route.is_protected() && !app.is_permitted() {
        // Nothing guarded is drawn until the session check finishes.
        render_checking(app, frame, body);
        return;
    }

    match app.route {
        Route::Login => render_login(
            &app.login,
            app.notice.as_deref(),
            app.spinner_frame,
            frame,
            body,
        ),
        Route::Dashboard => {
            let claims = app.gate.as_ref().and_then(|gate| gate.claims());
            render_dashboard(&app.profile, claims, frame, body);
        }
        Route::Decks => render_deck_editor(&app.decks, frame, body),
    }
}

fn render_title_bar(app: &AppState, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " StudyBuddy ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.route.title()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_checking(app: &AppState, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{spinner} Checking session..."),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1),
    );
}
