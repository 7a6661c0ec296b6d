use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{LoginField, LoginState};
use crate::common::layout::{
    FieldView, InputHint, calculate_popup_area, field_line, inner_area, message_line,
    render_hints, render_popup_container,
};
use crate::render::SPINNER_FRAMES;

pub fn render_login(
    state: &LoginState,
    notice: Option<&str>,
    spinner_frame: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let popup = calculate_popup_area(area, 64, 16);
    render_popup_container(frame, popup, "Sign in to Your Account", Color::Green);
    let inner = inner_area(popup);
    let width = inner.width;

    let mut lines = Vec::new();
    lines.push(message_line(notice, Color::Yellow));
    if let Some(error) = state.error.as_deref() {
        lines.push(message_line(Some(error), Color::Red));
    } else {
        lines.push(message_line(state.success.as_deref(), Color::Green));
    }
    lines.push(Line::from(""));

    lines.push(field_line(
        &FieldView {
            label: "Email Address",
            input: &state.email,
            placeholder: "you@example.com",
            focused: state.focus == LoginField::Email,
            masked: false,
        },
        width,
    ));
    lines.push(field_line(
        &FieldView {
            label: "Password",
            input: &state.password,
            placeholder: "",
            focused: state.focus == LoginField::Password,
            masked: true,
        },
        width,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "or continue with Google",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(field_line(
        &FieldView {
            label: "Google ID token",
            input: &state.google_token,
            placeholder: "paste identity token",
            focused: state.focus == LoginField::GoogleToken,
            masked: false,
        },
        width,
    ));
    lines.push(Line::from(""));

    if state.pending {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{spinner} Signing in..."),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let content = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), content);

    render_hints(
        frame,
        inner,
        &[
            InputHint::new("Tab", "next field"),
            InputHint::new("Enter", "sign in"),
            InputHint::new("Esc", "quit"),
        ],
        Color::Green,
    );
}
