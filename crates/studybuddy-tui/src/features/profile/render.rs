use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use studybuddy_core::profile::Counters;
use studybuddy_core::session::Claims;

use super::state::{ModalField, ProfileModal, ProfileState};
use crate::common::TextInput;
use crate::common::layout::{
    FieldView, InputHint, calculate_popup_area, field_line, inner_area, render_hints,
    render_popup_container,
};

pub fn render_dashboard(
    state: &ProfileState,
    claims: Option<&Claims>,
    frame: &mut Frame,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(state, frame, rows[0]);

    let counters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_counters("Decks", state.stats.decks, frame, counters[0]);
    render_counters("Flashcards", state.stats.flashcards, frame, counters[1]);

    render_personal_info(state, claims, frame, rows[2]);

    render_hints(
        frame,
        rows[3],
        &[
            InputHint::new("e", "edit profile"),
            InputHint::new("p", "edit personal info"),
            InputHint::new("n", "create deck"),
            InputHint::new("l", "logout"),
            InputHint::new("q", "quit"),
        ],
        Color::Green,
    );

    if let Some(modal) = &state.modal {
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
        render_modal(modal, frame, area);
    }
}

fn render_header(state: &ProfileState, frame: &mut Frame, area: Rect) {
    let profile = &state.profile;
    let avatar = profile.avatar.as_ref().map_or_else(
        || "default".to_string(),
        |path| path.display().to_string(),
    );
    let lines = vec![
        Line::from(Span::styled(
            profile.username.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            profile.professional_title.clone(),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("Member since {}", profile.member_since),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(profile.bio.clone()),
        Line::from(vec![
            Span::styled("Time spent learning: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.stats.learning_time_label(),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("   Picture: {avatar}"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Profile ")),
        area,
    );
}

fn render_counters(title: &str, counters: Counters, frame: &mut Frame, area: Rect) {
    let row = |label: &str, value: u32| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::Gray)),
            Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let lines = vec![
        row("Created", counters.created),
        row("Liked", counters.liked),
        row("Favorite", counters.favorite),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} ")),
        ),
        area,
    );
}

fn render_personal_info(
    state: &ProfileState,
    claims: Option<&Claims>,
    frame: &mut Frame,
    area: Rect,
) {
    let profile = &state.profile;
    let row = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![
        row("User Name:", &profile.username),
        row("Full Name:", &profile.full_name),
        row("Email:", &profile.email),
        row("Role:", &profile.role),
        row("Gender:", &profile.gender),
        row("Profession:", &profile.professional_title),
    ];
    if let Some(expires) = claims
        .and_then(Claims::expires_at)
        .and_then(session_expiry_label) {
        lines.push(Line::from(Span::styled(
            format!("Session valid until {expires}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Personal Information "),
        ),
        area,
    );
}

fn session_expiry_label(exp: i64) -> Option<String> {
    DateTime::from_timestamp(exp, 0).map(|utc| {
        utc.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    })
}

fn render_modal(modal: &ProfileModal, frame: &mut Frame, area: Rect) {
    let height = modal.fields.len() as u16 + 5;
    let popup = calculate_popup_area(area, 70, height);
    render_popup_container(frame, popup, modal.kind.title(), Color::Cyan);
    let inner = inner_area(popup);

    let mut lines = vec![Line::from("")];
    for (i, field) in modal.fields.iter().enumerate() {
        let focused = i == modal.focus;
        match field {
            ModalField::Text { label, input } => lines.push(field_line(
                &FieldView {
                    label,
                    input,
                    placeholder: "",
                    focused,
                    masked: false,
                },
                inner.width,
            )),
            ModalField::Choice { label, .. } => {
                let input = TextInput::with_value(format!("< {} >", field.value()));
                lines.push(field_line(
                    &FieldView {
                        label,
                        input: &input,
                        placeholder: "",
                        focused,
                        masked: false,
                    },
                    inner.width,
                ));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
    render_hints(
        frame,
        inner,
        &[
            InputHint::new("Tab", "next"),
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ],
        Color::Cyan,
    );
}
