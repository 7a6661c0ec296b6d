//! Shared rendering helpers for screens and modals.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::text::truncate_start_with_ellipsis;
use super::text_input::TextInput;

/// Calculates a centered popup area of at most `width` x `height` inside `area`.
pub fn calculate_popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for a popup (clears background, draws border and title).
pub fn render_popup_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Area inside a bordered container, with one column of horizontal padding.
pub fn inner_area(container: Rect) -> Rect {
    Rect::new(
        container.x + 2,
        container.y + 1,
        container.width.saturating_sub(4),
        container.height.saturating_sub(2),
    )
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// How a field should be drawn.
pub struct FieldView<'a> {
    pub label: &'a str,
    pub input: &'a TextInput,
    pub placeholder: &'a str,
    pub focused: bool,
    /// Render the value as bullets (passwords).
    pub masked: bool,
}

/// Builds the line for a labelled input field: `Label: value█`.
pub fn field_line(field: &FieldView<'_>, width: u16) -> Line<'static> {
    let label_color = if field.focused {
        Color::Cyan
    } else {
        Color::Gray
    };
    let label = format!("{}: ", field.label);
    let max_value_width = (width as usize).saturating_sub(label.chars().count() + 1);

    let mut spans = vec![Span::styled(
        label,
        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
    )];

    if field.input.is_empty() {
        if field.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(
            field.placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let shown = if field.masked {
            "•".repeat(field.input.value().chars().count())
        } else {
            field.input.value().to_string()
        };
        spans.push(Span::styled(
            truncate_start_with_ellipsis(&shown, max_value_width),
            Style::default().fg(Color::White),
        ));
        if field.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }

    Line::from(spans)
}

/// Renders a single status message line in `color`, if present.
pub fn message_line(message: Option<&str>, color: Color) -> Line<'static> {
    match message {
        Some(text) => Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    }
}
