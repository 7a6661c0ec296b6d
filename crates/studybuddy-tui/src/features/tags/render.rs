use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::state::{TagField, TagSelectorState};
use crate::common::layout::{FieldView, field_line};
use crate::common::truncate_with_ellipsis;

const MAX_DROPDOWN_ROWS: usize = 5;

/// Rows the selector needs, not counting the dropdown overlay.
pub fn selector_height() -> u16 {
    4
}

/// Renders the selector. `focused` is true when one of its fields has focus.
pub fn render_tag_selector(
    state: &TagSelectorState,
    selection: &[String],
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let width = area.width;
    let mut lines = Vec::new();

    let mut selected = vec![Span::styled(
        "Tags: ",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    )];
    if selection.is_empty() {
        selected.push(Span::styled("none", Style::default().fg(Color::DarkGray)));
    }
    for (i, name) in selection.iter().enumerate() {
        if i > 0 {
            selected.push(Span::raw(" "));
        }
        selected.push(Span::styled(
            format!("#{name}"),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    lines.push(Line::from(selected));

    lines.push(field_line(
        &FieldView {
            label: "Search",
            input: &state.search,
            placeholder: if state.loading {
                "loading tags..."
            } else {
                "Search or select a tag..."
            },
            focused: focused && state.focus == TagField::Search,
            masked: false,
        },
        width,
    ));
    lines.push(field_line(
        &FieldView {
            label: "New tag",
            input: &state.new_tag,
            placeholder: "Or create a new tag",
            focused: focused && state.focus == TagField::NewTag,
            masked: false,
        },
        width,
    ));

    let action = match &state.pending_create {
        Some(name) => Span::styled(
            format!("Creating \"{name}\"..."),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled(
            "[Enter] Add Tag",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };
    lines.push(Line::from(action));

    frame.render_widget(Paragraph::new(lines), area);

    if focused && state.dropdown_visible() {
        render_dropdown(state, frame, area);
    }
}

/// Suggestions drawn over whatever sits under the search field.
fn render_dropdown(state: &TagSelectorState, frame: &mut Frame, area: Rect) {
    let suggestions = state.suggestions();
    let frame_area = frame.area();
    let top = area.y + 2;
    let available = frame_area.bottom().saturating_sub(top);
    let rows = suggestions.len().clamp(1, MAX_DROPDOWN_ROWS) as u16 + 2;
    let height = rows.min(available);
    if height < 3 {
        return;
    }
    let dropdown = Rect::new(area.x + 2, top, area.width.saturating_sub(4), height);

    let visible = usize::from(height - 2);
    let start = state.highlighted.saturating_sub(visible.saturating_sub(1));
    let inner_width = usize::from(dropdown.width.saturating_sub(2));

    let lines: Vec<Line> = if suggestions.is_empty() {
        vec![Line::from(Span::styled(
            "No matching tags",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        suggestions
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, tag)| {
                let style = if i == state.highlighted {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(
                    truncate_with_ellipsis(&tag.name, inner_width),
                    style,
                ))
            })
            .collect()
    };

    frame.render_widget(Clear, dropdown);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        dropdown,
    );
}
