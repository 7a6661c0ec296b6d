//! Deck editor. Hosts the tag selector and owns the deck's tag selection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::TextInput;
use crate::common::layout::{FieldView, InputHint, field_line, render_hints};
use crate::effects::UiEffect;
use crate::features::tags::{TagField, TagSelectorState, render_tag_selector, selector_height};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckField {
    #[default]
    Title,
    Search,
    NewTag,
}

impl DeckField {
    fn next(self) -> Self {
        match self {
            DeckField::Title => DeckField::Search,
            DeckField::Search => DeckField::NewTag,
            DeckField::NewTag => DeckField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            DeckField::Title => DeckField::NewTag,
            DeckField::Search => DeckField::Title,
            DeckField::NewTag => DeckField::Search,
        }
    }
}

#[derive(Debug, Default)]
pub struct DeckEditorState {
    pub title: TextInput,
    /// Tags chosen for the deck.
    pub tags: Vec<String>,
    pub selector: TagSelectorState,
    pub focus: DeckField,
}

/// Result of a key press in the editor.
#[derive(Debug, PartialEq, Eq)]
pub enum DeckKeyOutcome {
    Handled(Vec<UiEffect>),
    /// Leave the editor.
    Back,
}

impl DeckEditorState {
    /// Starts a fresh deck and mounts its tag selector.
    pub fn mount(&mut self, mount: u64) -> Vec<UiEffect> {
        self.title.clear();
        self.tags.clear();
        self.focus = DeckField::Title;
        self.selector.mount(mount)
    }

    fn sync_selector_focus(&mut self) {
        match self.focus {
            DeckField::Search => self.selector.focus = TagField::Search,
            DeckField::NewTag => self.selector.focus = TagField::NewTag,
            DeckField::Title => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DeckKeyOutcome {
        if self.focus != DeckField::Title
            && let Some(effects) = self.selector.handle_key(&mut self.tags, key)
        {
            return DeckKeyOutcome::Handled(effects);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                self.sync_selector_focus();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                self.sync_selector_focus();
            }
            KeyCode::Esc => return DeckKeyOutcome::Back,
            KeyCode::Enter if self.focus == DeckField::Title => {
                self.focus = DeckField::Search;
                self.sync_selector_focus();
            }
            _ if self.focus == DeckField::Title => {
                self.title.handle_key(&key);
            }
            _ => {}
        }
        DeckKeyOutcome::Handled(vec![])
    }

    pub fn paste(&mut self, text: &str) {
        match self.focus {
            DeckField::Title => self.title.insert_str(text),
            DeckField::Search | DeckField::NewTag => self.selector.paste(text),
        }
    }
}

pub fn render_deck_editor(state: &DeckEditorState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Create Deck ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < selector_height() + 3 {
        return;
    }

    let title = field_line(
        &FieldView {
            label: "Title",
            input: &state.title,
            placeholder: "Deck title",
            focused: state.focus == DeckField::Title,
            masked: false,
        },
        inner.width,
    );
    frame.render_widget(
        Paragraph::new(vec![title, Line::from("")]),
        Rect::new(inner.x, inner.y, inner.width, 2),
    );

    let selector_area = Rect::new(inner.x, inner.y + 2, inner.width, selector_height());
    render_tag_selector(
        &state.selector,
        &state.tags,
        state.focus != DeckField::Title,
        frame,
        selector_area,
    );

    render_hints(
        frame,
        inner,
        &[
            InputHint::new("Tab", "next field"),
            InputHint::new("↑↓", "suggestions"),
            InputHint::new("Enter", "add tag"),
            InputHint::new("Esc", "back"),
        ],
        Color::Green,
    );
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use studybuddy_core::tags::Tag;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_mount_resets_deck_and_fetches_tags() {
        let mut state = DeckEditorState {
            tags: vec!["old".to_string()],
            ..Default::default()
        };
        let effects = state.mount(4);
        assert!(state.tags.is_empty());
        assert_eq!(effects, vec![UiEffect::FetchTags { mount: 4 }]);
    }

    #[test]
    fn test_tab_moves_into_selector_and_enter_adds() {
        let mut state = DeckEditorState::default();
        state.mount(1);
        state
            .selector
            .handle_loaded(1, Ok(vec![Tag::new("1", "biology")]));

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus, DeckField::Search);
        for ch in "biology".chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
        // First Enter picks the suggestion, second adds it.
        state.handle_key(key(KeyCode::Enter));
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.tags, vec!["biology"]);
        assert!(state.title.is_empty());
    }

    #[test]
    fn test_new_tag_field_creates_remotely() {
        let mut state = DeckEditorState::default();
        state.mount(2);
        state.selector.handle_loaded(2, Ok(Vec::new()));
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.focus, DeckField::NewTag);
        for ch in "physics".chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
        let outcome = state.handle_key(key(KeyCode::Enter));
        assert_eq!(
            outcome,
            DeckKeyOutcome::Handled(vec![UiEffect::CreateTag {
                mount: 2,
                name: "physics".to_string()
            }])
        );
    }

    #[test]
    fn test_esc_leaves_editor() {
        let mut state = DeckEditorState::default();
        assert_eq!(state.handle_key(key(KeyCode::Esc)), DeckKeyOutcome::Back);
    }
}
