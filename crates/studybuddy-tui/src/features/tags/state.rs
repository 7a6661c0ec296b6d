//! Tag selector state and reducer.
//!
//! The selection belongs to the hosting screen and is passed in by `&mut`.
//! The catalog is fetched once per mount; results carrying another mount id
//! are dropped.

use crossterm::event::{KeyCode, KeyEvent};
use studybuddy_core::tags::{Tag, TagCatalog, add_to_selection};

use crate::common::TextInput;
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagField {
    #[default]
    Search,
    NewTag,
}

#[derive(Debug, Default)]
pub struct TagSelectorState {
    pub catalog: TagCatalog,
    pub search: TextInput,
    pub new_tag: TextInput,
    pub focus: TagField,
    pub show_dropdown: bool,
    /// Index into the current suggestions.
    pub highlighted: usize,
    /// Name of the tag being created remotely.
    pub pending_create: Option<String>,
    pub loading: bool,
    mount: u64,
}

impl TagSelectorState {
    /// Resets the selector and requests the catalog for mount `mount`.
    pub fn mount(&mut self, mount: u64) -> Vec<UiEffect> {
        *self = Self {
            mount,
            loading: true,
            ..Self::default()
        };
        vec![UiEffect::FetchTags { mount }]
    }

    pub fn mount_id(&self) -> u64 {
        self.mount
    }

    pub fn suggestions(&self) -> Vec<&Tag> {
        self.catalog.suggestions(self.search.value())
    }

    /// Whether the suggestion dropdown is visible.
    pub fn dropdown_visible(&self) -> bool {
        self.show_dropdown && !self.search.is_empty()
    }

    fn on_search_changed(&mut self) {
        self.show_dropdown = true;
        self.highlighted = 0;
    }

    /// Fills the search input with the suggestion at `index` and hides the dropdown.
    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        let Some(name) = self.suggestions().get(index).map(|tag| tag.name.clone()) else {
            return false;
        };
        self.search.set(name);
        self.show_dropdown = false;
        self.highlighted = 0;
        true
    }

    /// Adds the current candidate to `selection`.
    ///
    /// The new-tag input wins over the search input. A new tag missing from
    /// the catalog is created remotely first and appended once the server
    /// answers; anything else is appended at once.
    pub fn add_tag(&mut self, selection: &mut Vec<String>) -> Vec<UiEffect> {
        let new_tag = self.new_tag.value().trim().to_string();
        let from_new_tag = !new_tag.is_empty();
        let candidate = if from_new_tag {
            new_tag
        } else {
            self.search.value().trim().to_string()
        };

        if candidate.is_empty() || selection.contains(&candidate) {
            tracing::debug!(tag = %candidate, "tag is empty or already added");
            return vec![];
        }

        if from_new_tag && !self.catalog.contains(&candidate) {
            if self.pending_create.is_some() {
                return vec![];
            }
            self.pending_create = Some(candidate.clone());
            return vec![UiEffect::CreateTag {
                mount: self.mount,
                name: candidate,
            }];
        }

        add_to_selection(selection, &candidate);
        if from_new_tag {
            self.new_tag.clear();
        } else {
            self.search.clear();
        }
        self.show_dropdown = false;
        vec![]
    }

    /// Applies the catalog fetched for `mount`.
    pub fn handle_loaded(&mut self, mount: u64, result: Result<Vec<Tag>, String>) {
        if mount != self.mount {
            return;
        }
        self.loading = false;
        match result {
            Ok(tags) => self.catalog = TagCatalog::from_tags(tags),
            Err(error) => tracing::error!(%error, "error fetching tags"),
        }
    }

    /// Applies the result of creating `name` remotely.
    pub fn handle_created(
        &mut self,
        selection: &mut Vec<String>,
        mount: u64,
        name: &str,
        result: Result<Tag, String>,
    ) {
        if mount != self.mount {
            return;
        }
        self.pending_create = None;
        match result {
            Ok(tag) => {
                add_to_selection(selection, name);
                self.catalog.insert(tag);
                if self.new_tag.value().trim() == name {
                    self.new_tag.clear();
                }
            }
            Err(error) => tracing::error!(tag = %name, %error, "failed to add new tag"),
        }
    }

    /// Handles a key while the selector has focus. Returns `None` when the
    /// key is not for the selector.
    pub fn handle_key(
        &mut self,
        selection: &mut Vec<String>,
        key: KeyEvent,
    ) -> Option<Vec<UiEffect>> {
        let dropdown = self.dropdown_visible();
        match (self.focus, key.code) {
            (TagField::Search, KeyCode::Down) if dropdown => {
                let count = self.suggestions().len();
                if count > 0 {
                    self.highlighted = (self.highlighted + 1) % count;
                }
                Some(vec![])
            }
            (TagField::Search, KeyCode::Up) if dropdown => {
                let count = self.suggestions().len();
                if count > 0 {
                    self.highlighted = (self.highlighted + count - 1) % count;
                }
                Some(vec![])
            }
            (TagField::Search, KeyCode::Esc) if dropdown => {
                self.show_dropdown = false;
                Some(vec![])
            }
            (TagField::Search, KeyCode::Enter) if dropdown && !self.suggestions().is_empty() => {
                self.choose_suggestion(self.highlighted);
                Some(vec![])
            }
            (_, KeyCode::Enter) => Some(self.add_tag(selection)),
            (TagField::Search, _) => {
                if self.search.handle_key(&key) {
                    self.on_search_changed();
                }
                is_edit_key(&key).then(Vec::new)
            }
            (TagField::NewTag, _) => {
                self.new_tag.handle_key(&key);
                is_edit_key(&key).then(Vec::new)
            }
        }
    }

    pub fn paste(&mut self, text: &str) {
        match self.focus {
            TagField::Search => {
                self.search.insert_str(text);
                self.on_search_changed();
            }
            TagField::NewTag => self.new_tag.insert_str(text),
        }
    }
}

fn is_edit_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End
    )
}
