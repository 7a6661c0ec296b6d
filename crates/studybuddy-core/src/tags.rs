//! Tags and the locally cached tag catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tag as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Tags fetched from the server, in server order, with a name -> id index.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
    by_name: HashMap<String, String>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: Vec<Tag>) -> Self {
        let mut catalog = Self::new();
        for tag in tags {
            catalog.insert(tag);
        }
        catalog
    }

    /// Adds a tag to the catalog. A name already present keeps its first id.
    pub fn insert(&mut self, tag: Tag) {
        self.by_name
            .entry(tag.name.clone())
            .or_insert_with(|| tag.id.clone());
        self.tags.push(tag);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags whose name contains `query`, ignoring case. An empty query matches nothing.
    pub fn suggestions(&self, query: &str) -> Vec<&Tag> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.tags
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&query))
            .collect()
    }
}

/// Appends `name` to `selection` unless it is empty or already present.
/// Returns true if the selection changed.
pub fn add_to_selection(selection: &mut Vec<String>, name: &str) -> bool {
    if name.is_empty() || selection.iter().any(|existing| existing == name) {
        return false;
    }
    selection.push(name.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TagCatalog {
        TagCatalog::from_tags(vec![
            Tag::new("1", "Biology"),
            Tag::new("2", "Microbiology"),
            Tag::new("3", "History"),
        ])
    }

    #[test]
    fn test_suggestions_are_case_insensitive_substrings() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .suggestions("BIO")
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Biology", "Microbiology"]);
    }

    #[test]
    fn test_empty_query_has_no_suggestions() {
        assert!(catalog().suggestions("  ").is_empty());
    }

    #[test]
    fn test_name_index_tracks_inserts() {
        let mut catalog = catalog();
        assert!(!catalog.contains("Physics"));
        catalog.insert(Tag::new("9", "Physics"));
        assert_eq!(catalog.id_of("Physics"), Some("9"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_add_to_selection_rejects_duplicates_and_empty() {
        let mut selection = vec!["biology".to_string()];
        assert!(!add_to_selection(&mut selection, "biology"));
        assert!(!add_to_selection(&mut selection, ""));
        assert!(add_to_selection(&mut selection, "physics"));
        assert_eq!(selection, vec!["biology", "physics"]);
    }
}
