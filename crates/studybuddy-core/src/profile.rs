//! User profile and dashboard records.
//!
//! These are held in local UI state only; nothing here is synchronised with
//! the server.

use std::path::PathBuf;

/// Editable profile fields shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub full_name: String,
    pub professional_title: String,
    pub member_since: String,
    pub username: String,
    pub role: String,
    pub email: String,
    pub gender: String,
    pub bio: String,
    /// Local path of the chosen avatar image, if any.
    pub avatar: Option<PathBuf>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            full_name: "John Doe".to_string(),
            professional_title: "Software Developer".to_string(),
            member_since: "September 2, 2024".to_string(),
            username: "john".to_string(),
            role: "User".to_string(),
            email: "john.doe@example.com".to_string(),
            gender: "Male".to_string(),
            bio: "I'm a user creating decks and flashcards for knowledge sharing".to_string(),
            avatar: None,
        }
    }
}

/// Created / liked / favourite counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub created: u32,
    pub liked: u32,
    pub favorite: u32,
}

/// Dashboard statistics (placeholder values until the API exposes them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub decks: Counters,
    pub flashcards: Counters,
    pub minutes_learning: u32,
}

impl DashboardStats {
    /// Formats the learning time as `HH:MM hrs`.
    pub fn learning_time_label(&self) -> String {
        format!(
            "{:02}:{:02} hrs",
            self.minutes_learning / 60,
            self.minutes_learning % 60
        )
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            decks: Counters {
                created: 3,
                liked: 1,
                favorite: 2,
            },
            flashcards: Counters {
                created: 5,
                liked: 2,
                favorite: 4,
            },
            minutes_learning: 270,
        }
    }
}
