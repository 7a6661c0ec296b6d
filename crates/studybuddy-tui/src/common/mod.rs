//! Shared building blocks used by multiple features.

pub mod layout;
pub mod text;
pub mod text_input;

pub use text::truncate_with_ellipsis;
pub use text_input::TextInput;
