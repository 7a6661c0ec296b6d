//! Tag selector: search existing tags or create a new one, appending to a
//! caller-owned selection.

mod render;
mod state;

pub use render::{render_tag_selector, selector_height};
pub use state::{TagField, TagSelectorState};
