//! Dashboard: profile header, counters, personal information and the two
//! edit modals.

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{GENDERS, ModalField, ModalKind, ProfileModal, ProfileState};
pub use update::{DashboardAction, handle_key};
pub(crate) use update::paste;
