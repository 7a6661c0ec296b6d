//! Feature slices for the TUI (state/update/render per slice).

pub mod decks;
pub mod gate;
pub mod login;
pub mod profile;
pub mod tags;
