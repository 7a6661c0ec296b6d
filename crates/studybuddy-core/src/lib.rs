//! Core StudyBuddy client library (config, session, API, tags, profile).

pub mod api;
pub mod config;
pub mod logging;
pub mod profile;
pub mod session;
pub mod tags;
