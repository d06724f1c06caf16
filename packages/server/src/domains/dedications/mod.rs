//! Dedications domain - song requests matched against incoming chats.

pub mod matcher;
pub mod models;

pub use matcher::PgDedicationMatcher;
pub use models::{DedicationStatus, SongDedication};
