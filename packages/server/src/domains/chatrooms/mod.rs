//! Chat domain - chat messages posted into chat rooms.
//!
//! Every created chat runs the song dedication matcher once, after the
//! insert has committed.

pub mod actions;
pub mod data;
pub mod edges;
pub mod filters;
pub mod models;
pub mod requests;
pub mod store;

pub use models::{Chat, ChatRoom, NewChat};
pub use store::PgChatStore;
