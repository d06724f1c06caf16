//! Member domain - the users behind chats, orders and saves.

pub mod models;

pub use models::User;
