pub mod create_chat;
pub mod queries;

pub use create_chat::create_chat;
pub use queries::{list_chats, show_chat};
