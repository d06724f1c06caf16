pub mod chat;
pub mod chat_room;

pub use chat::{Chat, NewChat};
pub use chat_room::ChatRoom;
