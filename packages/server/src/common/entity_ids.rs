//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use playday_core::common::{ChatId, EBazaarId};
//!
//! let chat_id = ChatId::new();
//! let bazaar_id = EBazaarId::new();
//! // let wrong: EBazaarId = chat_id; // does not compile
//! # let _ = (chat_id, bazaar_id);
//! ```

pub use super::id::{Id, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (chat authors, order customers).
pub struct User;

/// Marker type for ChatRoom entities.
pub struct ChatRoom;

/// Marker type for Chat entities (messages posted in a room).
pub struct Chat;

/// Marker type for EBazaar entities (scheduled live marketplace events).
pub struct EBazaar;

/// Marker type for Media attached to an e-bazaar.
pub struct Media;

/// Marker type for Order entities.
pub struct Order;

/// Marker type for SongDedication entities.
pub struct SongDedication;

/// Marker type for audit log entries.
pub struct Activity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type ChatRoomId = Id<ChatRoom>;

pub type ChatId = Id<Chat>;

pub type EBazaarId = Id<EBazaar>;

pub type MediaId = Id<Media>;

pub type OrderId = Id<Order>;

pub type DedicationId = Id<SongDedication>;

pub type ActivityId = Id<Activity>;
