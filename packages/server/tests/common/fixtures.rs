//! Test fixtures for creating actors, payloads and seeded records.

use chrono::{DateTime, Duration, TimeZone, Utc};
use playday_core::common::{Actor, ChatRoomId, UserId};
use playday_core::domains::chatrooms::models::{Chat, NewChat};
use playday_core::domains::chatrooms::requests::ChatPayload;
use playday_core::domains::ebazaar::models::{EBazaar, NewEBazaar};
use playday_core::domains::ebazaar::requests::EBazaarPayload;
use playday_core::kernel::TestDependencies;
use serde_json::{json, Value};

/// 2026-03-14T10:00:00Z, a Saturday.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap()
}

pub fn admin() -> Actor {
    Actor::new(UserId::new(), true)
}

/// Authenticated user holding only the default grants.
pub fn member() -> Actor {
    Actor::new(UserId::new(), false)
}

/// Non-admin allowed to manage e-bazaars.
pub fn ebazaar_manager() -> Actor {
    Actor::new(UserId::new(), false).with_permissions(vec!["ebazaar.*".to_string()])
}

pub fn chat_payload(message: &str, room: Option<ChatRoomId>) -> ChatPayload {
    ChatPayload {
        message: Some(message.to_string()),
        chat_room_id: room.map(|id| id.to_string()),
        meta: None,
    }
}

/// Valid e-bazaar payload starting `starts_in` from now and lasting two hours.
pub fn ebazaar_payload(title: &str, starts_in: Duration) -> EBazaarPayload {
    let start = fixed_now() + starts_in;
    let end = start + Duration::hours(2);
    EBazaarPayload {
        title: Some(title.to_string()),
        description: Some("Handmade goods and street food".to_string()),
        category: Some("crafts".to_string()),
        location: Some("market-hall".to_string()),
        start_at: Some(start.to_rfc3339()),
        end_at: Some(end.to_rfc3339()),
        media: Vec::new(),
    }
}

/// JSON body equivalent of `ebazaar_payload`.
pub fn ebazaar_json(title: &str, starts_in: Duration) -> Value {
    let start = fixed_now() + starts_in;
    let end = start + Duration::hours(2);
    json!({
        "title": title,
        "description": "Handmade goods and street food",
        "category": "crafts",
        "location": "market-hall",
        "start_at": start.to_rfc3339(),
        "end_at": end.to_rfc3339(),
    })
}

/// Store an e-bazaar running from `start` to `end`, bypassing actions.
pub fn seed_ebazaar(
    deps: &TestDependencies,
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> EBazaar {
    deps.ebazaars.seed_ebazaar(
        NewEBazaar::builder()
            .title(title)
            .category("food")
            .location("outdoor")
            .start_at(start)
            .end_at(end)
            .build(),
    )
}

pub fn seed_chat(deps: &TestDependencies, message: &str, room: Option<ChatRoomId>) -> Chat {
    deps.chats.seed_chat(
        NewChat::builder()
            .message(message)
            .chat_room_id(room)
            .build(),
    )
}
