//! JSON shapes for e-bazaars and their relations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::ebazaar::models::{EBazaar, Media, OrderWithCustomer};
use crate::domains::member::User;

/// API representation of an e-bazaar
#[derive(Debug, Clone, Serialize)]
pub struct EBazaarData {
    pub id: String,
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
    /// Whether the event window contains the current time
    pub is_live: bool,
    pub created_by: Option<String>,
    /// Ordered by position, then id; always present
    pub media: Vec<MediaData>,
    /// `null` unless orders were requested
    pub orders: Option<Vec<OrderData>>,
    pub created_at: String,
    pub updated_at: String,
}

impl EBazaarData {
    /// Build the view. `media` must already belong to this e-bazaar.
    pub fn new(
        ebazaar: EBazaar,
        mut media: Vec<Media>,
        orders: Option<Vec<OrderWithCustomer>>,
        now: DateTime<Utc>,
    ) -> Self {
        media.sort_by_key(|m| (m.position, m.id));
        Self {
            id: ebazaar.id.to_string(),
            uuid: ebazaar.uuid.to_string(),
            is_live: ebazaar.is_live_at(now),
            title: ebazaar.title,
            description: ebazaar.description,
            category: ebazaar.category,
            location: ebazaar.location,
            start_at: ebazaar.start_at.to_rfc3339(),
            end_at: ebazaar.end_at.to_rfc3339(),
            created_by: ebazaar.created_by.map(|id| id.to_string()),
            media: media.into_iter().map(MediaData::from).collect(),
            orders: orders.map(|orders| orders.into_iter().map(OrderData::from).collect()),
            created_at: ebazaar.created_at.to_rfc3339(),
            updated_at: ebazaar.updated_at.to_rfc3339(),
        }
    }
}

/// API representation of an attached image or video
#[derive(Debug, Clone, Serialize)]
pub struct MediaData {
    pub id: String,
    pub kind: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub url: String,
    pub position: i32,
    pub created_at: String,
}

impl From<Media> for MediaData {
    fn from(media: Media) -> Self {
        Self {
            id: media.id.to_string(),
            kind: media.kind.to_string(),
            file_name: media.file_name,
            mime_type: media.mime_type,
            size_bytes: media.size_bytes,
            url: media.url,
            position: media.position,
            created_at: media.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderData {
    pub id: String,
    pub quantity: i32,
    pub total_cents: i64,
    pub status: String,
    pub created_at: String,
    pub customer: Option<CustomerData>,
}

impl From<OrderWithCustomer> for OrderData {
    fn from(row: OrderWithCustomer) -> Self {
        let OrderWithCustomer { order, customer } = row;
        Self {
            id: order.id.to_string(),
            quantity: order.quantity,
            total_cents: order.total_cents,
            status: order.status,
            created_at: order.created_at.to_rfc3339(),
            customer: customer.map(CustomerData::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for CustomerData {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{OrderId, UserId};
    use crate::domains::ebazaar::models::{MediaKind, NewEBazaar, NewMedia, Order};
    use chrono::Duration;
    use serde_json::json;

    fn bazaar() -> EBazaar {
        let start = Utc::now();
        NewEBazaar::builder()
            .title("Night market")
            .category("food")
            .location("online")
            .start_at(start)
            .end_at(start + Duration::hours(1))
            .build()
            .into_ebazaar(start)
    }

    #[test]
    fn orders_are_null_unless_loaded() {
        let ebazaar = bazaar();
        let json = serde_json::to_value(EBazaarData::new(ebazaar, Vec::new(), None, Utc::now()))
            .unwrap();

        assert!(json["orders"].is_null());
        assert_eq!(json["media"], json!([]));
        assert_eq!(json["is_live"], json!(true));
    }

    #[test]
    fn media_sorted_and_customers_nested() {
        let ebazaar = bazaar();
        let media = |position| {
            NewMedia::builder()
                .ebazaar_id(ebazaar.id)
                .kind(MediaKind::Image)
                .file_name(format!("{position}.png"))
                .mime_type("image/png")
                .url(format!("/media/{position}.png"))
                .build()
                .into_media(position, Utc::now())
        };
        let customer = User {
            id: UserId::new(),
            name: "Ana".to_string(),
            email: "ana@example.test".to_string(),
        };
        let order = |customer_id| Order {
            id: OrderId::new(),
            ebazaar_id: ebazaar.id,
            customer_id,
            quantity: 2,
            total_cents: 1500,
            status: "paid".to_string(),
            created_at: Utc::now(),
        };
        let orders = vec![
            OrderWithCustomer {
                order: order(customer.id),
                customer: Some(customer.clone()),
            },
            OrderWithCustomer {
                order: order(UserId::new()),
                customer: None,
            },
        ];

        let view = EBazaarData::new(
            ebazaar.clone(),
            vec![media(1), media(0)],
            Some(orders),
            Utc::now(),
        );
        let json = serde_json::to_value(view).unwrap();

        assert_eq!(json["media"][0]["position"], json!(0));
        assert_eq!(json["media"][1]["position"], json!(1));
        assert_eq!(json["orders"][0]["customer"]["name"], json!("Ana"));
        assert!(json["orders"][1]["customer"].is_null());
    }

    #[test]
    fn media_with_equal_positions_fall_back_to_id_order() {
        let ebazaar = bazaar();
        let media = || {
            NewMedia::builder()
                .ebazaar_id(ebazaar.id)
                .kind(MediaKind::Image)
                .file_name("tie.png")
                .mime_type("image/png")
                .url("/media/tie.png")
                .build()
                .into_media(0, Utc::now())
        };
        let first = media();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = media();

        let forward = EBazaarData::new(
            ebazaar.clone(),
            vec![first.clone(), second.clone()],
            None,
            Utc::now(),
        );
        let reversed = EBazaarData::new(ebazaar, vec![second, first.clone()], None, Utc::now());

        let ids = |view: &EBazaarData| view.media.iter().map(|m| m.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&forward), ids(&reversed));
        assert_eq!(forward.media[0].id, first.id.to_string());
    }
}
