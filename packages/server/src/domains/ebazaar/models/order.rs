use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{EBazaarId, OrderId, UserId};
use crate::domains::member::User;

/// Order - a purchase placed during an e-bazaar. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub ebazaar_id: EBazaarId,
    pub customer_id: UserId,
    pub quantity: i32,
    pub total_cents: i64,
    pub status: String, // 'pending', 'paid', 'cancelled'
    pub created_at: DateTime<Utc>,
}

/// An order with its customer resolved (None if the user row is gone)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithCustomer {
    pub order: Order,
    pub customer: Option<User>,
}
