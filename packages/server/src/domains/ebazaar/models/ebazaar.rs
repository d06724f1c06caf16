use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::common::{EBazaarId, UserId};

/// EBazaar - a scheduled live marketplace event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EBazaar {
    pub id: EBazaarId,
    pub uuid: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EBazaar {
    /// Live when `now` falls inside the window, both ends inclusive.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now && now <= self.end_at
    }

    /// Rewrite the editable fields, bumping `updated_at`.
    pub fn apply(&mut self, changes: EBazaarChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.description = changes.description;
        self.category = changes.category;
        self.location = changes.location;
        self.start_at = changes.start_at;
        self.end_at = changes.end_at;
        self.updated_at = now;
    }
}

/// Insert parameters for an e-bazaar.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewEBazaar {
    #[builder(default = EBazaarId::new())]
    pub id: EBazaarId,
    #[builder(default = Uuid::new_v4())]
    pub uuid: Uuid,
    pub title: String,
    #[builder(default)]
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[builder(default)]
    pub created_by: Option<UserId>,
}

impl NewEBazaar {
    pub fn into_ebazaar(self, now: DateTime<Utc>) -> EBazaar {
        EBazaar {
            id: self.id,
            uuid: self.uuid,
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            start_at: self.start_at,
            end_at: self.end_at,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The editable fields; an update always rewrites all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct EBazaarChanges {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}
