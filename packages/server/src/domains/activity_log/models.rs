use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{ActivityId, UserId};

/// Audit log channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogName {
    Chat,
    Ebazaar,
}

impl LogName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogName::Chat => "chat",
            LogName::Ebazaar => "ebazaar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEvent {
    Created,
    Updated,
    Deleted,
}

impl ActivityEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEvent::Created => "created",
            ActivityEvent::Updated => "updated",
            ActivityEvent::Deleted => "deleted",
        }
    }
}

/// One audit entry, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub id: ActivityId,
    pub log_name: LogName,
    pub event: ActivityEvent,
    pub subject_id: Uuid,
    pub causer_id: Option<UserId>,
    /// `{"attributes": {...}, "old": {...}}`, changed fields only
    pub properties: Value,
}

impl NewActivity {
    pub fn new(
        log_name: LogName,
        event: ActivityEvent,
        subject_id: impl Into<Uuid>,
        causer_id: Option<UserId>,
        properties: Value,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            log_name,
            event,
            subject_id: subject_id.into(),
            causer_id,
            properties,
        }
    }

    pub fn description(&self) -> &'static str {
        self.event.as_str()
    }
}
