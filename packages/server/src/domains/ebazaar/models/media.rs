use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{EBazaarId, MediaId};

/// Media - an image or video attached to an e-bazaar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Media {
    pub id: MediaId,
    pub ebazaar_id: EBazaarId,
    #[sqlx(try_from = "String")]
    pub kind: MediaKind,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub path: Option<String>, // storage key; None for external references
    pub url: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Media kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Accepted upload mime types for this kind
    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &["image/jpeg", "image/png", "image/gif", "image/webp"],
            MediaKind::Video => &["video/mp4", "video/webm", "video/quicktime"],
        }
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        self.allowed_mime_types()
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }

    /// Label used in response envelopes and notices
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid media kind: {0}")]
pub struct InvalidMediaKind(String);

impl std::str::FromStr for MediaKind {
    type Err = InvalidMediaKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(InvalidMediaKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for MediaKind {
    type Error = InvalidMediaKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Insert parameters for a media row. The store assigns `position`.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewMedia {
    #[builder(default = MediaId::new())]
    pub id: MediaId,
    pub ebazaar_id: EBazaarId,
    pub kind: MediaKind,
    pub file_name: String,
    pub mime_type: String,
    #[builder(default)]
    pub size_bytes: i64,
    #[builder(default)]
    pub path: Option<String>,
    pub url: String,
}

impl NewMedia {
    pub fn into_media(self, position: i32, now: DateTime<Utc>) -> Media {
        Media {
            id: self.id,
            ebazaar_id: self.ebazaar_id,
            kind: self.kind,
            file_name: self.file_name,
            mime_type: self.mime_type,
            size_bytes: self.size_bytes,
            path: self.path,
            url: self.url,
            position,
            created_at: now,
        }
    }
}
