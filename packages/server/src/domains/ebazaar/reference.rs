//! Reference data a client needs before it can fill in the e-bazaar form.

use serde::Serialize;

use crate::domains::ebazaar::models::MediaKind;

pub const CATEGORIES: &[&str] = &[
    "fashion",
    "food",
    "electronics",
    "crafts",
    "home",
    "beauty",
    "other",
];

pub const LOCATIONS: &[&str] = &["online", "main-stage", "market-hall", "outdoor"];

pub fn is_category(value: &str) -> bool {
    CATEGORIES.contains(&value)
}

pub fn is_location(value: &str) -> bool {
    LOCATIONS.contains(&value)
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaLimits {
    pub max_upload_bytes: usize,
    pub image_mime_types: &'static [&'static str],
    pub video_mime_types: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
    pub categories: &'static [&'static str],
    pub locations: &'static [&'static str],
    pub media: MediaLimits,
}

impl ReferenceData {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            categories: CATEGORIES,
            locations: LOCATIONS,
            media: MediaLimits {
                max_upload_bytes,
                image_mime_types: MediaKind::Image.allowed_mime_types(),
                video_mime_types: MediaKind::Video.allowed_mime_types(),
            },
        }
    }
}
