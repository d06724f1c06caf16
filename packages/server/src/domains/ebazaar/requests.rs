//! Request payloads for creating and updating e-bazaars, and their validation.
//!
//! Validation collects every failing field before anything is written.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::ValidationErrors;
use crate::domains::ebazaar::models::{EBazaarChanges, MediaKind};
use crate::domains::ebazaar::reference::{is_category, is_location};

pub const MAX_TITLE_CHARS: usize = 255;

/// Body of `POST /api/ebazaars` and `PATCH /api/ebazaars/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EBazaarPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    /// Media already hosted elsewhere, attached on create
    #[serde(default)]
    pub media: Vec<MediaReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaReference {
    pub kind: Option<String>,
    pub url: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

/// A media reference that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMediaReference {
    pub kind: MediaKind,
    pub url: String,
    pub file_name: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidEBazaar {
    pub changes: EBazaarChanges,
    pub media: Vec<ValidMediaReference>,
}

impl EBazaarPayload {
    pub fn validate(self) -> Result<ValidEBazaar, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required(&mut errors, "title", self.title);
        if let Some(title) = &title {
            if title.chars().count() > MAX_TITLE_CHARS {
                errors.add(
                    "title",
                    format!("The title may not be greater than {MAX_TITLE_CHARS} characters."),
                );
            }
        }

        let category = required(&mut errors, "category", self.category);
        if let Some(category) = &category {
            if !is_category(category) {
                errors.add("category", "The selected category is invalid.");
            }
        }

        let location = required(&mut errors, "location", self.location);
        if let Some(location) = &location {
            if !is_location(location) {
                errors.add("location", "The selected location is invalid.");
            }
        }

        let start_at = timestamp(&mut errors, "start_at", self.start_at);
        let end_at = timestamp(&mut errors, "end_at", self.end_at);
        if let (Some(start), Some(end)) = (start_at, end_at) {
            if end <= start {
                errors.add("end_at", "The end at must be a date after start at.");
            }
        }

        let media: Vec<ValidMediaReference> = self
            .media
            .into_iter()
            .enumerate()
            .filter_map(|(index, reference)| reference.validate(index, &mut errors))
            .collect();

        errors.into_result()?;

        // Every field above is Some once no errors were recorded.
        match (title, category, location, start_at, end_at) {
            (Some(title), Some(category), Some(location), Some(start_at), Some(end_at)) => {
                Ok(ValidEBazaar {
                    changes: EBazaarChanges {
                        title,
                        description: self
                            .description
                            .map(|d| d.trim().to_string())
                            .filter(|d| !d.is_empty()),
                        category,
                        location,
                        start_at,
                        end_at,
                    },
                    media,
                })
            }
            _ => Err(ValidationErrors::single("title", "The title field is required.")),
        }
    }
}

impl MediaReference {
    fn validate(self, index: usize, errors: &mut ValidationErrors) -> Option<ValidMediaReference> {
        let kind_field = format!("media.{index}.kind");
        let url_field = format!("media.{index}.url");

        let kind = match self.kind.as_deref().map(str::trim) {
            Some("image") => Some(MediaKind::Image),
            Some("video") => Some(MediaKind::Video),
            _ => {
                errors.add(&kind_field, format!("The selected {kind_field} is invalid."));
                None
            }
        };

        let url = self
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if url.is_none() {
            errors.add(&url_field, format!("The {url_field} field is required."));
        }

        let (kind, url) = (kind?, url?);
        let file_name = self
            .file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| file_name_from_url(&url));
        let mime_type = self
            .mime_type
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });
        if !kind.accepts(&mime_type) {
            errors.add(
                format!("media.{index}.mime_type"),
                format!(
                    "The media.{index}.mime_type must be one of: {}.",
                    kind.allowed_mime_types().join(", ")
                ),
            );
            return None;
        }

        Some(ValidMediaReference {
            kind,
            url,
            file_name,
            mime_type,
        })
    }
}

fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("media")
        .to_string()
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if value.is_none() {
        errors.add(field, format!("The {} field is required.", field.replace('_', " ")));
    }
    value
}

fn timestamp(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<DateTime<Utc>> {
    let raw = required(errors, field, value)?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => {
            errors.add(
                field,
                format!("The {} is not a valid date.", field.replace('_', " ")),
            );
            None
        }
    }
}
