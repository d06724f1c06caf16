//! Media upload and removal for e-bazaars

use tracing::{info, warn};
use uuid::Uuid;

use super::find_or_404;
use crate::common::{
    Actor, ApiError, Capability, EBazaarId, MediaId, Resource, StoreError, ValidationErrors,
};
use crate::domains::ebazaar::models::{Media, MediaKind, NewMedia};
use crate::kernel::ServerDeps;

const GENERIC_MIME: &str = "application/octet-stream";

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// The declared content type, falling back to a guess from the file name
    /// when the client sent none or a generic one.
    pub fn mime_type(&self) -> Option<String> {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() && declared != GENERIC_MIME => {
                Some(declared.to_ascii_lowercase())
            }
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_string()),
        }
    }

    fn extension(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    }

    fn validate(&self, kind: MediaKind, max_bytes: usize) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.bytes.is_empty() {
            errors.add("file", "The file field is required.");
            return Err(errors);
        }
        if self.bytes.len() > max_bytes {
            errors.add(
                "file",
                format!("The file may not be greater than {} kilobytes.", max_bytes / 1024),
            );
        }

        let mime = self.mime_type();
        match &mime {
            Some(mime) if kind.accepts(mime) => {}
            _ => errors.add(
                "file",
                format!(
                    "The file must be a file of type: {}.",
                    kind.allowed_mime_types().join(", ")
                ),
            ),
        }

        errors.into_result()?;
        Ok(mime.unwrap_or_default())
    }
}

/// Store an uploaded file and attach it to the e-bazaar.
pub async fn upload_media(
    actor: &Actor,
    ebazaar_id: EBazaarId,
    kind: MediaKind,
    file: UploadedFile,
    deps: &ServerDeps,
) -> Result<Media, ApiError> {
    actor.can(Capability::Update).on(Resource::EBazaar).check()?;

    find_or_404(ebazaar_id, deps).await?;
    let mime_type = file.validate(kind, deps.max_upload_bytes)?;

    let key = match file.extension() {
        Some(ext) => format!("ebazaars/{ebazaar_id}/{}.{ext}", Uuid::new_v4()),
        None => format!("ebazaars/{ebazaar_id}/{}", Uuid::new_v4()),
    };
    let url = deps.media_storage.put(&key, &file.bytes).await?;

    let new = NewMedia::builder()
        .ebazaar_id(ebazaar_id)
        .kind(kind)
        .file_name(file.file_name.clone().unwrap_or_else(|| key.clone()))
        .mime_type(mime_type)
        .size_bytes(file.bytes.len() as i64)
        .path(Some(key.clone()))
        .url(url)
        .build();

    let media = match deps.ebazaars.add_media(new).await {
        Ok(media) => media,
        Err(e) => {
            if let Err(cleanup) = deps.media_storage.delete(&key).await {
                warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    info!(
        ebazaar_id = %ebazaar_id,
        media_id = %media.id,
        kind = %kind,
        size = media.size_bytes,
        "Media uploaded"
    );
    Ok(media)
}

/// Detach a media item of the given kind and remove its stored file.
pub async fn delete_media(
    actor: &Actor,
    ebazaar_id: EBazaarId,
    kind: MediaKind,
    media_id: MediaId,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    actor.can(Capability::Update).on(Resource::EBazaar).check()?;

    find_or_404(ebazaar_id, deps).await?;

    let attached = deps.ebazaars.media_for(&[ebazaar_id]).await?;
    if !attached.iter().any(|m| m.id == media_id && m.kind == kind) {
        return Err(ApiError::NotFound(kind.label()));
    }

    let removed = deps
        .ebazaars
        .remove_media(ebazaar_id, media_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound(kind.label()),
            other => other.into(),
        })?;

    if let Some(path) = &removed.path {
        if let Err(e) = deps.media_storage.delete(path).await {
            warn!(media_id = %media_id, path = %path, error = %e, "Failed to remove media file");
        }
    }

    info!(ebazaar_id = %ebazaar_id, media_id = %media_id, "Media deleted");
    Ok(())
}
