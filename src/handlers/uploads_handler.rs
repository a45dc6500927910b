use axum::{
    extract::{Multipart, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{AppError, AppResult, AppState};

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const PHOTO_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
];

const RESUME_TYPES: &[(&str, &str)] = &[
    ("application/pdf", ".pdf"),
    ("application/msword", ".doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
];

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePhotoInput {
    pub photo_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletePhotoResponse {
    pub success: bool,
}

/// POST /api/uploads/photo - multipart, field `file`. jpeg/png/gif up to 5 MB.
#[utoipa::path(
    post,
    path = "/api/uploads/photo",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported type, or too large"),
        (status = 502, description = "Storage backend unavailable")
    ),
    tag = "uploads"
)]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    store_upload(&state, multipart, "staff-photos", PHOTO_TYPES).await
}

/// POST /api/uploads/resume - multipart, field `file`. pdf/doc/docx up to 5 MB.
#[utoipa::path(
    post,
    path = "/api/uploads/resume",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Resume stored", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported type, or too large"),
        (status = 502, description = "Storage backend unavailable")
    ),
    tag = "uploads"
)]
pub async fn upload_resume(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    store_upload(&state, multipart, "staff-resumes", RESUME_TYPES).await
}

/// DELETE /api/uploads/photo with `{"photoUrl": "..."}`. Removal is
/// best-effort at the store but reported honestly here, so a stale URL pasted
/// by a client surfaces as 502 rather than silent success.
#[utoipa::path(
    delete,
    path = "/api/uploads/photo",
    request_body = DeletePhotoInput,
    responses(
        (status = 200, description = "Photo removed from storage", body = DeletePhotoResponse),
        (status = 400, description = "Missing photoUrl"),
        (status = 502, description = "Storage backend rejected the delete")
    ),
    tag = "uploads"
)]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DeletePhotoInput>,
) -> AppResult<Json<DeletePhotoResponse>> {
    if input.photo_url.trim().is_empty() {
        return Err(AppError::BadRequest("photoUrl is required".to_string()));
    }

    state.blob.delete(&input.photo_url).await?;
    Ok(Json(DeletePhotoResponse { success: true }))
}

async fn store_upload(
    state: &AppState,
    mut multipart: Multipart,
    prefix: &str,
    allowed: &[(&str, &str)],
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("File content type is required".to_string()))?
            .to_string();

        let ext = allowed
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Unsupported file type: {}", content_type))
            })?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(
                "File size must be less than 5MB".to_string(),
            ));
        }

        let key = object_key(prefix, ext);
        let url = state.blob.store(&key, bytes.to_vec(), &content_type).await?;
        tracing::info!(key = %key, size = bytes.len(), "Stored upload");
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

/// Keys carry a millisecond timestamp plus a random suffix so repeated
/// uploads of the same file never collide.
fn object_key(prefix: &str, ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{}/{}-{:06}{}", prefix, millis, suffix, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_carry_prefix_and_extension() {
        let key = object_key("staff-photos", ".jpg");
        assert!(key.starts_with("staff-photos/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn repeated_keys_do_not_collide() {
        let a = object_key("staff-resumes", ".pdf");
        let b = object_key("staff-resumes", ".pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn photo_types_map_to_expected_extensions() {
        let ext = |mime: &str| {
            PHOTO_TYPES
                .iter()
                .chain(RESUME_TYPES)
                .find(|(m, _)| *m == mime)
                .map(|(_, e)| *e)
        };
        assert_eq!(ext("image/png"), Some(".png"));
        assert_eq!(ext("application/pdf"), Some(".pdf"));
        assert_eq!(ext("text/html"), None);
    }
}
