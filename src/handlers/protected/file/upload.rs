// handlers/protected/file/upload.rs - POST /api/file/:category (multipart)

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::FileUpload;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Admins may store the file on behalf of this user id
    pub target_id: Option<String>,
}

/// Expects the bytes in a part named `file`
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(category): Path<String>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let upload = read_file_part(&mut multipart).await?;
    let record = state
        .files
        .upload(user.caller(), query.target_id.as_deref(), &category, upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "File uploaded", "data": record })),
    ))
}

async fn read_file_part(multipart: &mut Multipart) -> Result<FileUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        return Ok(FileUpload {
            original_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::validation_error("Missing 'file' field", None))
}
