// services/file_service.rs - upload validation, disk storage and ownership checks

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::{parse_id, Caller, ServiceError};
use crate::database::models::{FileCategory, FileRecord};
use crate::database::repository::FileStore;

/// One file part taken from a multipart request
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct FileService {
    store: Arc<dyn FileStore>,
    root: PathBuf,
}

impl FileService {
    pub fn new(store: Arc<dyn FileStore>, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            root: root.into(),
        }
    }

    /// Validate, write to `<root>/<category>/<uuid><ext>`, then record metadata.
    /// Admins may upload on behalf of `target_id`; other callers only for themselves.
    pub async fn upload(
        &self,
        caller: Caller,
        target_id: Option<&str>,
        category: &str,
        upload: FileUpload,
    ) -> Result<FileRecord, ServiceError> {
        let owner = resolve_owner(caller, target_id)?;
        let category = FileCategory::parse(category)
            .ok_or_else(|| ServiceError::validation(format!("Unknown file category '{}'", category)))?;
        let file_type = validate(category, &upload)?;

        let file_name = stored_name(&file_type);
        let dir = self.root.join(category.as_str());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes).await?;

        let record = FileRecord {
            id: Uuid::new_v4(),
            user_id: owner,
            file_name,
            original_name: upload.original_name,
            file_path: path.to_string_lossy().into_owned(),
            file_size: upload.bytes.len() as i64,
            file_type,
            category,
            uploaded_at: Utc::now(),
        };

        if let Err(e) = self.store.insert(&record).await {
            if let Err(io) = tokio::fs::remove_file(&path).await {
                warn!("Could not remove orphaned upload {}: {}", path.display(), io);
            }
            return Err(e.into());
        }

        info!(
            "Stored {} upload {} ({} bytes) for user {}",
            category.as_str(),
            record.id,
            record.file_size,
            owner
        );
        Ok(record)
    }

    /// Admins see every file, other callers only their own
    pub async fn list(&self, caller: Caller) -> Result<Vec<FileRecord>, ServiceError> {
        let files = if caller.is_admin() {
            self.store.list_all().await?
        } else {
            self.store.list_by_owner(caller.user_id).await?
        };
        Ok(files)
    }

    pub async fn get(&self, caller: Caller, id: &str) -> Result<FileRecord, ServiceError> {
        let id = parse_id(id, "File")?;
        let file = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("File not found".to_string()))?;

        if !caller.is_admin() && file.user_id != caller.user_id {
            warn!("User {} denied access to file {}", caller.user_id, file.id);
            return Err(ServiceError::Forbidden("You do not have access to this file".to_string()));
        }
        Ok(file)
    }

    /// Removes the bytes first, then the metadata row
    pub async fn delete(&self, caller: Caller, id: &str) -> Result<(), ServiceError> {
        let file = self.get(caller, id).await?;

        match tokio::fs::remove_file(&file.file_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("File {} was already missing from disk at {}", file.id, file.file_path);
            }
            Err(e) => return Err(e.into()),
        }

        if !self.store.delete(file.id).await? {
            return Err(ServiceError::NotFound("File not found".to_string()));
        }
        info!("Deleted file {}", file.id);
        Ok(())
    }
}

fn resolve_owner(caller: Caller, target_id: Option<&str>) -> Result<Uuid, ServiceError> {
    let target = match target_id.map(str::trim).filter(|s| !s.is_empty()) {
        None => return Ok(caller.user_id),
        Some(raw) => Uuid::parse_str(raw).map_err(|_| ServiceError::validation("Invalid target_id"))?,
    };

    if target != caller.user_id && !caller.is_admin() {
        warn!("User {} tried to upload for {}", caller.user_id, target);
        return Err(ServiceError::Forbidden("You can only upload files for yourself".to_string()));
    }
    Ok(target)
}

/// Returns the normalized MIME type on success
fn validate(category: FileCategory, upload: &FileUpload) -> Result<String, ServiceError> {
    if upload.bytes.is_empty() {
        return Err(ServiceError::validation("File is empty"));
    }
    if upload.bytes.len() as u64 > category.max_size() {
        return Err(ServiceError::validation(format!(
            "File exceeds the {} byte limit for {}",
            category.max_size(),
            category.as_str()
        )));
    }

    let file_type = upload
        .content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !category.allowed_types().contains(&file_type.as_str()) {
        return Err(ServiceError::validation(format!(
            "File type '{}' is not allowed for {}; expected one of {}",
            file_type,
            category.as_str(),
            category.allowed_types().join(", ")
        )));
    }
    Ok(file_type)
}

/// `<uuid v4><extension>`, the extension following the validated MIME type
/// rather than the client's file name, since everything stored is served back
fn stored_name(file_type: &str) -> String {
    let extension = match file_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "application/pdf" => ".pdf",
        _ => "",
    };
    format!("{}{}", Uuid::new_v4(), extension)
}
