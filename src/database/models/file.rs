use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

const MIB: u64 = 1024 * 1024;

/// Upload category; each has its own MIME allow-list and size cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Foto,
    Sertifikat,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Foto => "foto",
            FileCategory::Sertifikat => "sertifikat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "foto" => Some(FileCategory::Foto),
            "sertifikat" => Some(FileCategory::Sertifikat),
            _ => None,
        }
    }

    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Foto => &["image/jpeg", "image/png"],
            FileCategory::Sertifikat => &["application/pdf"],
        }
    }

    pub fn max_size(&self) -> u64 {
        match self {
            FileCategory::Foto => MIB,
            FileCategory::Sertifikat => 2 * MIB,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    /// Owner of the file
    pub user_id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub category: FileCategory,
    pub uploaded_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for FileRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let category: String = row.try_get("category")?;
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            file_name: row.try_get("file_name")?,
            original_name: row.try_get("original_name")?,
            file_path: row.try_get("file_path")?,
            file_size: row.try_get("file_size")?,
            file_type: row.try_get("file_type")?,
            category: FileCategory::parse(&category).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: format!("unknown file category '{}'", category).into(),
            })?,
            uploaded_at: row.try_get("uploaded_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_limits() {
        assert_eq!(FileCategory::Foto.max_size(), 1024 * 1024);
        assert_eq!(FileCategory::Sertifikat.max_size(), 2 * 1024 * 1024);
        assert!(FileCategory::Foto.allowed_types().contains(&"image/png"));
        assert!(!FileCategory::Foto.allowed_types().contains(&"application/pdf"));
        assert_eq!(FileCategory::parse("video"), None);
    }
}
