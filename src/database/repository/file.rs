use async_trait::async_trait;
use uuid::Uuid;

use super::FileStore;
use crate::database::models::FileRecord;
use crate::database::{DatabaseError, DatabaseManager};

pub struct PgFileStore {
    db: DatabaseManager,
}

impl PgFileStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn insert(&self, file: &FileRecord) -> Result<(), DatabaseError> {
        let q = sqlx::query(
            r#"INSERT INTO "files"
                ("id", "user_id", "file_name", "original_name", "file_path",
                 "file_size", "file_type", "category", "uploaded_at")
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(file.id)
        .bind(file.user_id)
        .bind(&file.file_name)
        .bind(&file.original_name)
        .bind(&file.file_path)
        .bind(file.file_size)
        .bind(&file.file_type)
        .bind(file.category.as_str())
        .bind(file.uploaded_at);
        self.db.timed(q.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, DatabaseError> {
        let q = sqlx::query_as::<_, FileRecord>(r#"SELECT * FROM "files" ORDER BY "uploaded_at" DESC"#);
        self.db.timed(q.fetch_all(self.db.pool())).await
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<FileRecord>, DatabaseError> {
        let q = sqlx::query_as::<_, FileRecord>(
            r#"SELECT * FROM "files" WHERE "user_id" = $1 ORDER BY "uploaded_at" DESC"#,
        )
        .bind(user_id);
        self.db.timed(q.fetch_all(self.db.pool())).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DatabaseError> {
        let q = sqlx::query_as::<_, FileRecord>(r#"SELECT * FROM "files" WHERE "id" = $1"#).bind(id);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let q = sqlx::query(r#"DELETE FROM "files" WHERE "id" = $1"#).bind(id);
        let result = self.db.timed(q.execute(self.db.pool())).await?;
        Ok(result.rows_affected() > 0)
    }
}
