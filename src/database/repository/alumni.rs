use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{fetch_count, fetch_page, AlumniStore};
use crate::database::models::{Alumni, AlumniPatch};
use crate::database::{DatabaseError, DatabaseManager};
use crate::filter::ListingFilter;

pub struct PgAlumniStore {
    db: DatabaseManager,
}

impl PgAlumniStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlumniStore for PgAlumniStore {
    async fn list_all(&self) -> Result<Vec<Alumni>, DatabaseError> {
        let q = sqlx::query_as::<_, Alumni>(r#"SELECT * FROM "alumni" ORDER BY "nama" ASC, "id" ASC"#);
        self.db.timed(q.fetch_all(self.db.pool())).await
    }

    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Alumni>, DatabaseError> {
        fetch_page(&self.db, filter).await
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError> {
        fetch_count(&self.db, filter).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Alumni>, DatabaseError> {
        let q = sqlx::query_as::<_, Alumni>(r#"SELECT * FROM "alumni" WHERE "id" = $1"#).bind(id);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn insert(&self, alumni: &Alumni) -> Result<(), DatabaseError> {
        let q = sqlx::query(
            r#"INSERT INTO "alumni"
                ("id", "nim", "nama", "jurusan", "angkatan", "tahun_lulus", "email",
                 "no_telepon", "alamat", "created_at", "updated_at")
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(alumni.id)
        .bind(&alumni.nim)
        .bind(&alumni.nama)
        .bind(&alumni.jurusan)
        .bind(alumni.angkatan)
        .bind(alumni.tahun_lulus)
        .bind(&alumni.email)
        .bind(&alumni.no_telepon)
        .bind(&alumni.alamat)
        .bind(alumni.created_at)
        .bind(alumni.updated_at);
        self.db.timed(q.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &AlumniPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Alumni>, DatabaseError> {
        // NULL keeps required columns; contact fields take a (present, value) pair
        let q = sqlx::query_as::<_, Alumni>(
            r#"UPDATE "alumni" SET
                "nim" = COALESCE($2, "nim"),
                "nama" = COALESCE($3, "nama"),
                "jurusan" = COALESCE($4, "jurusan"),
                "angkatan" = COALESCE($5, "angkatan"),
                "tahun_lulus" = COALESCE($6, "tahun_lulus"),
                "email" = COALESCE($7, "email"),
                "no_telepon" = CASE WHEN $8 THEN $9 ELSE "no_telepon" END,
                "alamat" = CASE WHEN $10 THEN $11 ELSE "alamat" END,
                "updated_at" = $12
               WHERE "id" = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&patch.nim)
        .bind(&patch.nama)
        .bind(&patch.jurusan)
        .bind(patch.angkatan)
        .bind(patch.tahun_lulus)
        .bind(&patch.email)
        .bind(patch.no_telepon.is_some())
        .bind(patch.no_telepon.as_ref().and_then(|v| v.as_deref()))
        .bind(patch.alamat.is_some())
        .bind(patch.alamat.as_ref().and_then(|v| v.as_deref()))
        .bind(now);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let q = sqlx::query(r#"DELETE FROM "alumni" WHERE "id" = $1"#).bind(id);
        let result = self.db.timed(q.execute(self.db.pool())).await?;
        Ok(result.rows_affected() > 0)
    }
}
