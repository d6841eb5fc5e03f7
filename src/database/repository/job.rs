use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::{fetch_count, fetch_page, JobStore};
use crate::database::models::{DeletedState, Job, JobPatch};
use crate::database::{DatabaseError, DatabaseManager};
use crate::filter::ListingFilter;

pub struct PgJobStore {
    db: DatabaseManager,
}

impl PgJobStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    async fn select(&self, sql: &str) -> Result<Vec<Job>, DatabaseError> {
        let q = sqlx::query_as::<_, Job>(sql);
        self.db.timed(q.fetch_all(self.db.pool())).await
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list_all(&self) -> Result<Vec<Job>, DatabaseError> {
        self.select(r#"SELECT * FROM "pekerjaan" ORDER BY "created_at" DESC, "id" ASC"#)
            .await
    }

    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Job>, DatabaseError> {
        fetch_page(&self.db, filter).await
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError> {
        fetch_count(&self.db, filter).await
    }

    async fn list_trashed(&self) -> Result<Vec<Job>, DatabaseError> {
        self.select(
            r#"SELECT * FROM "pekerjaan" WHERE "isdellete" = 'yes' ORDER BY "updated_at" DESC, "id" ASC"#,
        )
        .await
    }

    async fn list_by_alumni(&self, alumni_id: i32) -> Result<Vec<Job>, DatabaseError> {
        let q = sqlx::query_as::<_, Job>(
            r#"SELECT * FROM "pekerjaan" WHERE "alumni_id" = $1 ORDER BY "tanggal_mulai_kerja" DESC, "id" ASC"#,
        )
        .bind(alumni_id);
        self.db.timed(q.fetch_all(self.db.pool())).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DatabaseError> {
        let q = sqlx::query_as::<_, Job>(r#"SELECT * FROM "pekerjaan" WHERE "id" = $1"#).bind(id);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn find_by_legacy_id(&self, legacy_id: i32) -> Result<Option<Job>, DatabaseError> {
        let q = sqlx::query_as::<_, Job>(
            r#"SELECT * FROM "pekerjaan" WHERE "legacy_id" = $1 ORDER BY "created_at" ASC LIMIT 1"#,
        )
        .bind(legacy_id);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn next_legacy_id(&self) -> Result<i32, DatabaseError> {
        // Skip past ids supplied explicitly on earlier inserts
        let q = sqlx::query(
            r#"SELECT GREATEST(
                   nextval('pekerjaan_legacy_id_seq'),
                   (SELECT COALESCE(MAX("legacy_id"), 0) + 1 FROM "pekerjaan")
               )::INTEGER AS next"#,
        );
        let row = self.db.timed(q.fetch_one(self.db.pool())).await?;
        let next: i32 = row.try_get("next")?;
        Ok(next)
    }

    async fn insert(&self, job: &Job) -> Result<(), DatabaseError> {
        let q = sqlx::query(
            r#"INSERT INTO "pekerjaan"
                ("id", "legacy_id", "alumni_id", "nama_perusahaan", "posisi_jabatan",
                 "bidang_industri", "lokasi_kerja", "gaji_range", "tanggal_mulai_kerja",
                 "tanggal_selesai_kerja", "status_pekerjaan", "isdellete",
                 "deskripsi_pekerjaan", "created_at", "updated_at")
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"#,
        )
        .bind(job.id)
        .bind(job.legacy_id)
        .bind(job.alumni_id)
        .bind(&job.nama_perusahaan)
        .bind(&job.posisi_jabatan)
        .bind(&job.bidang_industri)
        .bind(&job.lokasi_kerja)
        .bind(&job.gaji_range)
        .bind(job.tanggal_mulai_kerja)
        .bind(job.tanggal_selesai_kerja)
        .bind(&job.status_pekerjaan)
        .bind(job.deleted.as_str())
        .bind(&job.deskripsi_pekerjaan)
        .bind(job.created_at)
        .bind(job.updated_at);
        self.db.timed(q.execute(self.db.pool())).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Job>, DatabaseError> {
        // COALESCE keeps required columns; nullable ones take a (present, value) pair
        let q = sqlx::query_as::<_, Job>(
            r#"UPDATE "pekerjaan" SET
                "alumni_id" = COALESCE($2, "alumni_id"),
                "nama_perusahaan" = COALESCE($3, "nama_perusahaan"),
                "posisi_jabatan" = COALESCE($4, "posisi_jabatan"),
                "bidang_industri" = COALESCE($5, "bidang_industri"),
                "lokasi_kerja" = COALESCE($6, "lokasi_kerja"),
                "gaji_range" = CASE WHEN $7 THEN $8 ELSE "gaji_range" END,
                "tanggal_mulai_kerja" = COALESCE($9, "tanggal_mulai_kerja"),
                "tanggal_selesai_kerja" = CASE WHEN $10 THEN $11 ELSE "tanggal_selesai_kerja" END,
                "status_pekerjaan" = COALESCE($12, "status_pekerjaan"),
                "deskripsi_pekerjaan" = CASE WHEN $13 THEN $14 ELSE "deskripsi_pekerjaan" END,
                "updated_at" = $15
               WHERE "id" = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(patch.alumni_id)
        .bind(&patch.nama_perusahaan)
        .bind(&patch.posisi_jabatan)
        .bind(&patch.bidang_industri)
        .bind(&patch.lokasi_kerja)
        .bind(patch.gaji_range.is_some())
        .bind(patch.gaji_range.as_ref().and_then(|v| v.as_deref()))
        .bind(patch.tanggal_mulai_kerja)
        .bind(patch.tanggal_selesai_kerja.is_some())
        .bind(patch.tanggal_selesai_kerja.flatten())
        .bind(&patch.status_pekerjaan)
        .bind(patch.deskripsi_pekerjaan.is_some())
        .bind(patch.deskripsi_pekerjaan.as_ref().and_then(|v| v.as_deref()))
        .bind(now);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }

    async fn set_deleted(
        &self,
        id: Uuid,
        state: DeletedState,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let q = sqlx::query(r#"UPDATE "pekerjaan" SET "isdellete" = $2, "updated_at" = $3 WHERE "id" = $1"#)
            .bind(id)
            .bind(state.as_str())
            .bind(now);
        let result = self.db.timed(q.execute(self.db.pool())).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let q = sqlx::query(r#"DELETE FROM "pekerjaan" WHERE "id" = $1"#).bind(id);
        let result = self.db.timed(q.execute(self.db.pool())).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_started_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, DatabaseError> {
        let q = sqlx::query(
            r#"SELECT COUNT(*) AS count FROM "pekerjaan"
               WHERE "tanggal_mulai_kerja" >= $1 AND "tanggal_mulai_kerja" < $2"#,
        )
        .bind(from)
        .bind(to);
        let row = self.db.timed(q.fetch_one(self.db.pool())).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}
