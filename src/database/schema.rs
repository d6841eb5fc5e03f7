// database/schema.rs - idempotent table setup run at startup

use tracing::info;

use super::{DatabaseError, DatabaseManager};

const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "users" (
        "id" UUID PRIMARY KEY,
        "username" TEXT NOT NULL UNIQUE,
        "email" TEXT NOT NULL UNIQUE,
        "role" TEXT NOT NULL CHECK ("role" IN ('admin', 'user')),
        "password_hash" TEXT NOT NULL,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "alumni" (
        "id" UUID PRIMARY KEY,
        "nim" TEXT NOT NULL,
        "nama" TEXT NOT NULL,
        "jurusan" TEXT NOT NULL,
        "angkatan" INTEGER NOT NULL,
        "tahun_lulus" INTEGER NOT NULL,
        "email" TEXT NOT NULL,
        "no_telepon" TEXT,
        "alamat" TEXT,
        "created_at" TIMESTAMPTZ NOT NULL,
        "updated_at" TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE SEQUENCE IF NOT EXISTS "pekerjaan_legacy_id_seq""#,
    r#"CREATE TABLE IF NOT EXISTS "pekerjaan" (
        "id" UUID PRIMARY KEY,
        "legacy_id" INTEGER NOT NULL,
        "alumni_id" INTEGER NOT NULL,
        "nama_perusahaan" TEXT NOT NULL,
        "posisi_jabatan" TEXT NOT NULL,
        "bidang_industri" TEXT NOT NULL,
        "lokasi_kerja" TEXT NOT NULL,
        "gaji_range" TEXT,
        "tanggal_mulai_kerja" DATE NOT NULL,
        "tanggal_selesai_kerja" DATE,
        "status_pekerjaan" TEXT NOT NULL,
        "isdellete" TEXT NOT NULL DEFAULT 'no' CHECK ("isdellete" IN ('no', 'yes')),
        "deskripsi_pekerjaan" TEXT,
        "created_at" TIMESTAMPTZ NOT NULL,
        "updated_at" TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "pekerjaan_legacy_id_idx" ON "pekerjaan" ("legacy_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "pekerjaan_alumni_id_idx" ON "pekerjaan" ("alumni_id")"#,
    r#"CREATE TABLE IF NOT EXISTS "files" (
        "id" UUID PRIMARY KEY,
        "user_id" UUID NOT NULL,
        "file_name" TEXT NOT NULL,
        "original_name" TEXT NOT NULL,
        "file_path" TEXT NOT NULL,
        "file_size" BIGINT NOT NULL,
        "file_type" TEXT NOT NULL,
        "category" TEXT NOT NULL CHECK ("category" IN ('foto', 'sertifikat')),
        "uploaded_at" TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "files_user_id_idx" ON "files" ("user_id")"#,
];

pub async fn ensure_schema(db: &DatabaseManager) -> Result<(), DatabaseError> {
    for statement in STATEMENTS {
        db.timed(sqlx::query(statement).execute(db.pool())).await?;
    }
    info!("Database schema ready ({} statements)", STATEMENTS.len());
    Ok(())
}
