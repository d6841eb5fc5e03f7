use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use super::nullable;
use crate::filter::ListingColumns;

/// Search, sort whitelist and default sort for `GET /api/pekerjaan/pag`
pub static JOB_LISTING: ListingColumns = ListingColumns {
    table: "pekerjaan",
    search: &["nama_perusahaan", "posisi_jabatan", "bidang_industri", "lokasi_kerja"],
    sortable: &[
        "nama_perusahaan",
        "posisi_jabatan",
        "bidang_industri",
        "lokasi_kerja",
        "tanggal_mulai_kerja",
        "status_pekerjaan",
        "created_at",
    ],
    default_sort: "tanggal_mulai_kerja",
};

/// Soft-delete flag. Stored and serialized as "no"/"yes".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletedState {
    #[default]
    #[serde(rename = "no")]
    Active,
    #[serde(rename = "yes")]
    Trashed,
}

impl DeletedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletedState::Active => "no",
            DeletedState::Trashed => "yes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no" => Some(DeletedState::Active),
            "yes" => Some(DeletedState::Trashed),
            _ => None,
        }
    }
}

/// Employment history entry.
///
/// `alumni_id` is the integer alumni id of the previous schema. It does not
/// refer to [`super::Alumni::id`], which lives in the UUID id space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub legacy_id: i32,
    pub alumni_id: i32,
    pub nama_perusahaan: String,
    pub posisi_jabatan: String,
    pub bidang_industri: String,
    pub lokasi_kerja: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaji_range: Option<String>,
    pub tanggal_mulai_kerja: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_selesai_kerja: Option<NaiveDate>,
    pub status_pekerjaan: String,
    #[serde(rename = "isdellete")]
    pub deleted: DeletedState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi_pekerjaan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Job {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let deleted: String = row.try_get("isdellete")?;
        Ok(Self {
            id: row.try_get("id")?,
            legacy_id: row.try_get("legacy_id")?,
            alumni_id: row.try_get("alumni_id")?,
            nama_perusahaan: row.try_get("nama_perusahaan")?,
            posisi_jabatan: row.try_get("posisi_jabatan")?,
            bidang_industri: row.try_get("bidang_industri")?,
            lokasi_kerja: row.try_get("lokasi_kerja")?,
            gaji_range: row.try_get("gaji_range")?,
            tanggal_mulai_kerja: row.try_get("tanggal_mulai_kerja")?,
            tanggal_selesai_kerja: row.try_get("tanggal_selesai_kerja")?,
            status_pekerjaan: row.try_get("status_pekerjaan")?,
            deleted: DeletedState::parse(&deleted).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "isdellete".to_string(),
                source: format!("unknown deleted flag '{}'", deleted).into(),
            })?,
            deskripsi_pekerjaan: row.try_get("deskripsi_pekerjaan")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    /// Keeps an id from the previous schema; assigned from a sequence when absent
    #[serde(default)]
    pub legacy_id: Option<i32>,
    pub alumni_id: i32,
    pub nama_perusahaan: String,
    pub posisi_jabatan: String,
    pub bidang_industri: String,
    pub lokasi_kerja: String,
    #[serde(default)]
    pub gaji_range: Option<String>,
    #[serde(default)]
    pub tanggal_mulai_kerja: Option<NaiveDate>,
    #[serde(default)]
    pub tanggal_selesai_kerja: Option<NaiveDate>,
    #[serde(default)]
    pub status_pekerjaan: Option<String>,
    #[serde(default)]
    pub deskripsi_pekerjaan: Option<String>,
}

impl JobInput {
    pub fn field_errors(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for (field, value) in [
            ("nama_perusahaan", &self.nama_perusahaan),
            ("posisi_jabatan", &self.posisi_jabatan),
            ("bidang_industri", &self.bidang_industri),
            ("lokasi_kerja", &self.lokasi_kerja),
        ] {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), "This field is required".to_string());
            }
        }
        if let (Some(start), Some(end)) = (self.tanggal_mulai_kerja, self.tanggal_selesai_kerja) {
            if end < start {
                errors.insert(
                    "tanggal_selesai_kerja".to_string(),
                    "End date is before start date".to_string(),
                );
            }
        }
        errors
    }

    /// New jobs always start active; start date defaults to today
    pub fn into_record(self, legacy_id: i32, now: DateTime<Utc>) -> Job {
        Job {
            id: Uuid::new_v4(),
            legacy_id,
            alumni_id: self.alumni_id,
            nama_perusahaan: self.nama_perusahaan,
            posisi_jabatan: self.posisi_jabatan,
            bidang_industri: self.bidang_industri,
            lokasi_kerja: self.lokasi_kerja,
            gaji_range: self.gaji_range,
            tanggal_mulai_kerja: self.tanggal_mulai_kerja.unwrap_or_else(|| now.date_naive()),
            tanggal_selesai_kerja: self.tanggal_selesai_kerja,
            status_pekerjaan: self.status_pekerjaan.unwrap_or_else(|| "aktif".to_string()),
            deleted: DeletedState::Active,
            deskripsi_pekerjaan: self.deskripsi_pekerjaan,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields keep their stored value; `null` clears the
/// optional ones (`gaji_range`, `tanggal_selesai_kerja`, `deskripsi_pekerjaan`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub alumni_id: Option<i32>,
    pub nama_perusahaan: Option<String>,
    pub posisi_jabatan: Option<String>,
    pub bidang_industri: Option<String>,
    pub lokasi_kerja: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub gaji_range: Option<Option<String>>,
    pub tanggal_mulai_kerja: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub tanggal_selesai_kerja: Option<Option<NaiveDate>>,
    pub status_pekerjaan: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub deskripsi_pekerjaan: Option<Option<String>>,
}

impl JobPatch {
    /// A patch may omit required fields but may not blank them out
    pub fn field_errors(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for (field, value) in [
            ("nama_perusahaan", &self.nama_perusahaan),
            ("posisi_jabatan", &self.posisi_jabatan),
            ("bidang_industri", &self.bidang_industri),
            ("lokasi_kerja", &self.lokasi_kerja),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                errors.insert(field.to_string(), "This field is required".to_string());
            }
        }
        if let (Some(start), Some(Some(end))) = (self.tanggal_mulai_kerja, self.tanggal_selesai_kerja) {
            if end < start {
                errors.insert(
                    "tanggal_selesai_kerja".to_string(),
                    "End date is before start date".to_string(),
                );
            }
        }
        errors
    }

    pub fn touches_dates(&self) -> bool {
        self.tanggal_mulai_kerja.is_some() || self.tanggal_selesai_kerja.is_some()
    }

    pub fn apply(&self, job: &mut Job, now: DateTime<Utc>) {
        if let Some(v) = self.alumni_id {
            job.alumni_id = v;
        }
        if let Some(v) = &self.nama_perusahaan {
            job.nama_perusahaan = v.clone();
        }
        if let Some(v) = &self.posisi_jabatan {
            job.posisi_jabatan = v.clone();
        }
        if let Some(v) = &self.bidang_industri {
            job.bidang_industri = v.clone();
        }
        if let Some(v) = &self.lokasi_kerja {
            job.lokasi_kerja = v.clone();
        }
        if let Some(v) = &self.gaji_range {
            job.gaji_range = v.clone();
        }
        if let Some(v) = self.tanggal_mulai_kerja {
            job.tanggal_mulai_kerja = v;
        }
        if let Some(v) = self.tanggal_selesai_kerja {
            job.tanggal_selesai_kerja = v;
        }
        if let Some(v) = &self.status_pekerjaan {
            job.status_pekerjaan = v.clone();
        }
        if let Some(v) = &self.deskripsi_pekerjaan {
            job.deskripsi_pekerjaan = v.clone();
        }
        job.updated_at = now;
    }
}

/// Jobs started within one calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub tahun: i32,
    pub jumlah: i64,
}

/// Half-open `[Jan 1 year, Jan 1 year+1)` window used by the per-year count
pub fn year_window(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}
