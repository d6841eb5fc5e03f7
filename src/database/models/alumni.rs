use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{nullable, nullable_string_or_number, optional_string_or_number};
use crate::filter::ListingColumns;

/// Search, sort whitelist and default sort for `GET /api/alumni/pag`
pub static ALUMNI_LISTING: ListingColumns = ListingColumns {
    table: "alumni",
    search: &["nama", "nim", "jurusan", "email"],
    sortable: &["nama", "nim", "angkatan", "tahun_lulus", "email"],
    default_sort: "nama",
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alumni {
    pub id: Uuid,
    /// Student number; not uniqueness-checked here
    pub nim: String,
    pub nama: String,
    pub jurusan: String,
    pub angkatan: i32,
    pub tahun_lulus: i32,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_telepon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlumniInput {
    pub nim: String,
    pub nama: String,
    pub jurusan: String,
    pub angkatan: i32,
    pub tahun_lulus: i32,
    pub email: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub no_telepon: Option<String>,
    #[serde(default)]
    pub alamat: Option<String>,
}

impl AlumniInput {
    /// Field-level problems, empty when the input is acceptable
    pub fn field_errors(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for (field, value) in [
            ("nim", &self.nim),
            ("nama", &self.nama),
            ("jurusan", &self.jurusan),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), "This field is required".to_string());
            }
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.insert("email".to_string(), "Invalid email address".to_string());
        }
        errors
    }

    pub fn into_record(self, now: DateTime<Utc>) -> Alumni {
        Alumni {
            id: Uuid::new_v4(),
            nim: self.nim,
            nama: self.nama,
            jurusan: self.jurusan,
            angkatan: self.angkatan,
            tahun_lulus: self.tahun_lulus,
            email: self.email,
            no_telepon: self.no_telepon,
            alamat: self.alamat,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields keep their stored value, `null` clears
/// `no_telepon` and `alamat`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlumniPatch {
    pub nim: Option<String>,
    pub nama: Option<String>,
    pub jurusan: Option<String>,
    pub angkatan: Option<i32>,
    pub tahun_lulus: Option<i32>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable_string_or_number")]
    pub no_telepon: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub alamat: Option<Option<String>>,
}

impl AlumniPatch {
    pub fn apply(&self, alumni: &mut Alumni, now: DateTime<Utc>) {
        if let Some(v) = &self.nim {
            alumni.nim = v.clone();
        }
        if let Some(v) = &self.nama {
            alumni.nama = v.clone();
        }
        if let Some(v) = &self.jurusan {
            alumni.jurusan = v.clone();
        }
        if let Some(v) = self.angkatan {
            alumni.angkatan = v;
        }
        if let Some(v) = self.tahun_lulus {
            alumni.tahun_lulus = v;
        }
        if let Some(v) = &self.email {
            alumni.email = v.clone();
        }
        if let Some(v) = &self.no_telepon {
            alumni.no_telepon = v.clone();
        }
        if let Some(v) = &self.alamat {
            alumni.alamat = v.clone();
        }
        alumni.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn phone_accepts_number_or_string() {
        let base = json!({
            "nim": "123", "nama": "Ani", "jurusan": "TI",
            "angkatan": 2018, "tahun_lulus": 2022, "email": "ani@example.com"
        });

        let mut numeric = base.clone();
        numeric["no_telepon"] = json!(81234567);
        let input: AlumniInput = serde_json::from_value(numeric).unwrap();
        assert_eq!(input.no_telepon.as_deref(), Some("81234567"));

        let mut text = base.clone();
        text["no_telepon"] = json!("081234567");
        let input: AlumniInput = serde_json::from_value(text).unwrap();
        assert_eq!(input.no_telepon.as_deref(), Some("081234567"));

        let input: AlumniInput = serde_json::from_value(base).unwrap();
        assert!(input.no_telepon.is_none());
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let input: AlumniInput = serde_json::from_value(json!({
            "nim": " ", "nama": "Ani", "jurusan": "TI",
            "angkatan": 2018, "tahun_lulus": 2022, "email": "not-an-email"
        }))
        .unwrap();

        let errors = input.field_errors();
        assert!(errors.contains_key("nim"));
        assert_eq!(errors["email"], "Invalid email address");
        assert!(!errors.contains_key("nama"));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let created = Utc::now();
        let input: AlumniInput = serde_json::from_value(json!({
            "nim": "123", "nama": "Ani", "jurusan": "TI",
            "angkatan": 2018, "tahun_lulus": 2022, "email": "ani@example.com"
        }))
        .unwrap();
        let mut alumni = input.into_record(created);

        let patch = AlumniPatch {
            jurusan: Some("SI".into()),
            ..Default::default()
        };
        let later = created + chrono::Duration::seconds(5);
        patch.apply(&mut alumni, later);

        assert_eq!(alumni.jurusan, "SI");
        assert_eq!(alumni.nama, "Ani");
        assert_eq!(alumni.created_at, created);
        assert_eq!(alumni.updated_at, later);
    }

    #[test]
    fn null_patch_clears_contact_fields() {
        let input: AlumniInput = serde_json::from_value(json!({
            "nim": "123", "nama": "Ani", "jurusan": "TI",
            "angkatan": 2018, "tahun_lulus": 2022, "email": "ani@example.com",
            "no_telepon": "0812", "alamat": "Jl. Merdeka 1"
        }))
        .unwrap();
        let mut alumni = input.into_record(Utc::now());

        let patch: AlumniPatch = serde_json::from_value(json!({ "alamat": null })).unwrap();
        patch.apply(&mut alumni, Utc::now());
        assert!(alumni.alamat.is_none());
        assert_eq!(alumni.no_telepon.as_deref(), Some("0812"));

        let patch: AlumniPatch = serde_json::from_value(json!({ "no_telepon": 81299 })).unwrap();
        patch.apply(&mut alumni, Utc::now());
        assert_eq!(alumni.no_telepon.as_deref(), Some("81299"));
    }
}
