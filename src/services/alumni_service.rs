use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::{parse_id, ServiceError};
use crate::config::ListingConfig;
use crate::database::models::{Alumni, AlumniInput, AlumniPatch, ALUMNI_LISTING};
use crate::database::repository::AlumniStore;
use crate::filter::{ListingEnvelope, ListingFilter, ListingMeta, ListingQuery};

pub struct AlumniService {
    store: Arc<dyn AlumniStore>,
    listing: ListingConfig,
}

impl AlumniService {
    pub fn new(store: Arc<dyn AlumniStore>, listing: ListingConfig) -> Self {
        Self { store, listing }
    }

    pub async fn list_all(&self) -> Result<Vec<Alumni>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn list_page(&self, query: &ListingQuery) -> Result<ListingEnvelope<Alumni>, ServiceError> {
        let filter = ListingFilter::from_query(&ALUMNI_LISTING, query, &self.listing);
        debug!(
            "Alumni listing page={} limit={} sort={} search='{}'",
            filter.page, filter.limit, filter.order.column, filter.search
        );

        let data = self.store.list_page(&filter).await?;
        let total = self.store.count(&filter).await?;
        Ok(ListingEnvelope {
            data,
            meta: ListingMeta::new(&filter, total),
        })
    }

    pub async fn get(&self, id: &str) -> Result<Alumni, ServiceError> {
        let id = parse_id(id, "Alumni")?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Alumni not found".to_string()))
    }

    pub async fn create(&self, input: AlumniInput) -> Result<Alumni, ServiceError> {
        ServiceError::check_fields(input.field_errors())?;

        let alumni = input.into_record(Utc::now());
        self.store.insert(&alumni).await?;
        info!("Created alumni {} ({})", alumni.id, alumni.nim);
        Ok(alumni)
    }

    pub async fn update(&self, id: &str, patch: AlumniPatch) -> Result<Alumni, ServiceError> {
        let id = parse_id(id, "Alumni")?;
        ServiceError::check_fields(patch_errors(&patch))?;

        self.store
            .update(id, &patch, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Alumni not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<Uuid, ServiceError> {
        let id = parse_id(id, "Alumni")?;
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound("Alumni not found".to_string()));
        }
        info!("Deleted alumni {}", id);
        Ok(id)
    }
}

/// A patch may omit fields but may not blank out required ones
fn patch_errors(patch: &AlumniPatch) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    for (field, value) in [
        ("nim", &patch.nim),
        ("nama", &patch.nama),
        ("jurusan", &patch.jurusan),
        ("email", &patch.email),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            errors.insert(field.to_string(), "This field is required".to_string());
        }
    }
    if matches!(&patch.email, Some(v) if !v.trim().is_empty() && !v.contains('@')) {
        errors.insert("email".to_string(), "Invalid email address".to_string());
    }
    errors
}
