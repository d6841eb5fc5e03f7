use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::{parse_id, ServiceError};
use crate::config::ListingConfig;
use crate::database::models::job::year_window;
use crate::database::models::{DeletedState, Job, JobInput, JobPatch, YearCount, JOB_LISTING};
use crate::database::repository::JobStore;
use crate::filter::{ListingEnvelope, ListingFilter, ListingMeta, ListingQuery};

pub struct JobService {
    store: Arc<dyn JobStore>,
    listing: ListingConfig,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>, listing: ListingConfig) -> Self {
        Self { store, listing }
    }

    /// Trashed jobs are included
    pub async fn list_all(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn list_page(&self, query: &ListingQuery) -> Result<ListingEnvelope<Job>, ServiceError> {
        let filter = ListingFilter::from_query(&JOB_LISTING, query, &self.listing);
        let data = self.store.list_page(&filter).await?;
        let total = self.store.count(&filter).await?;
        Ok(ListingEnvelope {
            data,
            meta: ListingMeta::new(&filter, total),
        })
    }

    pub async fn list_trashed(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.store.list_trashed().await?)
    }

    pub async fn list_by_alumni(&self, alumni_id: &str) -> Result<Vec<Job>, ServiceError> {
        let alumni_id: i32 = alumni_id
            .trim()
            .parse()
            .map_err(|_| ServiceError::validation("Invalid alumni id"))?;
        Ok(self.store.list_by_alumni(alumni_id).await?)
    }

    /// Accepts the record UUID or the integer id from the previous schema
    pub async fn get(&self, id: &str) -> Result<Job, ServiceError> {
        let id = id.trim();
        let found = if let Ok(uuid) = Uuid::parse_str(id) {
            self.store.find_by_id(uuid).await?
        } else if let Ok(legacy_id) = id.parse::<i32>() {
            debug!("Looking up job by legacy id {}", legacy_id);
            self.store.find_by_legacy_id(legacy_id).await?
        } else {
            None
        };
        found.ok_or_else(not_found)
    }

    pub async fn create(&self, input: JobInput) -> Result<Job, ServiceError> {
        ServiceError::check_fields(input.field_errors())?;

        let legacy_id = match input.legacy_id {
            Some(id) => id,
            None => self.store.next_legacy_id().await?,
        };
        let job = input.into_record(legacy_id, Utc::now());
        self.store.insert(&job).await?;
        info!("Created job {} (legacy {}) for alumni {}", job.id, job.legacy_id, job.alumni_id);
        Ok(job)
    }

    pub async fn update(&self, id: &str, patch: JobPatch) -> Result<Job, ServiceError> {
        let id = parse_id(id, "Job")?;
        ServiceError::check_fields(patch.field_errors())?;

        // The other end of the date range may only be in the stored record
        if patch.touches_dates() {
            let mut merged = self.store.find_by_id(id).await?.ok_or_else(not_found)?;
            patch.apply(&mut merged, Utc::now());
            let mut errors = HashMap::new();
            if matches!(merged.tanggal_selesai_kerja, Some(end) if end < merged.tanggal_mulai_kerja) {
                errors.insert(
                    "tanggal_selesai_kerja".to_string(),
                    "End date is before start date".to_string(),
                );
            }
            ServiceError::check_fields(errors)?;
        }

        self.store
            .update(id, &patch, Utc::now())
            .await?
            .ok_or_else(not_found)
    }

    pub async fn soft_delete(&self, id: &str) -> Result<(), ServiceError> {
        self.set_deleted(id, DeletedState::Trashed).await
    }

    /// Restoring an active job is a no-op success
    pub async fn restore(&self, id: &str) -> Result<(), ServiceError> {
        self.set_deleted(id, DeletedState::Active).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id, "Job")?;
        if !self.store.delete(id).await? {
            return Err(not_found());
        }
        info!("Permanently deleted job {}", id);
        Ok(())
    }

    pub async fn count_for_year(&self, year: &str) -> Result<YearCount, ServiceError> {
        let tahun: i32 = year
            .trim()
            .parse()
            .map_err(|_| ServiceError::validation("Invalid year"))?;
        let (from, to) = year_window(tahun).ok_or_else(|| ServiceError::validation("Invalid year"))?;

        let jumlah = self.store.count_started_between(from, to).await?;
        Ok(YearCount { tahun, jumlah })
    }

    async fn set_deleted(&self, id: &str, state: DeletedState) -> Result<(), ServiceError> {
        let id = parse_id(id, "Job")?;
        if !self.store.set_deleted(id, state, Utc::now()).await? {
            return Err(not_found());
        }
        debug!("Job {} isdellete={}", id, state.as_str());
        Ok(())
    }
}

fn not_found() -> ServiceError {
    ServiceError::NotFound("Job not found".to_string())
}
