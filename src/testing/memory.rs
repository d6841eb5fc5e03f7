use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Alumni, AlumniPatch, DeletedState, FileRecord, Job, JobPatch, User};
use crate::database::repository::{AlumniStore, FileStore, JobStore, UserLookup, UserStore};
use crate::database::DatabaseError;
use crate::filter::{ListingFilter, SortDirection};

/// Search, sort and paginate rows the way the generated SQL does
fn listing<T: Serialize + Clone>(rows: &[T], filter: &ListingFilter) -> (Vec<T>, i64) {
    let needle = filter.search.to_lowercase();
    let mut matched: Vec<(Value, &T)> = rows
        .iter()
        .map(|row| (serde_json::to_value(row).unwrap_or(Value::Null), row))
        .filter(|(value, _)| {
            needle.is_empty()
                || filter.columns.search.iter().any(|column| {
                    value
                        .get(*column)
                        .and_then(Value::as_str)
                        .map(|s| s.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
        })
        .collect();

    let column = filter.order.column;
    matched.sort_by(|(a, _), (b, _)| {
        let primary = compare(&a[column], &b[column]);
        let primary = match filter.order.sort {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| compare(&a["id"], &b["id"]))
    });

    let total = matched.len() as i64;
    let page = matched
        .into_iter()
        .skip(filter.offset() as usize)
        .take(filter.limit as usize)
        .map(|(_, row)| row.clone())
        .collect();
    (page, total)
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[derive(Default)]
pub struct MemoryAlumniStore {
    rows: RwLock<Vec<Alumni>>,
}

#[async_trait]
impl AlumniStore for MemoryAlumniStore {
    async fn list_all(&self) -> Result<Vec<Alumni>, DatabaseError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| a.nama.cmp(&b.nama));
        Ok(rows)
    }

    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Alumni>, DatabaseError> {
        Ok(listing(&self.rows.read().await, filter).0)
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError> {
        Ok(listing(&self.rows.read().await, filter).1)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Alumni>, DatabaseError> {
        Ok(self.rows.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, alumni: &Alumni) -> Result<(), DatabaseError> {
        self.rows.write().await.push(alumni.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &AlumniPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Alumni>, DatabaseError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|a| a.id == id).map(|alumni| {
            patch.apply(alumni, now);
            alumni.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryJobStore {
    rows: RwLock<Vec<Job>>,
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list_all(&self) -> Result<Vec<Job>, DatabaseError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Job>, DatabaseError> {
        Ok(listing(&self.rows.read().await, filter).0)
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError> {
        Ok(listing(&self.rows.read().await, filter).1)
    }

    async fn list_trashed(&self) -> Result<Vec<Job>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|j| j.deleted == DeletedState::Trashed).cloned().collect())
    }

    async fn list_by_alumni(&self, alumni_id: i32) -> Result<Vec<Job>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|j| j.alumni_id == alumni_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DatabaseError> {
        Ok(self.rows.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn find_by_legacy_id(&self, legacy_id: i32) -> Result<Option<Job>, DatabaseError> {
        Ok(self.rows.read().await.iter().find(|j| j.legacy_id == legacy_id).cloned())
    }

    async fn next_legacy_id(&self) -> Result<i32, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().map(|j| j.legacy_id).max().unwrap_or(0) + 1)
    }

    async fn insert(&self, job: &Job) -> Result<(), DatabaseError> {
        self.rows.write().await.push(job.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Job>, DatabaseError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|j| j.id == id).map(|job| {
            patch.apply(job, now);
            job.clone()
        }))
    }

    async fn set_deleted(
        &self,
        id: Uuid,
        state: DeletedState,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.deleted = state;
                job.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|j| j.id != id);
        Ok(rows.len() != before)
    }

    async fn count_started_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|j| j.tanggal_mulai_kerja >= from && j.tanggal_mulai_kerja < to)
            .count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            rows: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserLookup for MemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|u| u.username == identifier)
            .or_else(|| rows.iter().find(|u| u.email == identifier))
            .cloned())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        self.rows.write().await.push(user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFileStore {
    rows: RwLock<Vec<FileRecord>>,
}

impl MemoryFileStore {
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn insert(&self, file: &FileRecord) -> Result<(), DatabaseError> {
        self.rows.write().await.push(file.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, DatabaseError> {
        Ok(self.rows.read().await.clone())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<FileRecord>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|f| f.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DatabaseError> {
        Ok(self.rows.read().await.iter().find(|f| f.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|f| f.id != id);
        Ok(rows.len() != before)
    }
}

/// Every write fails; reads see an empty store
pub struct FailingFileStore;

#[async_trait]
impl FileStore for FailingFileStore {
    async fn insert(&self, _file: &FileRecord) -> Result<(), DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, DatabaseError> {
        Ok(vec![])
    }

    async fn list_by_owner(&self, _user_id: Uuid) -> Result<Vec<FileRecord>, DatabaseError> {
        Ok(vec![])
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<FileRecord>, DatabaseError> {
        Ok(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}
