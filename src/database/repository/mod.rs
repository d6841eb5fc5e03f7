// database/repository - storage traits and their Postgres implementations
//
// Services only ever see the traits, so tests can run the whole HTTP stack
// against the in-memory stores in `crate::testing`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Row};
use uuid::Uuid;

use super::models::{Alumni, AlumniPatch, DeletedState, FileRecord, Job, JobPatch, User};
use super::{DatabaseError, DatabaseManager};
use crate::filter::{ListingFilter, SqlParam};

pub mod alumni;
pub mod file;
pub mod job;
pub mod user;

pub use alumni::PgAlumniStore;
pub use file::PgFileStore;
pub use job::PgJobStore;
pub use user::PgUserStore;

#[async_trait]
pub trait AlumniStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Alumni>, DatabaseError>;
    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Alumni>, DatabaseError>;
    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Alumni>, DatabaseError>;
    async fn insert(&self, alumni: &Alumni) -> Result<(), DatabaseError>;
    /// Returns the updated record, or `None` when the id is unknown
    async fn update(
        &self,
        id: Uuid,
        patch: &AlumniPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Alumni>, DatabaseError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Every job regardless of deleted state, newest first
    async fn list_all(&self) -> Result<Vec<Job>, DatabaseError>;
    async fn list_page(&self, filter: &ListingFilter) -> Result<Vec<Job>, DatabaseError>;
    async fn count(&self, filter: &ListingFilter) -> Result<i64, DatabaseError>;
    async fn list_trashed(&self) -> Result<Vec<Job>, DatabaseError>;
    async fn list_by_alumni(&self, alumni_id: i32) -> Result<Vec<Job>, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DatabaseError>;
    async fn find_by_legacy_id(&self, legacy_id: i32) -> Result<Option<Job>, DatabaseError>;
    async fn next_legacy_id(&self) -> Result<i32, DatabaseError>;
    async fn insert(&self, job: &Job) -> Result<(), DatabaseError>;
    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Job>, DatabaseError>;
    /// Flip the soft-delete flag. `false` when the id is unknown.
    async fn set_deleted(
        &self,
        id: Uuid,
        state: DeletedState,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
    /// Jobs whose start date falls in `[from, to)`
    async fn count_started_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, DatabaseError>;
}

/// Read side used by login
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Match on username or email
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DatabaseError>;
}

#[async_trait]
pub trait UserStore: UserLookup {
    async fn insert(&self, user: &User) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn insert(&self, file: &FileRecord) -> Result<(), DatabaseError>;
    async fn list_all(&self) -> Result<Vec<FileRecord>, DatabaseError>;
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<FileRecord>, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DatabaseError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// One page of a listing, using the filter's generated SQL
pub(crate) async fn fetch_page<T>(db: &DatabaseManager, filter: &ListingFilter) -> Result<Vec<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql_result = filter.to_sql();
    let mut q = sqlx::query_as::<_, T>(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query_as(q, p);
    }
    db.timed(q.fetch_all(db.pool())).await
}

/// Total matches for the same predicate as [`fetch_page`]
pub(crate) async fn fetch_count(db: &DatabaseManager, filter: &ListingFilter) -> Result<i64, DatabaseError> {
    let sql_result = filter.to_count_sql();
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    let row = db.timed(q.fetch_one(db.pool())).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Int(i) => q.bind(*i),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Int(i) => q.bind(*i),
    }
}
