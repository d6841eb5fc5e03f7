// state.rs - shared application state handed to every handler

use std::sync::Arc;

use crate::auth::{CredentialVerifier, TokenService};
use crate::config::AppConfig;
use crate::database::repository::{
    AlumniStore, FileStore, JobStore, PgAlumniStore, PgFileStore, PgJobStore, PgUserStore, UserLookup,
};
use crate::database::DatabaseManager;
use crate::services::{AlumniService, FileService, JobService};

/// The storage backends behind each service
pub struct Stores {
    pub users: Arc<dyn UserLookup>,
    pub alumni: Arc<dyn AlumniStore>,
    pub jobs: Arc<dyn JobStore>,
    pub files: Arc<dyn FileStore>,
}

impl Stores {
    pub fn postgres(db: &DatabaseManager) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(db.clone())),
            alumni: Arc::new(PgAlumniStore::new(db.clone())),
            jobs: Arc::new(PgJobStore::new(db.clone())),
            files: Arc::new(PgFileStore::new(db.clone())),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
    pub credentials: Arc<CredentialVerifier>,
    pub alumni: Arc<AlumniService>,
    pub jobs: Arc<JobService>,
    pub files: Arc<FileService>,
    /// `None` when running on in-memory stores
    pub db: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores, db: Option<DatabaseManager>) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            credentials: Arc::new(CredentialVerifier::new(stores.users, tokens.clone())),
            alumni: Arc::new(AlumniService::new(stores.alumni, config.listing.clone())),
            jobs: Arc::new(JobService::new(stores.jobs, config.listing.clone())),
            files: Arc::new(FileService::new(stores.files, config.uploads.root.clone())),
            tokens,
            config: Arc::new(config),
            db,
        }
    }
}
