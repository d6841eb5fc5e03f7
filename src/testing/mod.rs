// testing - in-memory stores and fixtures for unit and router tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::Role;
use crate::config::AppConfig;
use crate::database::models::User;
use crate::state::{AppState, Stores};

pub mod memory;

use memory::{MemoryAlumniStore, MemoryFileStore, MemoryJobStore, MemoryUserStore};

/// Build a user whose password hash matches `password`
pub fn user_with_password(name: &str, role: Role, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        role,
        // Minimum cost keeps the suite fast
        password_hash: bcrypt::hash(password, 4).expect("bcrypt hash"),
        created_at: Utc::now(),
    }
}

/// Scratch directory removed on drop
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("alumni-api-test-{}", Uuid::new_v4().simple()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_PASSWORD: &str = "user-password";

/// A full `AppState` on in-memory stores with one admin and one regular user
pub struct TestContext {
    pub state: AppState,
    pub admin: User,
    pub user: User,
    pub alumni: Arc<MemoryAlumniStore>,
    pub jobs: Arc<MemoryJobStore>,
    pub files: Arc<MemoryFileStore>,
    uploads: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let uploads = TempDir::new();
        let mut config = AppConfig::for_tests();
        config.uploads.root = uploads.path().to_string_lossy().into_owned();

        let admin = user_with_password("admin", Role::Admin, ADMIN_PASSWORD);
        let user = user_with_password("alumnus", Role::User, USER_PASSWORD);

        let alumni = Arc::new(MemoryAlumniStore::default());
        let jobs = Arc::new(MemoryJobStore::default());
        let files = Arc::new(MemoryFileStore::default());
        let stores = Stores {
            users: Arc::new(MemoryUserStore::with_users(vec![admin.clone(), user.clone()])),
            alumni: alumni.clone(),
            jobs: jobs.clone(),
            files: files.clone(),
        };

        Self {
            state: AppState::new(config, stores, None),
            admin,
            user,
            alumni,
            jobs,
            files,
            uploads,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        let tokens = &self.state.tokens;
        tokens
            .issue(&tokens.claims_for(user.id, &user.username, user.role))
            .expect("issue token")
    }

    pub fn admin_token(&self) -> String {
        self.token_for(&self.admin)
    }

    pub fn user_token(&self) -> String {
        self.token_for(&self.user)
    }

    pub fn upload_root(&self) -> &Path {
        self.uploads.path()
    }
}
