use async_trait::async_trait;

use super::{UserLookup, UserStore};
use crate::database::models::User;
use crate::database::{DatabaseError, DatabaseManager};

pub struct PgUserStore {
    db: DatabaseManager,
}

impl PgUserStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLookup for PgUserStore {
    /// An exact username match wins over another account's email
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, DatabaseError> {
        let q = sqlx::query_as::<_, User>(
            r#"SELECT * FROM "users" WHERE "username" = $1 OR "email" = $1
               ORDER BY ("username" = $1) DESC, "created_at" ASC
               LIMIT 1"#,
        )
        .bind(identifier);
        self.db.timed(q.fetch_optional(self.db.pool())).await
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        let q = sqlx::query(
            r#"INSERT INTO "users" ("id", "username", "email", "role", "password_hash", "created_at")
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at);
        self.db.timed(q.execute(self.db.pool())).await?;
        Ok(())
    }
}
