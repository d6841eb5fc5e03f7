use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::Role;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::repository::{PgUserStore, UserStore};
use crate::database::{schema, DatabaseManager};

#[derive(Args)]
pub struct CreateUserArgs {
    #[arg(long, help = "Login name")]
    pub username: String,
    #[arg(long, help = "Email address, also accepted at login")]
    pub email: String,
    #[arg(long, default_value = "user", help = "admin or user")]
    pub role: String,
    #[arg(long, help = "Plaintext password; stored as a bcrypt hash")]
    pub password: String,
}

pub fn hash_password(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).context("failed to hash password")?;
    match output_format {
        OutputFormat::Json => println!("{}", json!({ "hash": hash })),
        OutputFormat::Text => println!("{}", hash),
    }
    Ok(())
}

/// Build the account record; split out so it can be checked without a database
pub(crate) fn build_user(args: &CreateUserArgs) -> anyhow::Result<User> {
    let role = Role::parse(&args.role).ok_or_else(|| anyhow!("role must be 'admin' or 'user', got '{}'", args.role))?;
    if args.username.trim().is_empty() || args.password.is_empty() {
        return Err(anyhow!("username and password must not be empty"));
    }

    Ok(User {
        id: Uuid::new_v4(),
        username: args.username.trim().to_string(),
        email: args.email.trim().to_string(),
        role,
        password_hash: bcrypt::hash(&args.password, bcrypt::DEFAULT_COST).context("failed to hash password")?,
        created_at: Utc::now(),
    })
}

pub async fn create_user(args: CreateUserArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let user = build_user(&args)?;

    let config = AppConfig::from_env();
    let db = DatabaseManager::connect(&config.database)?;
    schema::ensure_schema(&db).await?;
    PgUserStore::new(db.clone())
        .insert(&user)
        .await
        .with_context(|| format!("failed to create user '{}'", user.username))?;
    db.close().await;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&user)?),
        OutputFormat::Text => println!("Created {} account '{}' ({})", user.role, user.username, user.id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(role: &str) -> CreateUserArgs {
        CreateUserArgs {
            username: " operator ".into(),
            email: "operator@example.com".into(),
            role: role.into(),
            password: "s3cret".into(),
        }
    }

    #[test]
    fn build_user_hashes_password() {
        let user = build_user(&args("admin")).unwrap();
        assert_eq!(user.username, "operator");
        assert_eq!(user.role, Role::Admin);
        assert!(bcrypt::verify("s3cret", &user.password_hash).unwrap());
    }

    #[test]
    fn build_user_rejects_unknown_role() {
        assert!(build_user(&args("root")).is_err());
    }
}
