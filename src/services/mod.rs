// services - business rules between the HTTP handlers and the stores

use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::Role;
use crate::database::DatabaseError;

pub mod alumni_service;
pub mod file_service;
pub mod job_service;

pub use alumni_service::AlumniService;
pub use file_service::{FileService, FileUpload};
pub use job_service::JobService;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field_errors: None,
        }
    }

    /// `Ok` when no field reported a problem
    pub(crate) fn check_fields(errors: HashMap<String, String>) -> Result<(), Self> {
        if errors.is_empty() {
            return Ok(());
        }
        Err(ServiceError::Validation {
            message: "Invalid input".to_string(),
            field_errors: Some(errors),
        })
    }
}

/// The authenticated principal a service call is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Record ids are UUIDs; anything else can never match, so it reads as not found
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::NotFound(format!("{} not found", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_reads_as_not_found() {
        assert!(matches!(parse_id("123abc", "Alumni"), Err(ServiceError::NotFound(m)) if m == "Alumni not found"));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Alumni").unwrap(), id);
    }

    #[test]
    fn empty_field_errors_pass() {
        assert!(ServiceError::check_fields(HashMap::new()).is_ok());
        let mut errors = HashMap::new();
        errors.insert("nim".to_string(), "This field is required".to_string());
        assert!(matches!(
            ServiceError::check_fields(errors),
            Err(ServiceError::Validation { field_errors: Some(_), .. })
        ));
    }
}
