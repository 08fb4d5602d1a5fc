use thiserror::Error;

use crate::error::{ConstraintViolation, DriverError};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error(transparent)]
    Query(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DatabaseError {
    /// Classifies the failure as a known constraint violation, if it is one.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            DatabaseError::Query(err) => {
                DriverError::from_sqlx_error(err).and_then(|d| ConstraintViolation::classify(&d))
            }
            _ => None,
        }
    }
}
